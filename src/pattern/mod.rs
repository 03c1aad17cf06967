//! EPC pattern grammar and set algebra.
//!
//! ## Core Components
//!
//! - [`TagFormatRegistry`] - format tokens and their field counts
//! - [`FieldValue`] - one data field: literal, range, `*` or `X`
//! - [`TagPattern`] - a full parsed pattern with disjointness, membership
//!   and group-name derivation
//!
//! ## Example Usage
//!
//! ```rust
//! use ale_engine::pattern::{parse_pattern, PatternUsage};
//!
//! let filter = parse_pattern("urn:epc:pat:sgtin-96:*.*.50.*", PatternUsage::Filter)?;
//! assert!(filter.is_member("urn:epc:tag:sgtin-96:3.0614141.50.1"));
//! assert!(!filter.is_member("urn:epc:tag:sgtin-96:3.0614141.51.1"));
//! # Ok::<(), ale_engine::AleError>(())
//! ```

pub mod field;
pub mod format;
pub mod tag_pattern;
pub mod usage;

pub use field::{FieldKind, FieldValue};
pub use format::{FormatEntry, TagFormat, TagFormatRegistry, FORMAT_TABLE};
pub use tag_pattern::{parse_pattern, Domain, TagPattern};
pub use usage::PatternUsage;
