//! # ALE Pattern Engine
//!
//! Tag-pattern matching and filtering for EPCglobal Application Level Events
//! (ALE) middleware. Raw RFID reads, already translated to `urn:epc:...`
//! identifiers, are tested against filter patterns and bucketed by group
//! patterns once per event cycle.
//!
//! ## Quick Start
//!
//! ### Single Patterns
//!
//! ```rust
//! use ale_engine::{parse_pattern, PatternUsage};
//!
//! let group = parse_pattern("urn:epc:pat:sgtin-96:*.X.50.*", PatternUsage::Group)?;
//! let tag = "urn:epc:tag:sgtin-96:7.999.50.3";
//!
//! assert!(group.is_member(tag));
//! assert_eq!(
//!     group.group_name(tag).as_deref(),
//!     Some("urn:epc:pat:sgtin-96:*.999.50.*")
//! );
//! # Ok::<(), ale_engine::AleError>(())
//! ```
//!
//! ### Cycle Declarations
//!
//! ```rust
//! use ale_engine::{CycleDeclaration, PatternEngine};
//!
//! let declaration = CycleDeclaration::from_yaml(r#"
//! name: dock-door-1
//! filter:
//!   include:
//!     - urn:epc:pat:sgtin-96:*.*.50.*
//! group:
//!   patterns:
//!     - urn:epc:pat:sgtin-96:*.X.*.*
//! "#)?;
//!
//! let engine = PatternEngine::new();
//! let cycle = engine.compile(&declaration)?;
//!
//! let reads = vec![
//!     "urn:epc:tag:sgtin-96:3.0614141.50.1",
//!     "urn:epc:tag:sgtin-96:3.0614141.51.1",
//! ];
//! let results = engine.classify_batch(&cycle, &reads);
//! assert!(results[0].classification.is_accepted());
//! assert!(!results[1].classification.is_accepted());
//! # Ok::<(), ale_engine::AleError>(())
//! ```

pub mod config;
pub mod declaration;
pub mod engine;
pub mod error;
pub mod pattern;

pub use config::{BatchConfig, EngineConfig, ValidationConfig};
pub use declaration::{CycleDeclaration, FilterDeclaration, GroupDeclaration};
pub use engine::{
    Classification, ClassifiedTag, CompiledCycle, CompiledFilter, CompiledGrouping, GroupedTags,
    PatternEngine,
};
pub use error::{AleError, Result};
pub use pattern::{
    parse_pattern, Domain, FieldKind, FieldValue, PatternUsage, TagFormat, TagFormatRegistry,
    TagPattern,
};
