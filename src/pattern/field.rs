//! Single data field of a tag, filter or group pattern.
//!
//! A field is one dot-delimited segment of the data part of a pattern:
//!
//! - `50` - an integer literal
//! - `[0-100]` - an inclusive range
//! - `*` - matches every value
//! - `X` - matches every value and names the group after it
//!
//! Which of these are legal depends on the [`PatternUsage`] of the owning
//! pattern.

use crate::error::{AleError, Result};
use crate::pattern::usage::PatternUsage;
use std::fmt;

const WILDCARD: &str = "*";
const NAMED_WILDCARD: &str = "X";

/// The parsed meaning of a field. Exactly one variant is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Literal(u64),
    /// Inclusive on both ends, `low <= high`.
    Range {
        low: u64,
        high: u64,
    },
    Wildcard,
    NamedWildcard,
}

/// A parsed field together with the token it was parsed from.
///
/// The token is kept verbatim so that `to_string` reproduces the input
/// exactly, including leading zeros in literals.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldValue {
    kind: FieldKind,
    token: String,
}

impl FieldValue {
    /// Parse a single field token under the given usage.
    ///
    /// # Errors
    /// * [`AleError::InvalidLiteral`] - a tag field that is not a non-negative
    ///   integer, or a negative integer under any usage
    /// * [`AleError::InvalidRange`] - a filter/group field that is neither a
    ///   wildcard, a literal nor a well-formed `[lo-hi]` range
    pub fn parse(token: &str, usage: PatternUsage) -> Result<Self> {
        if usage.allows_wildcard() && token == WILDCARD {
            return Ok(Self::new(FieldKind::Wildcard, token));
        }

        if usage.allows_named_wildcard() && token == NAMED_WILDCARD {
            return Ok(Self::new(FieldKind::NamedWildcard, token));
        }

        match token.parse::<i128>() {
            Ok(value) if value < 0 => Err(AleError::InvalidLiteral {
                token: token.to_string(),
                reason: "Only positive 'int' is allowed.".to_string(),
            }),
            Ok(value) => u64::try_from(value)
                .map(|value| Self::new(FieldKind::Literal(value), token))
                .map_err(|_| AleError::InvalidLiteral {
                    token: token.to_string(),
                    reason: "Value does not fit in 64 bits.".to_string(),
                }),
            Err(_) if !usage.allows_range() => Err(AleError::InvalidLiteral {
                token: token.to_string(),
                reason: usage.allowed_syntax().to_string(),
            }),
            Err(_) => Self::parse_range(token, usage),
        }
    }

    fn parse_range(token: &str, usage: PatternUsage) -> Result<Self> {
        let invalid = || AleError::InvalidRange {
            token: token.to_string(),
            reason: usage.allowed_syntax().to_string(),
        };

        let inner = token
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
            .ok_or_else(invalid)?;
        let (low, high) = inner.split_once('-').ok_or_else(invalid)?;
        let low = low.parse::<u64>().map_err(|_| invalid())?;
        let high = high.parse::<u64>().map_err(|_| invalid())?;

        if low > high {
            return Err(AleError::InvalidRange {
                token: token.to_string(),
                reason: "Range must have the form '[lo-hi]' with lo <= hi.".to_string(),
            });
        }

        Ok(Self::new(FieldKind::Range { low, high }, token))
    }

    fn new(kind: FieldKind, token: &str) -> Self {
        Self {
            kind,
            token: token.to_string(),
        }
    }

    pub fn kind(&self) -> FieldKind {
        self.kind
    }

    /// The token this field was parsed from.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Literal value, if this field is a literal.
    pub fn value(&self) -> Option<u64> {
        match self.kind {
            FieldKind::Literal(value) => Some(value),
            _ => None,
        }
    }

    /// Lower range bound, if this field is a range.
    pub fn low(&self) -> Option<u64> {
        match self.kind {
            FieldKind::Range { low, .. } => Some(low),
            _ => None,
        }
    }

    /// Upper range bound, if this field is a range.
    pub fn high(&self) -> Option<u64> {
        match self.kind {
            FieldKind::Range { high, .. } => Some(high),
            _ => None,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self.kind, FieldKind::Literal(_))
    }

    pub fn is_range(&self) -> bool {
        matches!(self.kind, FieldKind::Range { .. })
    }

    pub fn is_wildcard(&self) -> bool {
        self.kind == FieldKind::Wildcard
    }

    pub fn is_named_wildcard(&self) -> bool {
        self.kind == FieldKind::NamedWildcard
    }

    /// True if no value can satisfy both fields.
    ///
    /// Wildcards on either side overlap everything. Touching ranges such as
    /// `[0-10]` and `[10-20]` share the value 10 and are not disjoint.
    pub fn is_disjoint(&self, other: &FieldValue) -> bool {
        use FieldKind::*;

        match (self.kind, other.kind) {
            (Wildcard | NamedWildcard, _) | (_, Wildcard | NamedWildcard) => false,
            (Literal(a), Literal(b)) => a != b,
            (Literal(value), Range { low, high }) | (Range { low, high }, Literal(value)) => {
                !(low..=high).contains(&value)
            }
            (
                Range {
                    low: low1,
                    high: high1,
                },
                Range {
                    low: low2,
                    high: high2,
                },
            ) => low1 > high2 || low2 > high1,
        }
    }

    /// True if a concrete tag value satisfies this field.
    pub fn is_member(&self, value: u64) -> bool {
        match self.kind {
            FieldKind::Literal(literal) => literal == value,
            FieldKind::Range { low, high } => low <= value && value <= high,
            FieldKind::Wildcard | FieldKind::NamedWildcard => true,
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token)
    }
}
