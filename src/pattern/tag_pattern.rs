//! Tag, filter and group patterns.
//!
//! Grammar (five `:`-separated segments):
//!
//! ```text
//! urn : (epc | oid | prop) : (urn | tag | pat | id | idpat | raw) : <format> : <f1>.<f2>...<fn>
//! ```
//!
//! Only the `epc` domain carries data fields. For `oid` and `prop` the format
//! is taken from the domain token itself and the last two segments are kept
//! verbatim without interpretation.

use crate::error::{AleError, Result};
use crate::pattern::field::FieldValue;
use crate::pattern::format::{TagFormat, TagFormatRegistry};
use crate::pattern::usage::PatternUsage;
use serde::{Serialize, Serializer};
use std::fmt;
use tracing::debug;

const FIRST_FIELD: &str = "urn";
const SEGMENT_COUNT: usize = 5;
const ID_SPACES: [&str; 6] = ["urn", "tag", "pat", "id", "idpat", "raw"];

/// Second segment of a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Epc,
    Oid,
    Prop,
}

impl Domain {
    const ALL: [Domain; 3] = [Domain::Epc, Domain::Oid, Domain::Prop];

    pub fn token(self) -> &'static str {
        match self {
            Domain::Epc => "epc",
            Domain::Oid => "oid",
            Domain::Prop => "prop",
        }
    }

    fn from_token(token: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|domain| domain.token() == token)
    }
}

/// Segments of an `oid`/`prop` pattern that are carried but not parsed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct OpaqueSegments {
    format: String,
    data: String,
}

/// A parsed, immutable pattern.
///
/// Patterns are cheap to share across threads: every operation takes `&self`
/// and touches no state beyond its arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TagPattern {
    usage: PatternUsage,
    domain: Domain,
    id_space: String,
    format: TagFormat,
    fields: Vec<FieldValue>,
    opaque: Option<OpaqueSegments>,
}

/// Parse a pattern string under the given usage.
pub fn parse_pattern(pattern: &str, usage: PatternUsage) -> Result<TagPattern> {
    TagPattern::parse(pattern, usage)
}

impl TagPattern {
    /// Parse a pattern string.
    ///
    /// # Errors
    /// * [`AleError::MalformedPattern`] - wrong segment count, first segment
    ///   not `urn`, or unknown domain
    /// * [`AleError::UnknownFormat`] - format token not in the registry
    /// * [`AleError::ArityMismatch`] - data field count differs from the
    ///   format's arity
    /// * [`AleError::InvalidLiteral`] / [`AleError::InvalidRange`] - a data
    ///   field is illegal for `usage`
    pub fn parse(pattern: &str, usage: PatternUsage) -> Result<Self> {
        let parts: Vec<&str> = pattern.split(':').collect();
        if parts.len() != SEGMENT_COUNT {
            return Err(malformed(
                pattern,
                format!(
                    "expected {SEGMENT_COUNT} ':'-separated segments, found {}",
                    parts.len()
                ),
            ));
        }

        if parts[0] != FIRST_FIELD {
            return Err(malformed(
                pattern,
                format!("first segment must be '{FIRST_FIELD}', found '{}'", parts[0]),
            ));
        }

        let domain = Domain::from_token(parts[1]).ok_or_else(|| {
            malformed(pattern, format!("unknown domain '{}'", parts[1]))
        })?;

        match domain {
            Domain::Oid | Domain::Prop => Ok(Self {
                usage,
                domain,
                id_space: parts[2].to_string(),
                format: TagFormatRegistry::resolve(domain.token())?,
                fields: Vec::new(),
                opaque: Some(OpaqueSegments {
                    format: parts[3].to_string(),
                    data: parts[4].to_string(),
                }),
            }),
            Domain::Epc => {
                let format = TagFormatRegistry::resolve(parts[3])?;
                let fields = parse_data_fields(pattern, parts[4], format, usage)?;
                Ok(Self {
                    usage,
                    domain,
                    id_space: parts[2].to_string(),
                    format,
                    fields,
                    opaque: None,
                })
            }
        }
    }

    pub fn usage(&self) -> PatternUsage {
        self.usage
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    /// Third segment, e.g. `pat` or `tag`.
    pub fn id_space(&self) -> &str {
        &self.id_space
    }

    pub fn format(&self) -> TagFormat {
        self.format
    }

    /// Data fields in declaration order. Empty for `oid` and `prop`.
    pub fn fields(&self) -> &[FieldValue] {
        &self.fields
    }

    pub fn field(&self, index: usize) -> Option<&FieldValue> {
        self.fields.get(index)
    }

    // Named positions of the common 4-field layouts. Formats with a smaller
    // arity return `None` past their last field.

    pub fn filter(&self) -> Option<&FieldValue> {
        self.field(0)
    }

    pub fn company(&self) -> Option<&FieldValue> {
        self.field(1)
    }

    pub fn item(&self) -> Option<&FieldValue> {
        self.field(2)
    }

    pub fn serial(&self) -> Option<&FieldValue> {
        self.field(3)
    }

    /// True if no tag can match both patterns.
    ///
    /// Patterns of different formats never overlap. Patterns of the same
    /// format are disjoint as soon as one pair of corresponding fields is.
    pub fn is_disjoint(&self, other: &TagPattern) -> bool {
        if self.format != other.format {
            return true;
        }

        self.fields
            .iter()
            .zip(other.fields.iter())
            .any(|(a, b)| a.is_disjoint(b))
    }

    /// Parse `pattern` as a group pattern and test disjointness against it.
    pub fn is_disjoint_str(&self, pattern: &str) -> Result<bool> {
        let other = TagPattern::parse(pattern, PatternUsage::Group)?;
        Ok(self.is_disjoint(&other))
    }

    /// True if the tag identifier is matched by this filter or group pattern.
    ///
    /// A candidate that does not parse as a tag pattern is not a member.
    /// Patterns of usage `Tag` have no members.
    pub fn is_member(&self, tag_uri: &str) -> bool {
        if self.usage == PatternUsage::Tag {
            return false;
        }

        parse_candidate(tag_uri).is_some_and(|tag| self.matches_tag(&tag))
    }

    /// Membership test against an already parsed tag.
    ///
    /// Lets callers parse a read once and test it against many patterns.
    pub fn matches_tag(&self, tag: &TagPattern) -> bool {
        if self.usage == PatternUsage::Tag
            || tag.format != self.format
            || tag.fields.len() != self.fields.len()
        {
            return false;
        }

        self.fields
            .iter()
            .zip(tag.fields.iter())
            .all(|(field, value)| value.value().is_some_and(|v| field.is_member(v)))
    }

    /// Group name of a tag under this group pattern.
    ///
    /// Every `X` field is replaced by the tag's value at that position; all
    /// other fields are kept as declared. Returns `None` if this is not a
    /// group pattern or the tag is not a member.
    pub fn group_name(&self, tag_uri: &str) -> Option<String> {
        if self.usage != PatternUsage::Group {
            return None;
        }

        parse_candidate(tag_uri).and_then(|tag| self.group_name_for(&tag))
    }

    /// [`TagPattern::group_name`] for an already parsed tag.
    pub fn group_name_for(&self, tag: &TagPattern) -> Option<String> {
        if self.usage != PatternUsage::Group || !self.matches_tag(tag) {
            return None;
        }

        let fields = self
            .fields
            .iter()
            .zip(tag.fields.iter())
            .map(|(field, value)| {
                if field.is_named_wildcard() {
                    value.clone()
                } else {
                    field.clone()
                }
            })
            .collect();

        let named = TagPattern {
            fields,
            ..self.clone()
        };
        Some(named.to_string())
    }
}

impl fmt::Display for TagPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{FIRST_FIELD}:{}:{}:",
            self.domain.token(),
            self.id_space
        )?;

        if let Some(opaque) = &self.opaque {
            return write!(f, "{}:{}", opaque.format, opaque.data);
        }

        write!(f, "{}:", self.format.token())?;
        for (index, field) in self.fields.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            write!(f, "{field}")?;
        }
        Ok(())
    }
}

impl Serialize for TagPattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

fn parse_data_fields(
    pattern: &str,
    data: &str,
    format: TagFormat,
    usage: PatternUsage,
) -> Result<Vec<FieldValue>> {
    let tokens: Vec<&str> = data.split('.').collect();
    let expected = TagFormatRegistry::arity(format);

    if tokens.len() != expected {
        return Err(AleError::ArityMismatch {
            pattern: pattern.to_string(),
            format: format.token().to_string(),
            expected,
            actual: tokens.len(),
        });
    }

    tokens
        .into_iter()
        .map(|token| FieldValue::parse(token, usage))
        .collect()
}

fn parse_candidate(tag_uri: &str) -> Option<TagPattern> {
    match TagPattern::parse(tag_uri, PatternUsage::Tag) {
        Ok(tag) => Some(tag),
        Err(err) => {
            debug!(tag = tag_uri, error = %err, "candidate is not a valid tag identifier");
            None
        }
    }
}

fn malformed(pattern: &str, reason: String) -> AleError {
    let domains: Vec<&str> = Domain::ALL.iter().map(|d| d.token()).collect();
    AleError::MalformedPattern {
        pattern: pattern.to_string(),
        reason,
        expected: format!(
            "{FIRST_FIELD}:({}):({}):tag-format:data-fields",
            domains.join(" | "),
            ID_SPACES.join(" | ")
        ),
    }
}
