//! How a pattern is used, which governs the field syntaxes it may contain.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a parsed pattern.
///
/// | Usage | literal | `*` | `X` | `[lo-hi]` |
/// |-------|---------|-----|-----|-----------|
/// | `Tag` | yes | no | no | no |
/// | `Filter` | yes | yes | no | yes |
/// | `Group` | yes | yes | yes | yes |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PatternUsage {
    /// A concrete tag identifier; literals only.
    Tag,
    /// A filter declaration.
    Filter,
    /// A group declaration, optionally templated with `X`.
    Group,
}

impl PatternUsage {
    pub fn allows_wildcard(self) -> bool {
        matches!(self, PatternUsage::Filter | PatternUsage::Group)
    }

    pub fn allows_named_wildcard(self) -> bool {
        self == PatternUsage::Group
    }

    pub fn allows_range(self) -> bool {
        self != PatternUsage::Tag
    }

    /// Human-readable list of the field syntaxes legal for this usage.
    pub fn allowed_syntax(self) -> &'static str {
        match self {
            PatternUsage::Tag => "Only 'int' is allowed.",
            PatternUsage::Filter => "Only '*', '[lo-hi]' or 'int' are allowed.",
            PatternUsage::Group => "Only '*', 'X', '[lo-hi]' or 'int' are allowed.",
        }
    }
}

impl fmt::Display for PatternUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PatternUsage::Tag => "TAG",
            PatternUsage::Filter => "FILTER",
            PatternUsage::Group => "GROUP",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_capabilities() {
        assert!(!PatternUsage::Tag.allows_wildcard());
        assert!(!PatternUsage::Tag.allows_range());
        assert!(!PatternUsage::Tag.allows_named_wildcard());

        assert!(PatternUsage::Filter.allows_wildcard());
        assert!(PatternUsage::Filter.allows_range());
        assert!(!PatternUsage::Filter.allows_named_wildcard());

        assert!(PatternUsage::Group.allows_wildcard());
        assert!(PatternUsage::Group.allows_range());
        assert!(PatternUsage::Group.allows_named_wildcard());
    }

    #[test]
    fn test_allowed_syntax_mentions_x_only_for_group() {
        assert!(!PatternUsage::Filter.allowed_syntax().contains("'X'"));
        assert!(PatternUsage::Group.allowed_syntax().contains("'X'"));
    }

    #[test]
    fn test_usage_serde_tokens() {
        assert_eq!(
            serde_json::to_string(&PatternUsage::Group).unwrap(),
            "\"GROUP\""
        );
        let usage: PatternUsage = serde_json::from_str("\"FILTER\"").unwrap();
        assert_eq!(usage, PatternUsage::Filter);
        assert_eq!(PatternUsage::Tag.to_string(), "TAG");
    }
}
