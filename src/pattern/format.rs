//! Tag-format registry.
//!
//! Every supported EPC encoding is listed once in [`FORMAT_TABLE`] together
//! with its token and the number of data fields a pattern of that format
//! carries. Resolution and arity lookups both go through that table.

use crate::error::{AleError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Closed set of tag formats understood by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TagFormat {
    Gid96,
    Sgtin64,
    Sscc64,
    Sgtin96,
    Sscc96,
    Grai96,
    Sgtin,
    Sscc,
    Oid,
    Prop,
}

/// One registry row.
#[derive(Debug, Clone, Copy)]
pub struct FormatEntry {
    pub format: TagFormat,
    pub token: &'static str,
    pub arity: usize,
}

impl FormatEntry {
    const fn new(format: TagFormat, token: &'static str, arity: usize) -> Self {
        Self {
            format,
            token,
            arity,
        }
    }
}

pub static FORMAT_TABLE: [FormatEntry; 10] = [
    FormatEntry::new(TagFormat::Gid96, "gid-96", 3),
    FormatEntry::new(TagFormat::Sgtin64, "sgtin-64", 4),
    FormatEntry::new(TagFormat::Sscc64, "sscc-64", 3),
    FormatEntry::new(TagFormat::Sgtin96, "sgtin-96", 4),
    FormatEntry::new(TagFormat::Sscc96, "sscc-96", 3),
    FormatEntry::new(TagFormat::Grai96, "grai-96", 3),
    FormatEntry::new(TagFormat::Sgtin, "sgtin", 3),
    FormatEntry::new(TagFormat::Sscc, "sscc", 2),
    FormatEntry::new(TagFormat::Oid, "oid", 1),
    FormatEntry::new(TagFormat::Prop, "prop", 1),
];

impl TagFormat {
    fn entry(self) -> &'static FormatEntry {
        // Table rows are declared in variant order.
        &FORMAT_TABLE[self as usize]
    }

    /// Canonical token, e.g. `"sgtin-96"`.
    pub fn token(self) -> &'static str {
        self.entry().token
    }

    /// Required number of data fields.
    pub fn arity(self) -> usize {
        self.entry().arity
    }
}

impl fmt::Display for TagFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for TagFormat {
    type Err = AleError;

    fn from_str(token: &str) -> Result<Self> {
        TagFormatRegistry::resolve(token)
    }
}

impl Serialize for TagFormat {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.token())
    }
}

impl<'de> Deserialize<'de> for TagFormat {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        TagFormatRegistry::resolve(&token).map_err(serde::de::Error::custom)
    }
}

/// Stateless lookup over [`FORMAT_TABLE`].
pub struct TagFormatRegistry;

impl TagFormatRegistry {
    /// Resolve a format token. Matching is exact and case-sensitive.
    pub fn resolve(token: &str) -> Result<TagFormat> {
        FORMAT_TABLE
            .iter()
            .find(|entry| entry.token == token)
            .map(|entry| entry.format)
            .ok_or_else(|| AleError::UnknownFormat {
                token: token.to_string(),
                known: Self::known_tokens(),
            })
    }

    pub fn arity(format: TagFormat) -> usize {
        format.arity()
    }

    pub fn known_tokens() -> Vec<&'static str> {
        FORMAT_TABLE.iter().map(|entry| entry.token).collect()
    }

    pub fn entries() -> &'static [FormatEntry] {
        &FORMAT_TABLE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rows_follow_variant_order() {
        for (index, entry) in FORMAT_TABLE.iter().enumerate() {
            assert_eq!(entry.format as usize, index);
        }
    }

    #[test]
    fn test_resolve_every_known_token() {
        for entry in TagFormatRegistry::entries() {
            let format = TagFormatRegistry::resolve(entry.token).unwrap();
            assert_eq!(format, entry.format);
            assert_eq!(format.token(), entry.token);
            assert_eq!(TagFormatRegistry::arity(format), entry.arity);
        }
    }

    #[test]
    fn test_arities() {
        assert_eq!(TagFormat::Gid96.arity(), 3);
        assert_eq!(TagFormat::Sgtin64.arity(), 4);
        assert_eq!(TagFormat::Sscc64.arity(), 3);
        assert_eq!(TagFormat::Sgtin96.arity(), 4);
        assert_eq!(TagFormat::Sscc96.arity(), 3);
        assert_eq!(TagFormat::Grai96.arity(), 3);
        assert_eq!(TagFormat::Sgtin.arity(), 3);
        assert_eq!(TagFormat::Sscc.arity(), 2);
        assert_eq!(TagFormat::Oid.arity(), 1);
        assert_eq!(TagFormat::Prop.arity(), 1);
    }

    #[test]
    fn test_resolve_is_case_sensitive() {
        let err = TagFormatRegistry::resolve("SGTIN-96").unwrap_err();
        match err {
            AleError::UnknownFormat { token, known } => {
                assert_eq!(token, "SGTIN-96");
                assert_eq!(known.len(), FORMAT_TABLE.len());
                assert!(known.contains(&"sgtin-96"));
                assert!(known.contains(&"prop"));
            }
            other => panic!("Expected UnknownFormat, got {other:?}"),
        }
    }

    #[test]
    fn test_from_str_and_display() {
        let format: TagFormat = "grai-96".parse().unwrap();
        assert_eq!(format, TagFormat::Grai96);
        assert_eq!(format.to_string(), "grai-96");
        assert!("".parse::<TagFormat>().is_err());
    }

    #[test]
    fn test_serde_uses_tokens() {
        assert_eq!(
            serde_json::to_string(&TagFormat::Sscc96).unwrap(),
            "\"sscc-96\""
        );
        let format: TagFormat = serde_json::from_str("\"sgtin-64\"").unwrap();
        assert_eq!(format, TagFormat::Sgtin64);
        assert!(serde_json::from_str::<TagFormat>("\"epc-1\"").is_err());
    }
}
