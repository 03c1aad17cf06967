//! Filter and group declarations.
//!
//! A [`CycleDeclaration`] holds the raw pattern strings an event cycle is
//! declared with. It is plain data: patterns are only parsed when the
//! declaration is compiled by [`crate::PatternEngine::compile`].
//!
//! ```yaml
//! name: dock-door-1
//! filter:
//!   include:
//!     - urn:epc:pat:sgtin-96:*.*.50.*
//!   exclude:
//!     - urn:epc:pat:sgtin-96:*.*.50.[0-99]
//! group:
//!   patterns:
//!     - urn:epc:pat:sgtin-96:*.X.*.*
//! ```

use crate::error::{AleError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Include and exclude filter patterns.
///
/// A read passes when it matches at least one include pattern (or there are
/// none) and matches no exclude pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterDeclaration {
    pub include: Vec<String>,
    pub exclude: Vec<String>,
}

/// Group patterns. Reads matching none of them fall into the default group.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GroupDeclaration {
    pub patterns: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CycleDeclaration {
    pub name: String,
    pub filter: FilterDeclaration,
    pub group: GroupDeclaration,
}

impl CycleDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn include(mut self, pattern: impl Into<String>) -> Self {
        self.filter.include.push(pattern.into());
        self
    }

    pub fn exclude(mut self, pattern: impl Into<String>) -> Self {
        self.filter.exclude.push(pattern.into());
        self
    }

    pub fn group(mut self, pattern: impl Into<String>) -> Self {
        self.group.patterns.push(pattern.into());
        self
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| AleError::InvalidDeclaration(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| AleError::InvalidDeclaration(e.to_string()))
    }

    /// Load a declaration file. `.json` files are read as JSON, anything else
    /// as YAML.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_yaml() {
        let declaration = CycleDeclaration::from_yaml(
            r#"
name: dock-door-1
filter:
  include:
    - urn:epc:pat:sgtin-96:*.*.50.*
group:
  patterns:
    - urn:epc:pat:sgtin-96:*.X.*.*
"#,
        )
        .unwrap();

        assert_eq!(declaration.name, "dock-door-1");
        assert_eq!(declaration.filter.include.len(), 1);
        assert!(declaration.filter.exclude.is_empty());
        assert_eq!(declaration.group.patterns, vec!["urn:epc:pat:sgtin-96:*.X.*.*"]);
    }

    #[test]
    fn test_from_json() {
        let declaration = CycleDeclaration::from_json(
            r#"{"name": "n", "filter": {"exclude": ["urn:epc:pat:gid-96:1.*.*"]}}"#,
        )
        .unwrap();
        assert_eq!(declaration.filter.exclude.len(), 1);
        assert!(declaration.group.patterns.is_empty());
    }

    #[test]
    fn test_invalid_document() {
        let err = CycleDeclaration::from_yaml("filter: [unterminated").unwrap_err();
        assert!(matches!(err, AleError::InvalidDeclaration(_)));

        let err = CycleDeclaration::from_json("{").unwrap_err();
        assert!(matches!(err, AleError::InvalidDeclaration(_)));
    }

    #[test]
    fn test_builder() {
        let declaration = CycleDeclaration::new("builder")
            .include("urn:epc:pat:gid-96:*.*.*")
            .exclude("urn:epc:pat:gid-96:1.*.*")
            .group("urn:epc:pat:gid-96:X.*.*");

        assert_eq!(declaration.name, "builder");
        assert_eq!(declaration.filter.include.len(), 1);
        assert_eq!(declaration.filter.exclude.len(), 1);
        assert_eq!(declaration.group.patterns.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let err = CycleDeclaration::from_file("/nonexistent/cycle.yaml").unwrap_err();
        assert!(matches!(err, AleError::IoError(_)));
    }
}
