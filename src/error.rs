//! Error types for the ALE pattern engine.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AleError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AleError {
    /// The `urn:<domain>:<idSpace>:<format>:<fields>` skeleton is violated.
    #[error("Invalid pattern '{pattern}': {reason}. Pattern must have the form '{expected}'")]
    MalformedPattern {
        pattern: String,
        reason: String,
        expected: String,
    },

    #[error("Unknown tag format '{token}'. Known formats are '{}'", .known.join("', '"))]
    UnknownFormat {
        token: String,
        known: Vec<&'static str>,
    },

    #[error(
        "Invalid number of data fields in pattern '{pattern}': format '{format}' expects {expected} data fields, found {actual}"
    )]
    ArityMismatch {
        pattern: String,
        format: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid data field '{token}'. {reason}")]
    InvalidLiteral { token: String, reason: String },

    #[error("Invalid range '{token}'. {reason}")]
    InvalidRange { token: String, reason: String },

    #[error("Group patterns '{first}' and '{second}' are not disjoint")]
    OverlappingGroups { first: String, second: String },

    #[error("Invalid declaration: {0}")]
    InvalidDeclaration(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(String),
}

impl AleError {
    /// True for the errors raised while parsing a single pattern string.
    pub fn is_pattern_error(&self) -> bool {
        matches!(
            self,
            AleError::MalformedPattern { .. }
                | AleError::UnknownFormat { .. }
                | AleError::ArityMismatch { .. }
                | AleError::InvalidLiteral { .. }
                | AleError::InvalidRange { .. }
        )
    }
}

impl From<std::io::Error> for AleError {
    fn from(err: std::io::Error) -> Self {
        AleError::IoError(err.to_string())
    }
}
