//! Error types for the IDF layout engine

use thiserror::Error;

/// Main error type for idfrust operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IdfError {
    /// Malformed or unsupported record in the input file
    #[error("Parse error in {section} at line {line} near '{token}': {message}")]
    Parse {
        /// Section being read (e.g. `.PLACEMENT`)
        section: String,
        /// 1-based line number
        line: usize,
        /// Offending token, or the whole line when no single token is to blame
        token: String,
        /// Human-readable description
        message: String,
    },

    /// No cell-type catalog entry reproduces a string outline within tolerance
    #[error("Cannot resolve string outline '{name}': {message}")]
    GeometryResolution {
        /// Outline name
        name: String,
        /// Human-readable description
        message: String,
    },

    /// An edit would break id uniqueness or outline/placement linkage
    #[error("Consistency error: {0}")]
    Consistency(String),

    /// Caller parameter outside its physical range
    #[error("Invalid {parameter}: {message}")]
    Validation {
        /// Parameter name as the caller knows it
        parameter: String,
        /// Human-readable description
        message: String,
    },

    /// Unknown placement id or outline name
    #[error("{kind} not found: '{key}'")]
    NotFound {
        /// What was looked up ("placement", "outline", "cell type")
        kind: &'static str,
        /// The key that failed to resolve
        key: String,
    },
}

impl IdfError {
    /// Build a parse error
    pub fn parse(
        section: impl Into<String>,
        line: usize,
        token: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        IdfError::Parse {
            section: section.into(),
            line,
            token: token.into(),
            message: message.into(),
        }
    }

    /// Build a validation error
    pub fn validation(parameter: impl Into<String>, message: impl Into<String>) -> Self {
        IdfError::Validation {
            parameter: parameter.into(),
            message: message.into(),
        }
    }

    /// Build a geometry resolution error
    pub fn geometry(name: impl Into<String>, message: impl Into<String>) -> Self {
        IdfError::GeometryResolution {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Placement id lookup failure
    pub fn placement_not_found(id: impl Into<String>) -> Self {
        IdfError::NotFound {
            kind: "placement",
            key: id.into(),
        }
    }

    /// Outline name lookup failure
    pub fn outline_not_found(name: impl Into<String>) -> Self {
        IdfError::NotFound {
            kind: "outline",
            key: name.into(),
        }
    }
}

/// Result type alias for idfrust operations
pub type Result<T> = std::result::Result<T, IdfError>;
