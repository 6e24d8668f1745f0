#![deny(unsafe_code)]

use std::path::PathBuf;

use attrmap_model::ModelError;

/// Failures that prevent a rule table from being read at all.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    #[error("failed to read rule table {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    #[error("rule table {path} has no header row")]
    MissingHeaders { path: PathBuf },
}

impl RuleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: &csv::Error) -> Self {
        Self::Csv {
            path: path.into(),
            message: source.to_string(),
        }
    }
}

/// Reasons a single rule row is excluded from a store.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RowError {
    #[error("missing required field `{field}`")]
    MissingField { field: &'static str },

    #[error("invalid priority {value:?}")]
    InvalidPriority { value: String },

    #[error(transparent)]
    InvalidEnum(#[from] ModelError),

    #[error("rule kind `supplier` is reserved for raw supplier attributes")]
    ReservedKind,

    #[error("invalid {field} regex {pattern:?}: {message}")]
    InvalidRegex {
        field: &'static str,
        pattern: String,
        message: String,
    },
}
