//! Error types for queries, rendering and configuration
//!
//! "Nothing found" is never an error here: searches return `None` or an empty
//! `Vec`. Errors are reserved for data we cannot rank (missing positions under
//! the strict policy) and for failures of the external meta service.

use std::fmt;

use thiserror::Error;

/// Which end of a syntax range was missing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    Start,
    End,
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bound::Start => write!(f, "start"),
            Bound::End => write!(f, "end"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("{info_kind} info has no {bound} position")]
    MissingPosition {
        info_kind: &'static str,
        bound: Bound,
    },
}

/// Failure reported by a `MetaService` implementation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct MetaError {
    pub message: String,
}

impl MetaError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    #[error("type inference failed: {source}")]
    InferenceFailure {
        #[source]
        source: MetaError,
    },

    #[error("pretty printing failed: {source}")]
    PrettyPrint {
        #[source]
        source: MetaError,
    },

    #[error(transparent)]
    Query(#[from] QueryError),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid initialization options: {0}")]
    InitOptions(#[from] serde_json::Error),

    #[error("invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },
}
