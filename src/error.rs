//! Error types for parameter file loading

use std::path::PathBuf;
use thiserror::Error;

/// Failures surfaced while loading, querying, or rendering a parameter
/// document. Loading is one-shot and fail-fast; none of these are retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("parameter file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("failed to read parameter file: {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed document. `line`/`column` are 1-based and present when
    /// the parser reports a location.
    #[error("malformed parameter file: {message}")]
    Parse {
        message: String,
        line: Option<usize>,
        column: Option<usize>,
    },

    /// A top-level entry whose body is not a key/value mapping (usually
    /// an indentation mistake in the source file).
    #[error("section `{name}` must be a key/value mapping")]
    Section { name: String },

    /// A typed accessor found a value of the wrong kind.
    #[error("expected {expected} for `{section}.{key}`, found {found}")]
    Type {
        section: String,
        key: String,
        expected: &'static str,
        found: &'static str,
    },

    /// A known section failed to deserialize into its typed form.
    #[error("invalid `{section}` section")]
    Schema {
        section: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize parameter document: {message}")]
    Serialize { message: String },
}

impl ConfigError {
    /// Wrap a YAML parse failure, pulling out the source location when
    /// the parser provides one.
    pub(crate) fn parse(err: serde_yaml::Error) -> Self {
        let location = err.location();
        ConfigError::Parse {
            message: err.to_string(),
            line: location.as_ref().map(|l| l.line()),
            column: location.as_ref().map(|l| l.column()),
        }
    }
}
