//! Error types for digest resolution and caching.

use std::path::PathBuf;

/// Errors returned by the digest layer.
///
/// A readable file that produces no content digest is not represented here:
/// that is a broken collaborator contract and the resolver panics on it.
#[derive(Debug, thiserror::Error)]
pub enum DigestError {
    /// Metadata, fast-digest or content read failed for a path.
    #[error("digest I/O error at {path}: {source}")]
    Io {
        /// The path being digested.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// Statistics were requested while no digest cache is configured.
    #[error("digest cache is not enabled: configure() must be called with a non-zero capacity")]
    CacheDisabled,

    /// The same path was contributed twice to an order-independent aggregate.
    #[error("duplicate contribution for {path}: XOR aggregation would cancel it")]
    DuplicateContribution {
        /// The path contributed more than once.
        path: PathBuf,
    },

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DigestError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        DigestError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl From<config::ConfigError> for DigestError {
    fn from(err: config::ConfigError) -> Self {
        DigestError::ConfigError(err.to_string())
    }
}
