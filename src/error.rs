//! Error types shared across the crate

use std::path::PathBuf;

/// Rejected achievement registration or update.
///
/// Registry state is never modified when one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// An achievement with this name is already registered.
    #[error("achievement already registered: {name}")]
    DuplicateKey { name: String },

    /// A required identifier or description was empty.
    #[error("invalid argument: {field} must not be empty")]
    InvalidArgument { field: &'static str },

    /// No achievement is registered under this name.
    #[error("achievement not registered: {name}")]
    NotFound { name: String },
}

/// A ship move that would leave the grid. The ship stays where it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("Out of bounds")]
pub struct BoundsError {
    /// The rejected target cell
    pub x: i32,
    pub y: i32,
}

/// Settings could not be loaded or are unusable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read settings from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid settings: {0}")]
    Invalid(String),
}
