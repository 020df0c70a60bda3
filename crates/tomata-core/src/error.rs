//! Core error types for tomata-core.
//!
//! One focused enum per subsystem, gathered under [`CoreError`] via `#[from]`
//! conversions so callers can use `?` across module boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Umbrella error type for tomata-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Glyph template loading/parsing errors
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// Countdown rendering errors
    #[error("render error: {0}")]
    Render(#[from] RenderError),

    /// Tag ledger persistence errors
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors from terminal/prompt collaborators
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while loading a glyph template.
#[derive(Error, Debug)]
pub enum TemplateError {
    /// No style block with this name exists in the definition source.
    #[error("no glyph style named '{0}' in the definition source")]
    NotFound(String),

    /// A style block was found but its declaration does not match its rows.
    #[error("glyph style '{style}' is malformed: {reason}")]
    Malformed { style: String, reason: String },
}

/// Errors raised by the ASCII renderer.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The input contained a character outside `0`-`9` and `:`.
    #[error("no glyph for character {0:?}; only digits and ':' can be rendered")]
    UnsupportedGlyph(char),
}

/// Tag ledger persistence errors.
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Failed to open the backing database.
    #[error("failed to open tag ledger at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query or statement execution failed.
    #[error("ledger query failed: {0}")]
    QueryFailed(String),

    /// Filesystem error while locating the data directory.
    #[error("ledger IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<rusqlite::Error> for LedgerError {
    fn from(err: rusqlite::Error) -> Self {
        LedgerError::QueryFailed(err.to_string())
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
