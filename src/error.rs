//! Error types for stylewatch
//!
//! Uses `thiserror` for library errors; the binary wraps them in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for stylewatch operations
pub type StyleResult<T> = Result<T, StyleError>;

/// Main error type for stylewatch operations
#[derive(Error, Debug)]
pub enum StyleError {
    /// Output directory could not be created
    #[error("failed to create output directory {path}: {source}")]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SCSS source failed to compile (syntax error, missing import, ...)
    #[error("failed to compile {file}: {message}")]
    Compile { file: PathBuf, message: String },

    /// Compiled CSS could not be written
    #[error("failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Subscribing to filesystem notifications failed
    #[error("failed to watch {path}: {message}")]
    Watch { path: PathBuf, message: String },

    /// Invalid config TOML
    #[error("invalid config in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
