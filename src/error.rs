//! Error types for partita.
//!
//! Splitting itself never fails: malformed markup degrades to whatever the parser recovers.
//! These errors cover the edges around it, reading documents and preferences and naming
//! sections.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for the partita library.
#[derive(Debug, Error)]
pub enum PartitaError {
    /// Reading a document or configuration file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration file exists but could not be parsed.
    #[error("Invalid configuration in {}: {message}", .path.display())]
    Config {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// JSON output could not be produced.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    /// A section name outside the known labels.
    #[error("Unknown section name: '{0}'. Expected 'summary' or 'explanation'")]
    UnknownSection(String),
}

/// Result type alias for partita operations.
pub type Result<T> = std::result::Result<T, PartitaError>;
