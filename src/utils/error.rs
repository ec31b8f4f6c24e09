//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while reading and classifying a thread dump
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Invalid thread state: {0}")]
    InvalidThreadState(String),

    #[error("Failed to read dump: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Failed to read file: {0}")]
    ReadFailed(std::io::Error),

    #[error("Failed to parse report JSON: {0}")]
    DeserializationFailed(serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}
