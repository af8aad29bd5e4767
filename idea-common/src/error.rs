//! Common error types for the idea checker

use thiserror::Error;

/// Common result type for idea checker operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by configuration loading and the storage layer
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stored row could not be decoded into a domain value
    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    /// Invalid caller input (empty idea text, blank username, ...)
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
