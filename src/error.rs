//! Error types for autoplayd
//!
//! Defines module-specific error types using thiserror for clear error propagation.

use thiserror::Error;

/// Main error type for autoplayd
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O errors (marker writes, volume scans)
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Player backend errors (spawn failure, no media loaded)
    #[error("Player error: {0}")]
    Player(String),
}

/// Convenience Result type using autoplayd Error
pub type Result<T> = std::result::Result<T, Error>;
