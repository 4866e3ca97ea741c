//! Error types for the ClipCapsule history panel
//!
//! This module provides error handling using thiserror for structured error
//! definitions and anyhow for error propagation at the binary boundary.
//!
//! The panel itself never branches on error content: a failed backend call is
//! a failed backend call, logged and absorbed per operation.

use thiserror::Error;

/// Main error type for panel operations
#[derive(Error, Debug)]
pub enum PanelError {
    /// Backend HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Backend rejected or failed a read/write
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for panel operations
pub type Result<T> = std::result::Result<T, PanelError>;
