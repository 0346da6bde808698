//! Error types for the sequencer
//!
//! Sequencing itself never fails: operations with no valid result return
//! `None`. Errors only come from the surfaces around it (settings files and
//! the worker thread).

use thiserror::Error;

/// Sequencer errors
#[derive(Debug, Error)]
pub enum SequencerError {
    /// Settings could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Settings could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The sequencer worker is no longer running
    #[error("Sequencer worker disconnected")]
    Disconnected,
}

/// Result type for sequencer operations
pub type Result<T> = std::result::Result<T, SequencerError>;
