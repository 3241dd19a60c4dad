//! Error types for tierq.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// Every sequence number this queue can hand out has been used.
    /// The counter never wraps, so the push is rejected instead.
    #[error("sequence counter exhausted after {issued} insertions")]
    SequenceExhausted { issued: u64 },

    #[error("config error: {0}")]
    Config(String),

    #[error("batch error: {0}")]
    Batch(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;
