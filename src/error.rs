//! Error Types
//!
//! The simulation path never fails: degenerate parameters produce
//! degenerate but defined trajectories. Errors only come out of explicit
//! validation, the observational proxy pipeline, and I/O at the edges.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ToyError>;

#[derive(Debug, Error)]
pub enum ToyError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("time has {time} samples but flux has {flux}")]
    LengthMismatch { time: usize, flux: usize },

    #[error("need at least {needed} samples, got {got}")]
    InsufficientData { needed: usize, got: usize },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn invalid_config(msg: impl Into<String>) -> ToyError {
    ToyError::InvalidConfig(msg.into())
}
