//! Error types for the crate boundaries.
//!
//! The per-sample path is infallible. Errors only surface where untrusted
//! bytes or text enter the crate: transport payload decoding and
//! configuration loading.

use thiserror::Error;

/// Transport payload could not be decoded into a sample.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WireError {
    #[error("invalid payload length: expected {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("output buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Configuration was rejected.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f32 },

    #[error("{field} = {value} disagrees with {reference} = {expected}")]
    Mismatch {
        field: &'static str,
        value: f32,
        reference: &'static str,
        expected: f32,
    },

    #[error("failed to parse config: {0}")]
    Parse(String),
}
