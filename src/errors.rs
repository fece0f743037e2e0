//! Error types for the crate.
//!
//! This module defines low-level backend errors returned by the concrete
//! group implementation as well as the high-level `Error` type used across
//! sharing, reconstruction and signing.
//!
//! # Examples
//!
//! ```rust
//! use tbls::Error;
//!
//! let err = Error::InsufficientShares { required: 3, provided: 2 };
//! assert_eq!(err.to_string(), "insufficient shares: required 3, provided 2");
//! ```

use thiserror::Error;

/// Errors bubbled up from backend implementations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("unsupported backend feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("serialization failure: {0}")]
    Serialization(&'static str),
    #[error("math error: {0}")]
    Math(&'static str),
}

/// High-level errors returned by the sharing and threshold signing API.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("backend error: {0}")]
    Backend(#[from] BackendError),
    #[error("malformed input: {0}")]
    MalformedInput(String),
    #[error("insufficient shares: required {required}, provided {provided}")]
    InsufficientShares { required: usize, provided: usize },
    #[error("conflicting shares for index {0}")]
    DuplicateIndex(u32),
    #[error("polynomial degree mismatch: expected {expected}, got {actual}")]
    DegreeMismatch { expected: usize, actual: usize },
    #[error("share {0} failed verification")]
    InvalidShare(u32),
    #[error("share index {index} out of range for {parties} parties")]
    IndexOutOfRange { index: u32, parties: usize },
    #[error("lagrange interpolation hit a zero denominator")]
    SingularInterpolation,
    #[error("randomness unavailable: {0}")]
    RandomnessUnavailable(#[from] rand_core::Error),
    #[error("signing failed: {0}")]
    Signing(String),
    #[error("signature verification failed")]
    InvalidSignature,
    #[error("signing session already closed")]
    SessionClosed,
}
