//! Error types for structure signatures.

use structure::DomainError;

/// Errors that can occur while deriving parameters or verifying points.
///
/// Every variant is an input-validation failure raised before any
/// computation proceeds; no operation returns a partial result.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StructSigError {
    /// The key material was empty.
    #[error("key material must not be empty")]
    InvalidKey,

    /// A reduction range, domain size or trial count was zero.
    #[error("range must be positive, got {range}")]
    InvalidRange {
        /// The rejected range.
        range: u64,
    },

    /// A point or value fell outside the domain of the structure function.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The tolerance was negative or not finite.
    #[error("tolerance must be finite and non-negative, got {epsilon}")]
    InvalidTolerance {
        /// The rejected tolerance.
        epsilon: f64,
    },

    /// A configuration value was rejected.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Encoding or decoding a log or signature failed.
    #[error("serialization failed: {0}")]
    Serialization(String),
}
