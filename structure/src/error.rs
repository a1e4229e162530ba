//! Errors raised while evaluating a structure function.

/// Input rejected before any evaluation takes place.
#[derive(Debug, Copy, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// The input was NaN or infinite.
    #[error("non-finite input {value}")]
    NonFinite {
        /// The rejected value.
        value: f64,
    },

    /// The input is finite but lies outside the domain of the function form.
    #[error("point {x} is outside the function domain")]
    OutOfDomain {
        /// The rejected point.
        x: f64,
    },

    /// The randomized variant was configured with a negative or non-finite scale.
    #[error("noise scale {scale} must be finite and non-negative")]
    NoiseScale {
        /// The rejected scale.
        scale: f64,
    },
}
