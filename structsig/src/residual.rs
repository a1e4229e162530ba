//! Residuals and the per-point tolerance check.

use std::fmt;

use serde::{Deserialize, Serialize};
use structure::DomainError;

use crate::errors::StructSigError;

/// Outcome of comparing a residual against the tolerance.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Verdict {
    Valid,
    Invalid,
}

impl Verdict {
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }
}

impl From<bool> for Verdict {
    #[inline]
    fn from(valid: bool) -> Self {
        if valid {
            Verdict::Valid
        } else {
            Verdict::Invalid
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Valid => write!(f, "VALID"),
            Verdict::Invalid => write!(f, "INVALID"),
        }
    }
}

/// `δ = |φ(x) − target(x)|`.
#[inline]
pub fn residual(phi_x: f64, target_x: f64) -> f64 {
    (phi_x - target_x).abs()
}

/// Checks a single value against its target.
///
/// The comparison is strict: a residual exactly equal to `epsilon` is
/// [`Verdict::Invalid`].
///
/// # Errors
///
/// - [`StructSigError::InvalidTolerance`] if `epsilon` is negative or not finite
/// - [`StructSigError::Domain`] if `phi_x` or `target_x` is not finite
///
/// # Example
///
/// ```
/// use structsig::{verify, Verdict};
///
/// assert_eq!(verify(0.5, 0.505, 0.01).unwrap(), Verdict::Valid);
/// assert_eq!(verify(0.5, 0.52, 0.01).unwrap(), Verdict::Invalid);
/// ```
pub fn verify(phi_x: f64, target_x: f64, epsilon: f64) -> Result<Verdict, StructSigError> {
    validate_tolerance(epsilon)?;
    ensure_finite(phi_x)?;
    ensure_finite(target_x)?;
    Ok(Verdict::from(residual(phi_x, target_x) < epsilon))
}

pub(crate) fn validate_tolerance(epsilon: f64) -> Result<(), StructSigError> {
    if epsilon.is_finite() && epsilon >= 0.0 {
        Ok(())
    } else {
        Err(StructSigError::InvalidTolerance { epsilon })
    }
}

pub(crate) fn ensure_finite(value: f64) -> Result<(), StructSigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(DomainError::NonFinite { value }.into())
    }
}
