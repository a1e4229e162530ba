//! Verifier and signature configuration.

use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use structure::Variant;

use crate::constants::{DEFAULT_ALPHA, DEFAULT_CHALLENGE_POINTS, DEFAULT_DOMAIN, DEFAULT_EPSILON};
use crate::errors::StructSigError;
use crate::residual::validate_tolerance;
use crate::trajectory::AggregatePolicy;

/// Settings of a trajectory verification session.
///
/// Missing fields fall back to [`VerifierConfig::default`]:
///
/// ```
/// use structsig::{AggregatePolicy, VerifierConfig};
///
/// let config = VerifierConfig::from_json(r#"{ "epsilon": 0.05, "policy": "majority" }"#)
///     .expect("valid config");
/// assert_eq!(config.epsilon, 0.05);
/// assert_eq!(config.policy, AggregatePolicy::Majority);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    pub epsilon: f64,
    pub variant: Variant,
    pub policy: AggregatePolicy,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            variant: Variant::Fixed,
            policy: AggregatePolicy::AllValid,
        }
    }
}

impl VerifierConfig {
    pub fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_policy(mut self, policy: AggregatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> Result<(), StructSigError> {
        validate_tolerance(self.epsilon)?;
        self.variant.validate()?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, StructSigError> {
        let config: Self = parse_json(json)?;
        config.validate()?;
        Ok(config)
    }
}

/// Settings of the message signature scheme.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    /// Size of the message-point domain.
    pub domain: u64,
    /// Tolerance as a multiple of the spread of φ over the challenge points.
    pub alpha: f64,
    pub challenge_points: Vec<u64>,
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            domain: DEFAULT_DOMAIN,
            alpha: DEFAULT_ALPHA,
            challenge_points: DEFAULT_CHALLENGE_POINTS.to_vec(),
        }
    }
}

impl SignatureConfig {
    pub fn with_alpha(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn validate(&self) -> Result<(), StructSigError> {
        if self.domain == 0 {
            return Err(StructSigError::InvalidRange { range: 0 });
        }
        if !(self.alpha.is_finite() && self.alpha >= 0.0) {
            return Err(StructSigError::InvalidConfig(format!(
                "alpha must be finite and non-negative, got {}",
                self.alpha
            )));
        }
        if self.challenge_points.is_empty() {
            return Err(StructSigError::InvalidConfig(
                "at least one challenge point is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self, StructSigError> {
        let config: Self = parse_json(json)?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_json<T: DeserializeOwned>(json: &str) -> Result<T, StructSigError> {
    serde_json::from_str(json).map_err(|e| StructSigError::InvalidConfig(e.to_string()))
}
