//! Verification sessions over a fixed structure function.

use structure::{LogCosine, StructureFunction};
use tracing::{debug, instrument, warn};

use crate::config::VerifierConfig;
use crate::errors::StructSigError;
use crate::residual::{Verdict, ensure_finite, residual};
use crate::trajectory::{PointCheck, TrajectoryLog, TrajectoryPoint, TrajectoryReport};

/// A verification session.
///
/// Holds the structure function, whose parameters were derived once from the
/// key, and the session configuration. Points are checked independently; the
/// session itself is never mutated.
#[derive(Clone, Debug)]
pub struct Verifier<F = LogCosine> {
    function: F,
    config: VerifierConfig,
}

impl<F: StructureFunction> Verifier<F> {
    /// # Errors
    ///
    /// Fails if the tolerance or the noise scale in `config` is invalid.
    pub fn new(function: F, config: VerifierConfig) -> Result<Self, StructSigError> {
        config.validate()?;
        Ok(Self { function, config })
    }

    pub fn function(&self) -> &F {
        &self.function
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    /// Evaluates φ at the point and compares it with the target.
    ///
    /// # Errors
    ///
    /// Returns [`StructSigError::Domain`] if `x` is outside the domain of φ or
    /// the target is not finite.
    pub fn check_point(&self, point: &TrajectoryPoint) -> Result<PointCheck, StructSigError> {
        ensure_finite(point.target)?;
        let phi = self.function.evaluate(point.x, self.config.variant)?;
        let delta = residual(phi, point.target);
        let verdict = Verdict::from(delta < self.config.epsilon);
        debug!(x = point.x, phi, delta, %verdict, "checked point");
        Ok(PointCheck {
            x: point.x,
            phi,
            delta,
            verdict,
        })
    }

    /// Checks every point in order and aggregates the verdicts with the
    /// configured policy.
    ///
    /// If any point is rejected the whole call fails and `log` is left
    /// untouched. Otherwise one entry per point is appended to `log`.
    #[instrument(
        level = "debug",
        skip(self, points, log),
        fields(points = points.len(), policy = ?self.config.policy)
    )]
    pub fn check_trajectory(
        &self,
        points: &[TrajectoryPoint],
        log: Option<&mut TrajectoryLog>,
    ) -> Result<TrajectoryReport, StructSigError> {
        let checks = points
            .iter()
            .map(|point| self.check_point(point))
            .collect::<Result<Vec<_>, _>>()?;

        let verdict = self.config.policy.aggregate(&checks, self.config.epsilon);
        if !verdict.is_valid() {
            warn!(
                points = checks.len(),
                epsilon = self.config.epsilon,
                "trajectory failed its aggregate policy"
            );
        }

        if let Some(log) = log {
            log.extend(&checks);
        }
        Ok(TrajectoryReport { checks, verdict })
    }
}
