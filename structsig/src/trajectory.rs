//! Trajectory points, aggregation policies and the caller-owned trajectory log.

use serde::{Deserialize, Serialize};

use crate::errors::StructSigError;
use crate::residual::Verdict;

/// A domain point paired with the externally supplied reference value.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryPoint {
    pub x: f64,
    pub target: f64,
}

impl TrajectoryPoint {
    pub const fn new(x: f64, target: f64) -> Self {
        Self { x, target }
    }
}

/// Result of checking one point.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointCheck {
    pub x: f64,
    pub phi: f64,
    pub delta: f64,
    pub verdict: Verdict,
}

/// How per-point verdicts combine into a trajectory verdict.
///
/// An empty trajectory is [`Verdict::Invalid`] under every policy.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregatePolicy {
    /// Every point must be valid.
    #[default]
    AllValid,
    /// Strictly more than half of the points must be valid.
    Majority,
    /// The mean residual must be strictly below the tolerance.
    MeanResidual,
}

impl AggregatePolicy {
    pub fn aggregate(&self, checks: &[PointCheck], epsilon: f64) -> Verdict {
        if checks.is_empty() {
            return Verdict::Invalid;
        }
        let passed = match self {
            AggregatePolicy::AllValid => checks.iter().all(|c| c.verdict.is_valid()),
            AggregatePolicy::Majority => 2 * valid_count(checks) > checks.len(),
            AggregatePolicy::MeanResidual => mean_residual(checks) < epsilon,
        };
        Verdict::from(passed)
    }
}

/// Per-point checks plus the aggregate verdict of one trajectory.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryReport {
    pub checks: Vec<PointCheck>,
    pub verdict: Verdict,
}

impl TrajectoryReport {
    pub fn valid_count(&self) -> usize {
        valid_count(&self.checks)
    }

    pub fn mean_residual(&self) -> Option<f64> {
        (!self.checks.is_empty()).then(|| mean_residual(&self.checks))
    }

    pub fn max_residual(&self) -> Option<f64> {
        self.checks.iter().map(|c| c.delta).reduce(f64::max)
    }
}

/// One `(x, δ, valid)` record.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub x: f64,
    pub delta: f64,
    pub valid: bool,
}

impl From<&PointCheck> for LogEntry {
    fn from(check: &PointCheck) -> Self {
        Self {
            x: check.x,
            delta: check.delta,
            valid: check.verdict.is_valid(),
        }
    }
}

/// Append-only, ordered record of checked points.
///
/// The log is owned by the caller and handed to
/// [`Verifier::check_trajectory`](crate::Verifier::check_trajectory); it is
/// the hand-off point for plotting or any other later inspection.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryLog {
    entries: Vec<LogEntry>,
}

impl TrajectoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, check: &PointCheck) {
        self.entries.push(LogEntry::from(check));
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The log as plain numeric triples, in insertion order.
    pub fn triples(&self) -> Vec<(f64, f64, bool)> {
        self.entries.iter().map(|e| (e.x, e.delta, e.valid)).collect()
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, StructSigError> {
        bincode::serialize(self).map_err(|e| StructSigError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, StructSigError> {
        bincode::deserialize(bytes).map_err(|e| StructSigError::Serialization(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, StructSigError> {
        serde_json::to_string(&self.entries)
            .map_err(|e| StructSigError::Serialization(e.to_string()))
    }
}

impl<'a> Extend<&'a PointCheck> for TrajectoryLog {
    fn extend<I: IntoIterator<Item = &'a PointCheck>>(&mut self, iter: I) {
        self.entries.extend(iter.into_iter().map(LogEntry::from));
    }
}

fn valid_count(checks: &[PointCheck]) -> usize {
    checks.iter().filter(|c| c.verdict.is_valid()).count()
}

fn mean_residual(checks: &[PointCheck]) -> f64 {
    checks.iter().map(|c| c.delta).sum::<f64>() / checks.len() as f64
}
