//! Structure signatures over keyed structure functions.
//!
//! A structure signature checks observed behavior against a structure
//! function φ whose shape is fixed by a secret key:
//! - Parameters of φ are derived from the key with HMAC-SHA256
//! - φ is evaluated at each domain point, in a fixed or a derived-seed randomized variant
//! - The residual `δ = |φ(x) − target(x)|` is compared against a tolerance `ε`
//!
//! A point is valid iff `δ < ε`. A trajectory of points is checked point by
//! point and the verdicts are combined by an [`AggregatePolicy`]. Results can
//! be appended to a caller-owned [`TrajectoryLog`] for later inspection.
//!
//! # Example
//!
//! ```
//! use structsig::{SecretKey, StructureFunction, TrajectoryLog, TrajectoryPoint, VerifierConfig};
//!
//! let key = SecretKey::new(b"test-key".to_vec()).expect("non-empty key");
//! let verifier = key.verifier(VerifierConfig::new(0.01)).expect("valid config");
//!
//! // Targets taken straight from φ are always within tolerance.
//! let points: Vec<TrajectoryPoint> = (0..5)
//!     .map(|i| {
//!         let x = f64::from(i);
//!         TrajectoryPoint::new(x, verifier.function().phi(x))
//!     })
//!     .collect();
//!
//! let mut log = TrajectoryLog::new();
//! let report = verifier
//!     .check_trajectory(&points, Some(&mut log))
//!     .expect("points in domain");
//! assert!(report.verdict.is_valid());
//! assert_eq!(log.len(), 5);
//! ```
//!
//! # Message signatures
//!
//! [`sign`] and [`verify_signature`] hash a message to a domain point and
//! bind `φ` at that point to a digest. The tolerance is `α` times the spread
//! of φ over a fixed set of challenge points (see [`SignatureConfig`]).
//!
//! # Security Considerations
//!
//! - The key is symmetric: anyone who can verify can also sign
//! - The randomized variant is pseudo-random in the key, never true entropy
//! - No zero-knowledge property is provided

mod config;
mod constants;
mod errors;
mod keys;
mod residual;
mod signatures;
mod trajectory;
mod verifier;


pub use config::{SignatureConfig, VerifierConfig};
pub use constants::*;
pub use errors::StructSigError;
pub use keys::{SecretKey, derive_parameter, derive_parameters, derive_unit};
pub use residual::{Verdict, residual, verify};
pub use signatures::{
    Challenge, Signature, challenge, message_point, search_key, sign, verify_signature,
};
pub use structure::{DomainError, Harmonic, LogCosine, Sine, StructureFunction, Variant, evaluate};
pub use trajectory::{
    AggregatePolicy, LogEntry, PointCheck, TrajectoryLog, TrajectoryPoint, TrajectoryReport,
};
pub use verifier::Verifier;
