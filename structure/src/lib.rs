//! Structure functions over the real line.
//!
//! This crate provides the harmonic coefficient type, the two closed forms of
//! the structure function φ, and the deterministic noise source used by the
//! randomized variant. Everything here is pure: the same coefficients and the
//! same input always produce the same output, which is what lets a verifier
//! recompute φ from derived parameters alone.

mod error;
mod function;
mod harmonic;
mod noise;

pub use error::DomainError;
pub use function::{evaluate, LogCosine, Sine, StructureFunction, Variant};
pub use harmonic::Harmonic;
pub use noise::SeededNoise;
