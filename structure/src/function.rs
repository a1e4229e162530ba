use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::harmonic::Harmonic;
use crate::noise::SeededNoise;

/// Selects between the closed form and the noise-perturbed form of φ.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Variant {
    /// φ(x) is the closed form only.
    #[default]
    Fixed,
    /// φ(x) is the closed form plus noise uniform in `[-scale, scale)`,
    /// seeded from the parameters and `x`.
    Randomized { scale: f64 },
}

impl Variant {
    pub fn validate(&self) -> Result<(), DomainError> {
        match *self {
            Variant::Fixed => Ok(()),
            Variant::Randomized { scale } if scale.is_finite() && scale >= 0.0 => Ok(()),
            Variant::Randomized { scale } => Err(DomainError::NoiseScale { scale }),
        }
    }
}

/// A real-valued function of one real input, fixed by secret-derived parameters.
pub trait StructureFunction {
    /// Closed-form value at `x`. Only meaningful when `contains(x)` holds.
    fn phi(&self, x: f64) -> f64;

    /// Canonical encoding of the parameters. Seeds the randomized variant.
    fn parameter_bytes(&self) -> Vec<u8>;

    #[inline]
    fn contains(&self, x: f64) -> bool {
        x.is_finite()
    }

    /// Evaluates φ at `x` under the given variant.
    ///
    /// Inputs are checked before anything is computed: a NaN or infinite
    /// `x`, a point outside the domain, or an invalid noise scale are all
    /// rejected with a [`DomainError`].
    fn evaluate(&self, x: f64, variant: Variant) -> Result<f64, DomainError> {
        if !x.is_finite() {
            return Err(DomainError::NonFinite { value: x });
        }
        if !self.contains(x) {
            return Err(DomainError::OutOfDomain { x });
        }
        variant.validate()?;

        let value = self.phi(x);
        match variant {
            Variant::Fixed => Ok(value),
            Variant::Randomized { scale } => {
                let mut noise = SeededNoise::new(&self.parameter_bytes(), x);
                Ok(value + noise.sample(scale))
            }
        }
    }
}

/// Free-function form of [`StructureFunction::evaluate`].
pub fn evaluate<F: StructureFunction + ?Sized>(
    function: &F,
    x: f64,
    variant: Variant,
) -> Result<f64, DomainError> {
    function.evaluate(x, variant)
}

/// `φ(x) = A·sin(f·x + p)`, defined on every finite `x`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Sine {
    harmonic: Harmonic,
}

impl Sine {
    pub const fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            harmonic: Harmonic::new(amplitude, frequency, phase),
        }
    }

    pub fn harmonic(&self) -> &Harmonic {
        &self.harmonic
    }
}

impl StructureFunction for Sine {
    #[inline]
    fn phi(&self, x: f64) -> f64 {
        self.harmonic.sin_at(x)
    }

    fn parameter_bytes(&self) -> Vec<u8> {
        self.harmonic.to_bytes().to_vec()
    }
}

/// `φ(x) = Σ A_i·cos(t_i·ln(x + 1) + θ_i)` over three harmonics.
///
/// The logarithm restricts the domain to finite `x > -1`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LogCosine {
    components: [Harmonic; 3],
}

impl LogCosine {
    pub const fn new(components: [Harmonic; 3]) -> Self {
        Self { components }
    }

    pub fn components(&self) -> &[Harmonic; 3] {
        &self.components
    }
}

impl StructureFunction for LogCosine {
    #[inline]
    fn phi(&self, x: f64) -> f64 {
        let t = x.ln_1p();
        self.components.iter().map(|h| h.cos_at(t)).sum()
    }

    fn parameter_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(72);
        for h in &self.components {
            out.extend_from_slice(&h.to_bytes());
        }
        out
    }

    #[inline]
    fn contains(&self, x: f64) -> bool {
        x.is_finite() && x > -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample_log_cosine() -> LogCosine {
        LogCosine::new([
            Harmonic::new(1.5, 3.25, 0.5),
            Harmonic::new(2.0, 7.0, 1.25),
            Harmonic::new(1.0, 12.5, 4.0),
        ])
    }

    #[test]
    fn sine_vanishes_at_origin() {
        let f = Sine::new(1.0, 417.0, 0.0);
        assert_eq!(f.evaluate(0.0, Variant::Fixed).unwrap(), 0.0);
    }

    #[test]
    fn log_cosine_at_zero_is_sum_of_phase_cosines() {
        let f = sample_log_cosine();
        let expected: f64 = f
            .components()
            .iter()
            .map(|h| h.amplitude * h.phase.cos())
            .sum();
        assert_eq!(f.evaluate(0.0, Variant::Fixed).unwrap(), expected);
    }

    #[test]
    fn rejects_non_finite_input() {
        let f = Sine::new(1.0, 1.0, 0.0);
        assert!(matches!(
            f.evaluate(f64::NAN, Variant::Fixed),
            Err(DomainError::NonFinite { .. })
        ));
        assert!(matches!(
            f.evaluate(f64::INFINITY, Variant::Fixed),
            Err(DomainError::NonFinite { .. })
        ));
    }

    #[test]
    fn log_cosine_rejects_points_left_of_minus_one() {
        let f = sample_log_cosine();
        assert_eq!(
            f.evaluate(-1.0, Variant::Fixed),
            Err(DomainError::OutOfDomain { x: -1.0 })
        );
        assert!(f.evaluate(-0.5, Variant::Fixed).is_ok());
    }

    #[test]
    fn rejects_bad_noise_scale() {
        let f = Sine::new(1.0, 1.0, 0.0);
        assert!(matches!(
            f.evaluate(1.0, Variant::Randomized { scale: -0.1 }),
            Err(DomainError::NoiseScale { .. })
        ));
        assert!(matches!(
            f.evaluate(1.0, Variant::Randomized { scale: f64::NAN }),
            Err(DomainError::NoiseScale { .. })
        ));
    }

    #[test]
    fn zero_scale_matches_fixed() {
        let f = sample_log_cosine();
        let fixed = f.evaluate(42.0, Variant::Fixed).unwrap();
        let noisy = f.evaluate(42.0, Variant::Randomized { scale: 0.0 }).unwrap();
        assert_eq!(fixed, noisy);
    }

    #[test]
    fn noise_depends_on_parameters() {
        let a = Sine::new(1.0, 2.0, 0.0);
        let b = Sine::new(1.0, 2.0, 0.5);
        let variant = Variant::Randomized { scale: 1.0 };
        let da = a.evaluate(3.0, variant).unwrap() - a.phi(3.0);
        let db = b.evaluate(3.0, variant).unwrap() - b.phi(3.0);
        assert_ne!(da, db);
    }

    #[test]
    fn signed_zeros_draw_the_same_noise() {
        let variant = Variant::Randomized { scale: 0.2 };
        let log_cosine = sample_log_cosine();
        assert_eq!(
            log_cosine.evaluate(0.0, variant).unwrap(),
            log_cosine.evaluate(-0.0, variant).unwrap()
        );
        let sine = Sine::new(1.0, 2.0, 0.5);
        assert_eq!(
            sine.evaluate(0.0, variant).unwrap(),
            sine.evaluate(-0.0, variant).unwrap()
        );
    }

    proptest! {
        #[test]
        fn fixed_variant_is_deterministic(x in -0.99f64..1.0e6) {
            let f = sample_log_cosine();
            prop_assert_eq!(
                evaluate(&f, x, Variant::Fixed).unwrap(),
                evaluate(&f, x, Variant::Fixed).unwrap()
            );
        }

        #[test]
        fn randomized_variant_is_reproducible_and_bounded(
            x in -1.0e3f64..1.0e3,
            scale in 0.0f64..10.0,
        ) {
            let f = Sine::new(2.0, 0.75, 1.0);
            let variant = Variant::Randomized { scale };
            let first = f.evaluate(x, variant).unwrap();
            let second = f.evaluate(x, variant).unwrap();
            prop_assert_eq!(first, second);
            prop_assert!((first - f.phi(x)).abs() <= scale + 1e-9);
        }
    }
}
