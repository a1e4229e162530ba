use rand::distr::{Distribution, StandardUniform};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use sha2::{Digest, Sha256};

const NOISE_DOMAIN: &[u8] = b"structure-noise";

/// Pseudo-random perturbation keyed by function parameters and the evaluation point.
///
/// The ChaCha20 stream is seeded with
/// `SHA-256("structure-noise" || parameters || x.to_bits() as LE)`, so two
/// parties holding the same parameters draw the same noise at the same point
/// regardless of call order. `-0.0` is hashed as `0.0`, since both denote
/// the same point.
#[derive(Clone, Debug)]
pub struct SeededNoise {
    rng: ChaCha20Rng,
}

impl SeededNoise {
    pub fn new(parameters: &[u8], x: f64) -> Self {
        // Adding +0.0 maps -0.0 to +0.0 and leaves every other value unchanged.
        let x = x + 0.0;
        let mut hasher = Sha256::new();
        hasher.update(NOISE_DOMAIN);
        hasher.update(parameters);
        hasher.update(x.to_bits().to_le_bytes());
        let digest = hasher.finalize();
        let mut seed = [0u8; 32];
        seed.copy_from_slice(&digest);
        Self {
            rng: ChaCha20Rng::from_seed(seed),
        }
    }

    /// Draws a value uniform in `[-scale, scale)`.
    #[inline]
    pub fn sample(&mut self, scale: f64) -> f64 {
        let unit: f64 = StandardUniform.sample(&mut self.rng);
        (2.0 * unit - 1.0) * scale
    }
}
