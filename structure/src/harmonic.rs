use serde::{Deserialize, Serialize};

/// A single sinusoidal term `amplitude * wave(frequency * t + phase)`.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub amplitude: f64,
    pub frequency: f64,
    pub phase: f64,
}

impl Harmonic {
    pub const fn new(amplitude: f64, frequency: f64, phase: f64) -> Self {
        Self {
            amplitude,
            frequency,
            phase,
        }
    }

    #[inline]
    pub fn sin_at(&self, t: f64) -> f64 {
        self.amplitude * (self.frequency * t + self.phase).sin()
    }

    #[inline]
    pub fn cos_at(&self, t: f64) -> f64 {
        self.amplitude * (self.frequency * t + self.phase).cos()
    }

    /// Big-endian bit patterns of amplitude, frequency and phase.
    pub fn to_bytes(&self) -> [u8; 24] {
        let mut out = [0u8; 24];
        out[..8].copy_from_slice(&self.amplitude.to_bits().to_be_bytes());
        out[8..16].copy_from_slice(&self.frequency.to_bits().to_be_bytes());
        out[16..].copy_from_slice(&self.phase.to_bits().to_be_bytes());
        out
    }
}
