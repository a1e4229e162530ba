//! Secret keys and HMAC-SHA256 parameter derivation.

use std::f64::consts::TAU;
use std::fmt;

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use structure::{Harmonic, LogCosine, Sine};
use tracing::instrument;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::config::VerifierConfig;
use crate::constants::{
    DIGEST_SIZE, FREQUENCY_LABEL, FREQUENCY_RANGE, PARAMETER_SET_DOMAIN, PHASE_LABEL,
    RANDOM_KEY_SIZE, STRUCTURE_LABEL,
};
use crate::errors::StructSigError;
use crate::verifier::Verifier;

type HmacSha256 = Hmac<Sha256>;

/// Secret key material from which the structure parameters are derived.
///
/// The key is only ever used as an HMAC-SHA256 key. It is zeroized on drop
/// and its `Debug` output never includes the bytes.
///
/// # Example
///
/// ```
/// use structsig::SecretKey;
///
/// let key = SecretKey::new(b"test-key".to_vec()).expect("non-empty key");
/// let freq = key.derive_parameter("freq", 1000).expect("positive range");
/// assert!(freq < 1000);
/// ```
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SecretKey {
    bytes: Vec<u8>,
}

impl SecretKey {
    /// Wraps caller-supplied key material.
    ///
    /// # Errors
    ///
    /// Returns [`StructSigError::InvalidKey`] if `bytes` is empty.
    pub fn new(bytes: impl Into<Vec<u8>>) -> Result<Self, StructSigError> {
        let bytes = bytes.into();
        if bytes.is_empty() {
            return Err(StructSigError::InvalidKey);
        }
        Ok(Self { bytes })
    }

    /// Samples a fresh 16-byte key from `rng`.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = vec![0u8; RANDOM_KEY_SIZE];
        rng.fill(&mut bytes[..]);
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn derive_parameter(&self, label: &str, range: u64) -> Result<u64, StructSigError> {
        derive_parameter(&self.bytes, label, range)
    }

    pub fn derive_unit(&self, label: &str) -> Result<f64, StructSigError> {
        derive_unit(&self.bytes, label)
    }

    /// Three-harmonic parameter set for the given context label.
    pub fn parameters(&self, label: &str) -> Result<LogCosine, StructSigError> {
        derive_parameters(&self.bytes, label)
    }

    /// Single-sine form: amplitude 1, frequency `HMAC(key, "freq") mod 1000`,
    /// phase `2π · unit(HMAC(key, "phase"))`.
    pub fn sine(&self) -> Result<Sine, StructSigError> {
        let frequency = self.derive_parameter(FREQUENCY_LABEL, FREQUENCY_RANGE)?;
        let phase = TAU * self.derive_unit(PHASE_LABEL)?;
        Ok(Sine::new(1.0, frequency as f64, phase))
    }

    /// Opens a verification session over the three-harmonic form.
    ///
    /// Parameters are derived once here and cached in the returned verifier.
    pub fn verifier(&self, config: VerifierConfig) -> Result<Verifier<LogCosine>, StructSigError> {
        Verifier::new(self.parameters(STRUCTURE_LABEL)?, config)
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SecretKey")
            .field("len", &self.bytes.len())
            .finish_non_exhaustive()
    }
}

/// Derives an integer parameter in `[0, range)`.
///
/// The whole of `HMAC-SHA256(key, label)` is read as a 256-bit big-endian
/// integer and reduced modulo `range`, leaving a bias below 2^-192.
///
/// # Errors
///
/// - [`StructSigError::InvalidKey`] if `key` is empty
/// - [`StructSigError::InvalidRange`] if `range` is zero
#[instrument(level = "debug", skip(key), fields(key_len = key.len()))]
pub fn derive_parameter(key: &[u8], label: &str, range: u64) -> Result<u64, StructSigError> {
    if key.is_empty() {
        return Err(StructSigError::InvalidKey);
    }
    if range == 0 {
        return Err(StructSigError::InvalidRange { range });
    }
    let digest = hmac_digest(key, &[label.as_bytes()])?;
    Ok(reduce_be(&digest, range))
}

/// Derives a real parameter uniform in `[0, 1)` from the top 53 bits of the
/// first eight bytes of `HMAC-SHA256(key, label)`.
///
/// # Errors
///
/// Returns [`StructSigError::InvalidKey`] if `key` is empty.
#[instrument(level = "debug", skip(key), fields(key_len = key.len()))]
pub fn derive_unit(key: &[u8], label: &str) -> Result<f64, StructSigError> {
    let digest = hmac_digest(key, &[label.as_bytes()])?;
    Ok((digest_prefix(&digest) >> 11) as f64 / (1u64 << 53) as f64)
}

/// Derives the three-harmonic structure function for a context label.
///
/// The key stream is `HMAC(key, tag || len(label) || label || i)` for
/// `i in 0..3`, where `tag` starts with `0xff` and `len` is a big-endian
/// `u32`. No UTF-8 label can reproduce that input, so the stream never
/// overlaps [`derive_parameter`] or [`derive_unit`]. Its first nine
/// big-endian `u32` words `w0..w8` are normalized to `u = w / 2^32` and
/// mapped to
///
/// - amplitudes `A_i = 1 + 2·u_i`
/// - frequencies `t_i = 0.5 + 20·u_{i+3}`
/// - phases `θ_i = 2π·u_{i+6}`
///
/// # Errors
///
/// - [`StructSigError::InvalidKey`] if `key` is empty
/// - [`StructSigError::InvalidConfig`] if `label` is 2^32 bytes or longer
#[instrument(level = "debug", skip(key), fields(key_len = key.len()))]
pub fn derive_parameters(key: &[u8], label: &str) -> Result<LogCosine, StructSigError> {
    let label_len = u32::try_from(label.len())
        .map_err(|_| StructSigError::InvalidConfig("label longer than 2^32 bytes".to_string()))?
        .to_be_bytes();
    let mut stream = Vec::with_capacity(3 * DIGEST_SIZE);
    for counter in 0u8..3 {
        let parts: [&[u8]; 4] = [PARAMETER_SET_DOMAIN, &label_len, label.as_bytes(), &[counter]];
        stream.extend_from_slice(&hmac_digest(key, &parts)?);
    }

    let mut units = [0f64; 9];
    for (unit, word) in units.iter_mut().zip(stream.chunks_exact(4)) {
        let word = u32::from_be_bytes([word[0], word[1], word[2], word[3]]);
        *unit = f64::from(word) / 4_294_967_296.0;
    }

    let components = std::array::from_fn(|i| {
        Harmonic::new(
            1.0 + 2.0 * units[i],
            0.5 + 20.0 * units[i + 3],
            TAU * units[i + 6],
        )
    });
    Ok(LogCosine::new(components))
}

fn hmac_digest(key: &[u8], parts: &[&[u8]]) -> Result<[u8; DIGEST_SIZE], StructSigError> {
    if key.is_empty() {
        return Err(StructSigError::InvalidKey);
    }
    let mut mac = HmacSha256::new_from_slice(key).map_err(|_| StructSigError::InvalidKey)?;
    for part in parts {
        mac.update(part);
    }
    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(&mac.finalize().into_bytes());
    Ok(out)
}

#[inline]
fn digest_prefix(digest: &[u8; DIGEST_SIZE]) -> u64 {
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    u64::from_be_bytes(prefix)
}

/// Reduces `bytes`, read as one big-endian integer, modulo `modulus`.
pub(crate) fn reduce_be(bytes: &[u8], modulus: u64) -> u64 {
    let modulus = u128::from(modulus);
    bytes
        .iter()
        .fold(0u128, |acc, &byte| (acc * 256 + u128::from(byte)) % modulus) as u64
}
