//! Message signatures built on the structure function.

use rand::Rng;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use structure::{StructureFunction, Variant};
use subtle::ConstantTimeEq;
use tracing::{debug, instrument};

use crate::config::SignatureConfig;
use crate::constants::{DIGEST_SIZE, SIGNATURE_DOMAIN, STRUCTURE_LABEL};
use crate::errors::StructSigError;
use crate::keys::{SecretKey, reduce_be};
use crate::residual::residual;

/// A structure signature on a message.
///
/// The message is hashed to a point `x_m` in `[0, domain)`, φ is evaluated
/// there, and `delta` records how far `φ(x_m)` lies from the reference value
/// `τ` fixed by the challenge points. The digest binds the three values.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    /// The message point `x_m`.
    pub point: u64,
    /// `φ(x_m)`.
    pub phi: f64,
    /// `|φ(x_m) − τ|`.
    pub delta: f64,
    /// `SHA-256("structsig-v1" || x_m || φ(x_m) || δ)`, all big-endian.
    pub digest: [u8; DIGEST_SIZE],
}

impl Signature {
    pub fn digest_hex(&self) -> String {
        hex::encode(self.digest)
    }
}

/// Reference value and tolerance derived from φ at the challenge points.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Challenge {
    /// Median of φ over the challenge points.
    pub tau: f64,
    /// Root-mean-square deviation of those values from `tau`.
    pub sigma: f64,
    /// `alpha · sigma`.
    pub epsilon: f64,
}

/// Maps a message to `SHA-256(message) mod domain`, reading the digest as a
/// 256-bit big-endian integer.
pub fn message_point(message: &[u8], domain: u64) -> Result<u64, StructSigError> {
    if domain == 0 {
        return Err(StructSigError::InvalidRange { range: domain });
    }
    Ok(reduce_be(&Sha256::digest(message), domain))
}

pub fn challenge<F: StructureFunction + ?Sized>(
    function: &F,
    config: &SignatureConfig,
) -> Result<Challenge, StructSigError> {
    config.validate()?;
    let mut values = config
        .challenge_points
        .iter()
        .map(|&x| function.evaluate(x as f64, Variant::Fixed))
        .collect::<Result<Vec<_>, _>>()?;
    values.sort_by(f64::total_cmp);

    let tau = values[values.len() / 2];
    let variance = values.iter().map(|v| (v - tau).powi(2)).sum::<f64>() / values.len() as f64;
    let sigma = variance.sqrt();
    Ok(Challenge {
        tau,
        sigma,
        epsilon: config.alpha * sigma,
    })
}

/// Signs `message` under the structure function.
///
/// Signing always succeeds for valid inputs; whether the resulting signature
/// verifies depends on `delta` falling below the challenge tolerance.
#[instrument(level = "debug", skip(function, message, config), fields(message_len = message.len()))]
pub fn sign<F: StructureFunction + ?Sized>(
    function: &F,
    message: &[u8],
    config: &SignatureConfig,
) -> Result<Signature, StructSigError> {
    let (signature, challenge) = sign_with_challenge(function, message, config)?;
    debug!(
        point = signature.point,
        delta = signature.delta,
        epsilon = challenge.epsilon,
        "signed message"
    );
    Ok(signature)
}

/// Recomputes the signature from `message` and accepts it iff the digest
/// matches and `delta` is strictly below the challenge tolerance.
#[instrument(level = "debug", skip_all, fields(message_len = message.len()))]
pub fn verify_signature<F: StructureFunction + ?Sized>(
    function: &F,
    message: &[u8],
    signature: &Signature,
    config: &SignatureConfig,
) -> Result<bool, StructSigError> {
    let (expected, challenge) = sign_with_challenge(function, message, config)?;
    let digest_ok: bool = expected.digest[..].ct_eq(&signature.digest[..]).into();
    let within_tolerance = expected.delta < challenge.epsilon;
    debug!(
        digest_ok,
        within_tolerance,
        delta = expected.delta,
        epsilon = challenge.epsilon,
        "verified signature"
    );
    Ok(digest_ok && within_tolerance)
}

/// Samples `trials` random keys and returns the one whose signature on
/// `message` has the smallest `delta`.
///
/// # Errors
///
/// Returns [`StructSigError::InvalidRange`] if `trials` is zero.
#[instrument(level = "debug", skip(rng, message, config), fields(message_len = message.len()))]
pub fn search_key<R: Rng + ?Sized>(
    rng: &mut R,
    message: &[u8],
    trials: usize,
    config: &SignatureConfig,
) -> Result<(SecretKey, Signature), StructSigError> {
    let mut best: Option<(SecretKey, Signature)> = None;
    for _ in 0..trials {
        let key = SecretKey::random(rng);
        let signature = key.sign(message, config)?;
        if best.as_ref().is_none_or(|(_, b)| signature.delta < b.delta) {
            best = Some((key, signature));
        }
    }
    let best = best.ok_or(StructSigError::InvalidRange { range: 0 })?;
    debug!(delta = best.1.delta, "selected key");
    Ok(best)
}

impl SecretKey {
    /// Signs `message` with the three-harmonic form derived from this key.
    pub fn sign(&self, message: &[u8], config: &SignatureConfig) -> Result<Signature, StructSigError> {
        sign(&self.parameters(STRUCTURE_LABEL)?, message, config)
    }

    pub fn verify(
        &self,
        message: &[u8],
        signature: &Signature,
        config: &SignatureConfig,
    ) -> Result<bool, StructSigError> {
        verify_signature(&self.parameters(STRUCTURE_LABEL)?, message, signature, config)
    }
}

fn sign_with_challenge<F: StructureFunction + ?Sized>(
    function: &F,
    message: &[u8],
    config: &SignatureConfig,
) -> Result<(Signature, Challenge), StructSigError> {
    let challenge = challenge(function, config)?;
    let point = message_point(message, config.domain)?;
    let phi = function.evaluate(point as f64, Variant::Fixed)?;
    let delta = residual(phi, challenge.tau);
    let signature = Signature {
        point,
        phi,
        delta,
        digest: signature_digest(point, phi, delta),
    };
    Ok((signature, challenge))
}

fn signature_digest(point: u64, phi: f64, delta: f64) -> [u8; DIGEST_SIZE] {
    let mut hasher = Sha256::new();
    hasher.update(SIGNATURE_DOMAIN);
    hasher.update(point.to_be_bytes());
    hasher.update(phi.to_bits().to_be_bytes());
    hasher.update(delta.to_bits().to_be_bytes());
    let mut out = [0u8; DIGEST_SIZE];
    out.copy_from_slice(&hasher.finalize());
    out
}
