//! Constants used by parameter derivation and message signatures.

/// Size of an HMAC-SHA256 output in bytes.
pub const DIGEST_SIZE: usize = 32;

/// Size of the keys sampled by [`search_key`](crate::search_key).
pub const RANDOM_KEY_SIZE: usize = 16;

/// Label of the frequency parameter of the single-sine form.
pub const FREQUENCY_LABEL: &str = "freq";

/// Reduction range of the frequency parameter.
pub const FREQUENCY_RANGE: u64 = 1000;

/// Label of the phase parameter of the single-sine form.
pub const PHASE_LABEL: &str = "phase";

/// Context label of the three-harmonic parameter set used by verifier
/// sessions and message signatures.
pub const STRUCTURE_LABEL: &str = "structure";

/// Default tolerance for trajectory verification.
pub const DEFAULT_EPSILON: f64 = 0.2;

/// Default size of the message-point domain, 2^24.
pub const DEFAULT_DOMAIN: u64 = 1 << 24;

/// Default ratio between the message tolerance and the spread of φ over the
/// challenge points.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Default challenge points.
pub const DEFAULT_CHALLENGE_POINTS: [u64; 3] = [101, 211, 307];

/// Domain separator prepended to every signature digest.
pub(crate) const SIGNATURE_DOMAIN: &[u8] = b"structsig-v1";

/// Tag prepended to the HMAC input of the three-harmonic parameter set.
/// The leading `0xff` byte cannot occur in a UTF-8 label.
pub(crate) const PARAMETER_SET_DOMAIN: &[u8] = b"\xffstructure-set";
