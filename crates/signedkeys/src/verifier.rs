//! Signature checks.
//!
//! A [`Verifier`] decides whether the signature part of a key matches its
//! random part. Verifiers answer yes or no; they never report why.

use ed25519_dalek::Verifier as _;
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use subtle::ConstantTimeEq;
use zeroize::Zeroizing;

use crate::mac::{HashAlgorithm, truncated};

/// Checks a signature against the data it claims to sign.
///
/// Closures of the form `Fn(&[u8], &[u8]) -> bool` implement this trait.
pub trait Verifier: Send + Sync {
    /// Return `true` if `signature` is valid for `data`.
    fn verify(&self, data: &[u8], signature: &[u8]) -> bool;
}

impl<F> Verifier for F
where
    F: Fn(&[u8], &[u8]) -> bool + Send + Sync,
{
    fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        self(data, signature)
    }
}

/// Accepts every key, whatever its content.
///
/// Only meaningful for unsigned keys. Pairing it with a real signer turns
/// verification off.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopVerifier;

impl Verifier for NoopVerifier {
    fn verify(&self, _data: &[u8], _signature: &[u8]) -> bool {
        true
    }
}

/// HMAC verifier, the counterpart of [`HmacSigner`](crate::HmacSigner).
///
/// The tag is recomputed, truncated with the same rule as the signer, and
/// compared in constant time. A signature of any other length fails.
#[derive(Clone)]
pub struct HmacVerifier {
    hash: HashAlgorithm,
    secret: Zeroizing<Vec<u8>>,
    prefix_len: Option<usize>,
}

impl HmacVerifier {
    /// Create a verifier using `hash` keyed with `secret`.
    #[must_use]
    pub fn new(hash: HashAlgorithm, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            hash,
            secret: Zeroizing::new(secret.into()),
            prefix_len: None,
        }
    }

    /// Expect tags truncated to `prefix_len` bytes.
    #[must_use]
    pub fn truncate(mut self, prefix_len: usize) -> Self {
        self.prefix_len = Some(prefix_len);
        self
    }
}

impl Verifier for HmacVerifier {
    fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        let Ok(tag) = self.hash.mac(&self.secret, data) else {
            return false;
        };
        let expected = truncated(tag, self.prefix_len);
        bool::from(expected.as_slice().ct_eq(signature))
    }
}

impl std::fmt::Debug for HmacVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacVerifier")
            .field("hash", &self.hash)
            .field("prefix_len", &self.prefix_len)
            .finish_non_exhaustive()
    }
}

/// Ed25519 verifier holding only the public key.
#[derive(Clone)]
pub struct Ed25519Verifier {
    verifying_key: VerifyingKey,
}

impl Ed25519Verifier {
    pub(crate) fn new(verifying_key: VerifyingKey) -> Self {
        Self { verifying_key }
    }
}

impl Verifier for Ed25519Verifier {
    fn verify(&self, data: &[u8], signature: &[u8]) -> bool {
        let Ok(sig) = DalekSignature::from_slice(signature) else {
            return false;
        };
        self.verifying_key.verify(data, &sig).is_ok()
    }
}

impl std::fmt::Debug for Ed25519Verifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Ed25519Verifier({})",
            hex::encode(&self.verifying_key.as_bytes()[..8])
        )
    }
}
