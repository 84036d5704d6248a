//! Signature producers.
//!
//! A [`Signer`] turns the random part of a key into the signature that is
//! appended to it. Three implementations ship with the crate:
//! - [`NoopSigner`]: empty signature (unsigned keys)
//! - [`HmacSigner`]: keyed hash with an optional truncated tag
//! - [`Ed25519Signer`]: asymmetric signature over the raw bytes

use ed25519_dalek::Signer as _;
use ed25519_dalek::SigningKey;
use zeroize::Zeroizing;

use crate::error::KeyResult;
use crate::mac::{HashAlgorithm, truncated};

/// Computes a signature over the random part of a key.
///
/// Closures of the form `Fn(&[u8]) -> KeyResult<Vec<u8>>` implement this
/// trait.
pub trait Signer: Send + Sync {
    /// Sign `data`.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Signing`](crate::KeyError::Signing) if no
    /// signature could be produced.
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>>;
}

impl<F> Signer for F
where
    F: Fn(&[u8]) -> KeyResult<Vec<u8>> + Send + Sync,
{
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
        self(data)
    }
}

/// Produces an empty signature.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSigner;

impl Signer for NoopSigner {
    fn sign(&self, _data: &[u8]) -> KeyResult<Vec<u8>> {
        Ok(Vec::new())
    }
}

/// HMAC signer.
///
/// With [`truncate`](Self::truncate) the tag is cut to its first bytes,
/// which shortens keys at the cost of signature strength. The matching
/// [`HmacVerifier`](crate::HmacVerifier) must use the same prefix length.
#[derive(Clone)]
pub struct HmacSigner {
    hash: HashAlgorithm,
    secret: Zeroizing<Vec<u8>>,
    prefix_len: Option<usize>,
}

impl HmacSigner {
    /// Create a signer using `hash` keyed with `secret`.
    #[must_use]
    pub fn new(hash: HashAlgorithm, secret: impl Into<Vec<u8>>) -> Self {
        Self {
            hash,
            secret: Zeroizing::new(secret.into()),
            prefix_len: None,
        }
    }

    /// Keep only the first `prefix_len` bytes of each tag.
    ///
    /// Zero, or a value not shorter than the tag, leaves tags untouched.
    #[must_use]
    pub fn truncate(mut self, prefix_len: usize) -> Self {
        self.prefix_len = Some(prefix_len);
        self
    }

    /// Length of the signatures this signer produces.
    #[must_use]
    pub fn signature_len(&self) -> usize {
        let full = self.hash.output_len();
        match self.prefix_len {
            Some(len) if len > 0 && len < full => len,
            _ => full,
        }
    }
}

impl Signer for HmacSigner {
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
        let tag = self.hash.mac(&self.secret, data)?;
        Ok(truncated(tag, self.prefix_len))
    }
}

impl std::fmt::Debug for HmacSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSigner")
            .field("hash", &self.hash)
            .field("prefix_len", &self.prefix_len)
            .finish_non_exhaustive()
    }
}

/// Ed25519 signer. Messages are signed as-is, without pre-hashing.
#[derive(Clone)]
pub struct Ed25519Signer {
    signing_key: SigningKey,
}

impl Ed25519Signer {
    pub(crate) fn new(signing_key: SigningKey) -> Self {
        Self { signing_key }
    }
}

impl Signer for Ed25519Signer {
    fn sign(&self, data: &[u8]) -> KeyResult<Vec<u8>> {
        Ok(self.signing_key.sign(data).to_bytes().to_vec())
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field(
                "key_id",
                &hex::encode(&self.signing_key.verifying_key().as_bytes()[..8]),
            )
            .finish_non_exhaustive()
    }
}
