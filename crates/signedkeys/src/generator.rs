//! Key assembly and verification.
//!
//! A generated key is laid out, before encoding, as
//!
//! ```text
//! [0 .. key_length)    random bytes
//! [key_length .. end)  signature over the random bytes (may be empty)
//! ```
//!
//! and then passed through the configured [`Encoding`]. Any two generators
//! that agree on key length, signature scheme and encoding can verify each
//! other's keys.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::encoding::Encoding;
use crate::error::{KeyError, KeyResult};
use crate::random::{RandomSource, SecureRandom};
use crate::signer::{NoopSigner, Signer};
use crate::verifier::Verifier;

/// Number of random bytes in a key unless configured otherwise.
pub const DEFAULT_KEY_LENGTH: usize = 16;

/// Generates random, optionally signed and encoded keys, and verifies them.
///
/// A generator is immutable once built. Clones share their strategies, and
/// a single instance can be used from many threads at once.
///
/// # Example
///
/// ```
/// use signedkeys::{Encoding, Generator, HashAlgorithm, HmacSigner, HmacVerifier};
///
/// let generator = Generator::builder()
///     .signer(HmacSigner::new(HashAlgorithm::Sha256, b"secret".to_vec()))
///     .verifier(HmacVerifier::new(HashAlgorithm::Sha256, b"secret".to_vec()))
///     .encoding(Encoding::Hex)
///     .build()
///     .unwrap();
///
/// let key = generator.generate_key().unwrap();
/// assert!(generator.verify_signature(&key));
/// ```
#[derive(Clone)]
pub struct Generator {
    key_length: usize,
    random: Arc<dyn RandomSource>,
    signer: Arc<dyn Signer>,
    verifier: Option<Arc<dyn Verifier>>,
    encoding: Encoding,
}

impl Generator {
    /// A generator with every default: 16 random bytes from the OS RNG, no
    /// signature, identity encoding and no verifier.
    #[must_use]
    pub fn new() -> Self {
        Self {
            key_length: DEFAULT_KEY_LENGTH,
            random: Arc::new(SecureRandom),
            signer: Arc::new(NoopSigner),
            verifier: None,
            encoding: Encoding::Identity,
        }
    }

    /// Start configuring a generator.
    #[must_use]
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    /// Number of random bytes at the start of every decoded key.
    #[must_use]
    pub fn key_length(&self) -> usize {
        self.key_length
    }

    /// Encoding applied to generated keys.
    #[must_use]
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }

    /// Whether a verifier has been configured.
    #[must_use]
    pub fn has_verifier(&self) -> bool {
        self.verifier.is_some()
    }

    /// Generate a new key.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Entropy`] if the random source fails or returns
    /// the wrong number of bytes, and [`KeyError::Signing`] if the signer
    /// fails. No partial key is returned.
    pub fn generate_key(&self) -> KeyResult<Vec<u8>> {
        let mut raw = self.random.fill(self.key_length)?;
        if raw.len() != self.key_length {
            return Err(KeyError::Entropy(format!(
                "expected {} random bytes, got {}",
                self.key_length,
                raw.len()
            )));
        }

        let signature = self.signer.sign(&raw)?;
        raw.extend_from_slice(&signature);

        let key = self.encoding.encode(&raw);
        debug!(
            random_len = self.key_length,
            signature_len = signature.len(),
            encoded_len = key.len(),
            encoding = %self.encoding,
            "generated key"
        );
        Ok(key)
    }

    /// Check the signature embedded in `key`.
    ///
    /// Returns `false` when the key cannot be decoded, when it is shorter
    /// than the random part, when the verifier rejects it, or when no
    /// verifier is configured.
    #[must_use]
    pub fn verify_signature(&self, key: &[u8]) -> bool {
        let Some(verifier) = &self.verifier else {
            debug!("rejecting key: no verifier configured");
            return false;
        };

        let raw = match self.encoding.decode(key) {
            Ok(raw) => raw,
            Err(e) => {
                debug!(error = %e, "rejecting key: decode failed");
                return false;
            },
        };

        let Some((random, signature)) = raw.split_at_checked(self.key_length) else {
            debug!(
                decoded_len = raw.len(),
                key_length = self.key_length,
                "rejecting key: shorter than random part"
            );
            return false;
        };

        verifier.verify(random, signature)
    }
}

impl Default for Generator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Generator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Generator")
            .field("key_length", &self.key_length)
            .field("encoding", &self.encoding)
            .field("has_verifier", &self.verifier.is_some())
            .finish_non_exhaustive()
    }
}

/// Builder for [`Generator`] with a fluent API.
///
/// Setters may be called in any order; a later call replaces an earlier one.
/// Values are validated in [`build`](Self::build).
#[derive(Default)]
pub struct GeneratorBuilder {
    key_length: Option<usize>,
    random: Option<Arc<dyn RandomSource>>,
    signer: Option<Arc<dyn Signer>>,
    verifier: Option<Arc<dyn Verifier>>,
    encoding: Encoding,
}

impl GeneratorBuilder {
    /// Set the number of random bytes per key. Must be positive.
    #[must_use]
    pub fn key_length(mut self, key_length: usize) -> Self {
        self.key_length = Some(key_length);
        self
    }

    /// Set the random source.
    #[must_use]
    pub fn random(mut self, random: impl RandomSource + 'static) -> Self {
        self.random = Some(Arc::new(random));
        self
    }

    /// Set the signer.
    #[must_use]
    pub fn signer(mut self, signer: impl Signer + 'static) -> Self {
        self.signer = Some(Arc::new(signer));
        self
    }

    /// Set the verifier.
    #[must_use]
    pub fn verifier(mut self, verifier: impl Verifier + 'static) -> Self {
        self.verifier = Some(Arc::new(verifier));
        self
    }

    /// Set a shared signer.
    #[must_use]
    pub fn shared_signer(mut self, signer: Arc<dyn Signer>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Set a shared verifier.
    #[must_use]
    pub fn shared_verifier(mut self, verifier: Arc<dyn Verifier>) -> Self {
        self.verifier = Some(verifier);
        self
    }

    /// Set the encoding.
    #[must_use]
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Validate the configuration and freeze it into a [`Generator`].
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidConfiguration`] if the key length is zero.
    pub fn build(self) -> KeyResult<Generator> {
        let key_length = self.key_length.unwrap_or(DEFAULT_KEY_LENGTH);
        if key_length == 0 {
            return Err(KeyError::config(
                "key_length",
                "key length must be greater than zero",
            ));
        }

        if self.signer.is_some() && self.verifier.is_none() {
            warn!("signer configured without a verifier; every key will fail verification");
        }

        Ok(Generator {
            key_length,
            random: self.random.unwrap_or_else(|| Arc::new(SecureRandom)),
            signer: self.signer.unwrap_or_else(|| Arc::new(NoopSigner)),
            verifier: self.verifier,
            encoding: self.encoding,
        })
    }
}
