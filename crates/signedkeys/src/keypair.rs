//! Ed25519 key pairs with secure memory handling.
//!
//! Provides the key material behind [`Ed25519Signer`] and
//! [`Ed25519Verifier`]:
//! - Fresh key generation
//! - Loading a 32-byte seed or a 64-byte `seed ‖ public` private key
//! - Public key export for verification-only deployments

use ed25519_dalek::{SigningKey, VerifyingKey};
use rand::rngs::OsRng;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::error::{KeyError, KeyResult};
use crate::signer::Ed25519Signer;
use crate::verifier::Ed25519Verifier;

/// Length of an Ed25519 seed in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;
/// Length of an Ed25519 private key in `seed ‖ public` form.
pub const KEYPAIR_LENGTH: usize = 64;
/// Length of an Ed25519 public key in bytes.
pub const PUBLIC_KEY_LENGTH: usize = 32;

/// An Ed25519 key pair with secure memory handling.
///
/// The secret key is zeroized on drop to prevent leaking sensitive material.
#[derive(ZeroizeOnDrop)]
pub struct KeyPair {
    #[zeroize(skip)] // VerifyingKey doesn't implement Zeroize
    verifying_key: VerifyingKey,
    signing_key: SigningKey,
}

impl KeyPair {
    /// Generate a new random key pair.
    #[must_use]
    pub fn generate() -> Self {
        Self::from_signing_key(SigningKey::generate(&mut OsRng))
    }

    /// Create from a secret key (32-byte seed).
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKeyLength`] if the slice is not exactly 32 bytes.
    pub fn from_secret_key(bytes: &[u8]) -> KeyResult<Self> {
        if bytes.len() != SECRET_KEY_LENGTH {
            return Err(KeyError::InvalidKeyLength {
                expected: SECRET_KEY_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut secret = [0u8; SECRET_KEY_LENGTH];
        secret.copy_from_slice(bytes);

        let signing_key = SigningKey::from_bytes(&secret);

        // Zeroize the temporary buffer
        secret.zeroize();

        Ok(Self::from_signing_key(signing_key))
    }

    /// Create from a 64-byte private key laid out as `seed ‖ public`.
    ///
    /// The embedded public key must match the one derived from the seed.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKeyLength`] for a wrong length and
    /// [`KeyError::InvalidPublicKey`] if the two halves disagree.
    pub fn from_keypair_bytes(bytes: &[u8]) -> KeyResult<Self> {
        if bytes.len() != KEYPAIR_LENGTH {
            return Err(KeyError::InvalidKeyLength {
                expected: KEYPAIR_LENGTH,
                actual: bytes.len(),
            });
        }

        let mut pair = Zeroizing::new([0u8; KEYPAIR_LENGTH]);
        pair.copy_from_slice(bytes);

        let signing_key = SigningKey::from_keypair_bytes(&pair)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))?;
        Ok(Self::from_signing_key(signing_key))
    }

    /// Create from either private key form, picked by length.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKeyLength`] if the slice is neither 32 nor
    /// 64 bytes long.
    pub fn from_private_bytes(bytes: &[u8]) -> KeyResult<Self> {
        if bytes.len() == KEYPAIR_LENGTH {
            Self::from_keypair_bytes(bytes)
        } else {
            Self::from_secret_key(bytes)
        }
    }

    /// Create from a hex-encoded private key (32 or 64 bytes).
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid hex or has the wrong length.
    pub fn from_hex(s: &str) -> KeyResult<Self> {
        let bytes = Zeroizing::new(hex::decode(s).map_err(|_| KeyError::InvalidHexEncoding)?);
        Self::from_private_bytes(&bytes)
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            verifying_key,
            signing_key,
        }
    }

    /// Get the public key bytes (32 bytes).
    #[must_use]
    pub fn public_key_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.verifying_key.as_bytes()
    }

    /// Get a short key ID (first 8 bytes of public key).
    ///
    /// Useful for identifying keys in logs without exposing the full key.
    #[must_use]
    pub fn key_id_hex(&self) -> String {
        hex::encode(&self.public_key_bytes()[..8])
    }

    /// Export the public key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey {
        PublicKey(self.verifying_key)
    }

    /// Export the secret seed as hex (careful - sensitive!).
    #[must_use]
    pub fn secret_key_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(hex::encode(self.signing_key.to_bytes()))
    }

    /// A signer backed by this key pair.
    #[must_use]
    pub fn signer(&self) -> Ed25519Signer {
        Ed25519Signer::new(self.signing_key.clone())
    }

    /// A verifier for signatures made by this key pair.
    #[must_use]
    pub fn verifier(&self) -> Ed25519Verifier {
        Ed25519Verifier::new(self.verifying_key)
    }
}

impl std::fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyPair")
            .field("key_id", &self.key_id_hex())
            .finish_non_exhaustive()
    }
}

/// A public key (safe to share, serialize, etc.).
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct PublicKey(VerifyingKey);

impl PublicKey {
    /// Try to create from a slice.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidKeyLength`] if the slice is not exactly 32
    /// bytes, or [`KeyError::InvalidPublicKey`] if it is not a curve point.
    pub fn try_from_slice(slice: &[u8]) -> KeyResult<Self> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] =
            slice.try_into().map_err(|_| KeyError::InvalidKeyLength {
                expected: PUBLIC_KEY_LENGTH,
                actual: slice.len(),
            })?;
        VerifyingKey::from_bytes(&bytes)
            .map(Self)
            .map_err(|e| KeyError::InvalidPublicKey(e.to_string()))
    }

    /// Get the raw bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; PUBLIC_KEY_LENGTH] {
        self.0.as_bytes()
    }

    /// Encode as hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.as_bytes())
    }

    /// Decode from hex string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid hex or not a valid key.
    pub fn from_hex(s: &str) -> KeyResult<Self> {
        let bytes = hex::decode(s).map_err(|_| KeyError::InvalidHexEncoding)?;
        Self::try_from_slice(&bytes)
    }

    /// Encode as base64 string.
    #[must_use]
    pub fn to_base64(&self) -> String {
        use base64::Engine;
        base64::engine::general_purpose::STANDARD.encode(self.as_bytes())
    }

    /// Decode from base64 string.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid base64 or not a valid key.
    pub fn from_base64(s: &str) -> KeyResult<Self> {
        use base64::Engine;
        let bytes = base64::engine::general_purpose::STANDARD
            .decode(s)
            .map_err(|_| KeyError::InvalidBase64Encoding)?;
        Self::try_from_slice(&bytes)
    }

    /// A verifier for signatures made with the matching secret key.
    #[must_use]
    pub fn verifier(&self) -> Ed25519Verifier {
        Ed25519Verifier::new(self.0)
    }
}

impl std::fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "PublicKey({})", hex::encode(&self.as_bytes()[..8]))
    }
}

impl std::fmt::Display for PublicKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Signer, Verifier};

    const PUBLIC_HEX: &str = "74b31ae07c26fd23d7008cbb38264c9e43e6325573c260f2331adca4eccba55f";
    const PRIVATE_HEX: &str = "c1ec13413449e3a715694433da83247e895d5cdecab8d787be4c9d3a2fa50c1d74b31ae07c26fd23d7008cbb38264c9e43e6325573c260f2331adca4eccba55f";

    #[test]
    fn test_keypair_generation() {
        let kp1 = KeyPair::generate();
        let kp2 = KeyPair::generate();

        // Different keypairs have different public keys
        assert_ne!(kp1.public_key_bytes(), kp2.public_key_bytes());
    }

    #[test]
    fn test_keypair_from_secret() {
        let original = KeyPair::generate();
        let restored = KeyPair::from_hex(&original.secret_key_hex()).unwrap();

        assert_eq!(original.public_key_bytes(), restored.public_key_bytes());
    }

    #[test]
    fn test_keypair_from_64_byte_private_key() {
        let keypair = KeyPair::from_hex(PRIVATE_HEX).unwrap();
        assert_eq!(keypair.public_key().to_hex(), PUBLIC_HEX);

        // The seed half alone yields the same key pair
        let seed = KeyPair::from_hex(&PRIVATE_HEX[..64]).unwrap();
        assert_eq!(seed.public_key_bytes(), keypair.public_key_bytes());
    }

    #[test]
    fn test_keypair_rejects_mismatched_halves() {
        let other = KeyPair::generate();
        let mismatched = format!("{}{}", &PRIVATE_HEX[..64], other.public_key().to_hex());
        assert!(matches!(
            KeyPair::from_hex(&mismatched),
            Err(KeyError::InvalidPublicKey(_))
        ));
    }

    #[test]
    fn test_invalid_key_length() {
        let result = KeyPair::from_secret_key(&[0u8; 31]);
        assert!(matches!(result, Err(KeyError::InvalidKeyLength { .. })));

        let result = KeyPair::from_private_bytes(&[0u8; 48]);
        assert!(matches!(result, Err(KeyError::InvalidKeyLength { .. })));
    }

    #[test]
    fn test_public_key_encoding() {
        let pk = KeyPair::generate().public_key();

        // Hex roundtrip
        let decoded = PublicKey::from_hex(&pk.to_hex()).unwrap();
        assert_eq!(pk, decoded);

        // Base64 roundtrip
        let decoded = PublicKey::from_base64(&pk.to_base64()).unwrap();
        assert_eq!(pk, decoded);
    }

    #[test]
    fn test_public_key_verifier() {
        let keypair = KeyPair::generate();
        let pk = PublicKey::from_hex(&keypair.public_key().to_hex()).unwrap();

        let sig = keypair.signer().sign(b"test").unwrap();
        assert!(pk.verifier().verify(b"test", &sig));
    }

    #[test]
    fn test_debug_hides_secret() {
        let keypair = KeyPair::from_hex(PRIVATE_HEX).unwrap();
        let debug = format!("{keypair:?}");
        assert!(debug.contains("74b31ae07c26fd23"));
        assert!(!debug.contains("c1ec1341"));
    }
}
