//! Key generation and verification error types.

use thiserror::Error;

/// Errors that can occur while configuring or generating keys.
///
/// Verification never surfaces these: [`Generator::verify_signature`]
/// folds every failure into `false`.
///
/// [`Generator::verify_signature`]: crate::Generator::verify_signature
#[derive(Debug, Error)]
pub enum KeyError {
    /// A configuration value was rejected at build time.
    #[error("invalid configuration for {field}: {message}")]
    InvalidConfiguration {
        /// Name of the offending field.
        field: String,
        /// What was wrong with it.
        message: String,
    },

    /// The random source failed or returned the wrong number of bytes.
    #[error("random source failed: {0}")]
    Entropy(String),

    /// The signer failed to produce a signature.
    #[error("signing failed: {0}")]
    Signing(String),

    /// Invalid key material length.
    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected length in bytes.
        expected: usize,
        /// Actual length in bytes.
        actual: usize,
    },

    /// Invalid public key.
    #[error("invalid public key: {0}")]
    InvalidPublicKey(String),

    /// Invalid hex encoding.
    #[error("invalid hex encoding")]
    InvalidHexEncoding,

    /// Invalid base64 encoding.
    #[error("invalid base64 encoding")]
    InvalidBase64Encoding,

    /// A settings document could not be parsed.
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// I/O error (e.g. reading a settings file).
    #[error("I/O error: {0}")]
    Io(String),
}

impl KeyError {
    /// Build a [`KeyError::InvalidConfiguration`] for `field`.
    pub(crate) fn config(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from decoding malformed text.
    #[must_use]
    pub fn is_decode(&self) -> bool {
        matches!(self, Self::InvalidHexEncoding | Self::InvalidBase64Encoding)
    }
}

/// Result type for key operations.
pub type KeyResult<T> = Result<T, KeyError>;
