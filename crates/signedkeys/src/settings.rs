//! File-based generator settings.
//!
//! A [`Settings`] document describes a [`Generator`] in TOML:
//!
//! ```toml
//! key_length = 16
//! encoding = "hex"
//!
//! [signature]
//! scheme = "hmac"
//! hash = "sha256"
//! secret = "${SIGNEDKEYS_SECRET}"
//! truncate = 12
//! ```
//!
//! Secret values written as `${VAR}` are read from the environment when the
//! generator is built, so they need not be stored in the file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use zeroize::Zeroizing;

use crate::encoding::Encoding;
use crate::error::{KeyError, KeyResult};
use crate::generator::{DEFAULT_KEY_LENGTH, Generator};
use crate::keypair::{KeyPair, PublicKey};
use crate::mac::HashAlgorithm;
use crate::signer::HmacSigner;
use crate::verifier::{HmacVerifier, NoopVerifier};

/// Serializable description of a [`Generator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Number of random bytes per key.
    #[serde(default = "default_key_length")]
    pub key_length: usize,
    /// Text encoding of generated keys.
    #[serde(default)]
    pub encoding: Encoding,
    /// Signature scheme.
    #[serde(default)]
    pub signature: SignatureSettings,
}

fn default_key_length() -> usize {
    DEFAULT_KEY_LENGTH
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_length: DEFAULT_KEY_LENGTH,
            encoding: Encoding::default(),
            signature: SignatureSettings::default(),
        }
    }
}

/// Signature scheme settings, tagged by `scheme`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "scheme", rename_all = "lowercase")]
pub enum SignatureSettings {
    /// Unsigned keys. Verification accepts any key of sufficient length.
    #[default]
    None,
    /// HMAC over the random bytes.
    Hmac {
        /// Hash function.
        #[serde(default)]
        hash: HashAlgorithm,
        /// Hex-encoded secret, or `${VAR}`.
        secret: String,
        /// Optional tag prefix length.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        truncate: Option<usize>,
    },
    /// Ed25519 over the random bytes.
    Ed25519 {
        /// Hex-encoded private key (32-byte seed or 64-byte `seed ‖ public`),
        /// or `${VAR}`. Needed to generate keys.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        secret_key: Option<String>,
        /// Hex-encoded public key. Derived from `secret_key` when omitted.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        public_key: Option<String>,
    },
}

impl Settings {
    /// Parse settings from a TOML string and validate them.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidSettings`] for malformed TOML and
    /// [`KeyError::InvalidConfiguration`] for out-of-range values.
    pub fn from_toml_str(s: &str) -> KeyResult<Self> {
        let settings: Self = toml::from_str(s).map_err(|e| KeyError::InvalidSettings(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read and validate a settings file.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Io`] if the file cannot be read, otherwise the
    /// same errors as [`from_toml_str`](Self::from_toml_str).
    pub fn load(path: impl AsRef<Path>) -> KeyResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| KeyError::Io(e.to_string()))?;
        debug!(path = %path.display(), "loaded generator settings");
        Self::from_toml_str(&contents)
    }

    /// Check values that the type system cannot.
    ///
    /// Secrets behind `${VAR}` references are checked when the generator is
    /// built, not here.
    ///
    /// # Errors
    ///
    /// Returns the first [`KeyError::InvalidConfiguration`] found.
    pub fn validate(&self) -> KeyResult<()> {
        if self.key_length == 0 {
            return Err(KeyError::config(
                "key_length",
                "key length must be greater than zero",
            ));
        }

        match &self.signature {
            SignatureSettings::None => {},
            SignatureSettings::Hmac {
                hash,
                secret,
                truncate,
            } => {
                if secret.trim().is_empty() {
                    return Err(KeyError::config("signature.secret", "secret must not be empty"));
                }
                if let Some(len) = truncate
                    && (*len == 0 || *len > hash.output_len())
                {
                    return Err(KeyError::config(
                        "signature.truncate",
                        format!(
                            "truncate must be between 1 and {} for {hash}",
                            hash.output_len()
                        ),
                    ));
                }
            },
            SignatureSettings::Ed25519 {
                secret_key,
                public_key,
            } => {
                if secret_key.is_none() && public_key.is_none() {
                    return Err(KeyError::config(
                        "signature",
                        "ed25519 needs a secret_key, a public_key, or both",
                    ));
                }
            },
        }

        Ok(())
    }

    /// Build the described generator.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails, an environment reference is
    /// unset, or key material does not decode.
    pub fn into_generator(self) -> KeyResult<Generator> {
        self.validate()?;

        let builder = Generator::builder()
            .key_length(self.key_length)
            .encoding(self.encoding);

        let builder = match self.signature {
            SignatureSettings::None => builder.verifier(NoopVerifier),
            SignatureSettings::Hmac {
                hash,
                secret,
                truncate,
            } => {
                let secret = Zeroizing::new(
                    hex::decode(resolve_env("signature.secret", &secret)?.as_bytes())
                        .map_err(|_| KeyError::config("signature.secret", "secret must be hex"))?,
                );
                let mut signer = HmacSigner::new(hash, secret.to_vec());
                let mut verifier = HmacVerifier::new(hash, secret.to_vec());
                if let Some(len) = truncate {
                    signer = signer.truncate(len);
                    verifier = verifier.truncate(len);
                }
                builder.signer(signer).verifier(verifier)
            },
            SignatureSettings::Ed25519 {
                secret_key,
                public_key,
            } => {
                let keypair = secret_key
                    .map(|s| -> KeyResult<KeyPair> {
                        KeyPair::from_hex(&resolve_env("signature.secret_key", &s)?)
                    })
                    .transpose()?;
                let public_key = public_key
                    .map(|s| PublicKey::from_hex(&resolve_env("signature.public_key", &s)?))
                    .transpose()?;

                if let (Some(keypair), Some(public_key)) = (&keypair, &public_key)
                    && keypair.public_key() != *public_key
                {
                    return Err(KeyError::config(
                        "signature.public_key",
                        "public key does not match secret key",
                    ));
                }

                let verifier = match (&public_key, &keypair) {
                    (Some(pk), _) => pk.verifier(),
                    (None, Some(kp)) => kp.verifier(),
                    (None, None) => {
                        return Err(KeyError::config(
                            "signature",
                            "ed25519 needs a secret_key, a public_key, or both",
                        ));
                    },
                };
                let builder = builder.verifier(verifier);
                match keypair {
                    Some(kp) => builder.signer(kp.signer()),
                    None => builder.signer(|_: &[u8]| -> KeyResult<Vec<u8>> {
                        Err(KeyError::Signing(
                            "no ed25519 secret key configured; this generator only verifies"
                                .to_owned(),
                        ))
                    }),
                }
            },
        };

        builder.build()
    }
}

/// Resolve a `${VAR}` reference from the process environment.
fn resolve_env(field: &str, value: &str) -> KeyResult<Zeroizing<String>> {
    resolve_with(field, value, |name| std::env::var(name).ok())
}

/// Resolve a `${VAR}` reference through `lookup`, or return the value
/// unchanged.
fn resolve_with(
    field: &str,
    value: &str,
    lookup: impl Fn(&str) -> Option<String>,
) -> KeyResult<Zeroizing<String>> {
    let Some(name) = value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
    else {
        return Ok(Zeroizing::new(value.trim().to_owned()));
    };

    lookup(name)
        .map(|v| Zeroizing::new(v.trim().to_owned()))
        .ok_or_else(|| KeyError::config(field, format!("environment variable {name} is not set")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());

        let generator = settings.into_generator().unwrap();
        assert_eq!(generator.key_length(), DEFAULT_KEY_LENGTH);
        let key = generator.generate_key().unwrap();
        assert!(generator.verify_signature(&key));
    }

    #[test]
    fn test_parse_hmac() {
        let settings = Settings::from_toml_str(
            r#"
            key_length = 24
            encoding = "base64"

            [signature]
            scheme = "hmac"
            hash = "sha512"
            secret = "00112233"
            truncate = 16
            "#,
        )
        .unwrap();

        assert_eq!(settings.key_length, 24);
        assert_eq!(settings.encoding, Encoding::Base64);
        assert_eq!(
            settings.signature,
            SignatureSettings::Hmac {
                hash: HashAlgorithm::Sha512,
                secret: "00112233".to_owned(),
                truncate: Some(16),
            }
        );

        let generator = settings.into_generator().unwrap();
        let key = generator.generate_key().unwrap();
        // 24 random + 16 tag bytes = 40 bytes -> 56 base64 characters
        assert_eq!(key.len(), 56);
        assert!(generator.verify_signature(&key));
    }

    #[test]
    fn test_rejects_zero_key_length() {
        let err = Settings::from_toml_str("key_length = 0").unwrap_err();
        assert!(matches!(err, KeyError::InvalidConfiguration { ref field, .. } if field == "key_length"));
    }

    #[test]
    fn test_rejects_bad_truncate() {
        let err = Settings::from_toml_str(
            r#"
            [signature]
            scheme = "hmac"
            hash = "sha1"
            secret = "aa"
            truncate = 21
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, KeyError::InvalidConfiguration { ref field, .. } if field == "signature.truncate"));
        assert!(err.to_string().contains("between 1 and 20 for sha1"), "{err}");
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let err = Settings::from_toml_str("key_len = 4").unwrap_err();
        assert!(matches!(err, KeyError::InvalidSettings(_)));
    }

    #[test]
    fn test_rejects_non_hex_secret() {
        let settings = Settings::from_toml_str(
            r#"
            [signature]
            scheme = "hmac"
            secret = "not hex"
            "#,
        )
        .unwrap();
        assert!(matches!(
            settings.into_generator(),
            Err(KeyError::InvalidConfiguration { .. })
        ));
    }

    #[test]
    fn test_resolve_references() {
        let lookup = |name: &str| (name == "SECRET").then(|| " abcd \n".to_owned());

        assert_eq!(*resolve_with("f", "${SECRET}", lookup).unwrap(), "abcd");
        assert_eq!(*resolve_with("f", "0011", lookup).unwrap(), "0011");
        // Not a complete reference, taken literally
        assert_eq!(*resolve_with("f", "${SECRET", lookup).unwrap(), "${SECRET");
        assert!(matches!(
            resolve_with("f", "${OTHER}", lookup),
            Err(KeyError::InvalidConfiguration { ref field, .. }) if field == "f"
        ));
    }

    #[test]
    fn test_missing_environment_variable() {
        let settings = Settings::from_toml_str(
            r#"
            [signature]
            scheme = "hmac"
            secret = "${SIGNEDKEYS_TEST_DEFINITELY_UNSET}"
            "#,
        )
        .unwrap();
        assert!(matches!(
            settings.into_generator(),
            Err(KeyError::InvalidConfiguration { ref field, .. }) if field == "signature.secret"
        ));
    }

    #[test]
    fn test_ed25519_requires_key_material() {
        let err = Settings::from_toml_str(
            r#"
            [signature]
            scheme = "ed25519"
            "#,
        )
        .unwrap_err();
        assert!(matches!(err, KeyError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_ed25519_verify_only() {
        let keypair = KeyPair::generate();
        let signing = Settings {
            signature: SignatureSettings::Ed25519 {
                secret_key: Some(keypair.secret_key_hex().to_string()),
                public_key: None,
            },
            ..Settings::default()
        }
        .into_generator()
        .unwrap();
        let verifying = Settings {
            signature: SignatureSettings::Ed25519 {
                secret_key: None,
                public_key: Some(keypair.public_key().to_hex()),
            },
            ..Settings::default()
        }
        .into_generator()
        .unwrap();

        let key = signing.generate_key().unwrap();
        assert!(verifying.verify_signature(&key));
        assert!(matches!(verifying.generate_key(), Err(KeyError::Signing(_))));
    }

    #[test]
    fn test_ed25519_mismatched_public_key() {
        let settings = Settings {
            signature: SignatureSettings::Ed25519 {
                secret_key: Some(KeyPair::generate().secret_key_hex().to_string()),
                public_key: Some(KeyPair::generate().public_key().to_hex()),
            },
            ..Settings::default()
        };
        assert!(matches!(
            settings.into_generator(),
            Err(KeyError::InvalidConfiguration { ref field, .. }) if field == "signature.public_key"
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("signedkeys.toml");
        std::fs::write(&path, "key_length = 8\nencoding = \"hex\"\n").unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.key_length, 8);
        assert_eq!(settings.encoding, Encoding::Hex);

        assert!(matches!(
            Settings::load(dir.path().join("missing.toml")),
            Err(KeyError::Io(_))
        ));
    }

    #[test]
    fn test_roundtrip_through_toml() {
        let settings = Settings {
            key_length: 32,
            encoding: Encoding::Hex,
            signature: SignatureSettings::Hmac {
                hash: HashAlgorithm::Sha256,
                secret: "abcd".to_owned(),
                truncate: None,
            },
        };
        let text = toml::to_string(&settings).unwrap();
        assert_eq!(Settings::from_toml_str(&text).unwrap(), settings);
    }
}
