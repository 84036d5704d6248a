//! HMAC computation shared by [`HmacSigner`](crate::HmacSigner) and
//! [`HmacVerifier`](crate::HmacVerifier).

use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};

use crate::error::{KeyError, KeyResult};

/// Hash function underlying an HMAC signature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// SHA-1 (20-byte tags). Kept for compatibility with existing keys.
    Sha1,
    /// SHA-256 (32-byte tags).
    #[default]
    Sha256,
    /// SHA-384 (48-byte tags).
    Sha384,
    /// SHA-512 (64-byte tags).
    Sha512,
}

impl HashAlgorithm {
    /// Length of an untruncated tag in bytes.
    #[must_use]
    pub const fn output_len(self) -> usize {
        match self {
            Self::Sha1 => 20,
            Self::Sha256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }

    /// Name used in settings files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }

    /// Compute the full HMAC tag of `data` under `secret`.
    pub(crate) fn mac(self, secret: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
        match self {
            Self::Sha1 => compute::<Hmac<Sha1>>(secret, data),
            Self::Sha256 => compute::<Hmac<Sha256>>(secret, data),
            Self::Sha384 => compute::<Hmac<Sha384>>(secret, data),
            Self::Sha512 => compute::<Hmac<Sha512>>(secret, data),
        }
    }
}

impl std::fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compute<M: Mac + hmac::digest::KeyInit>(secret: &[u8], data: &[u8]) -> KeyResult<Vec<u8>> {
    let mut mac = <M as Mac>::new_from_slice(secret).map_err(|e| KeyError::Signing(e.to_string()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Cut `tag` to `prefix_len` bytes when `0 < prefix_len < tag.len()`.
pub(crate) fn truncated(mut tag: Vec<u8>, prefix_len: Option<usize>) -> Vec<u8> {
    if let Some(len) = prefix_len
        && len > 0
        && len < tag.len()
    {
        tag.truncate(len);
    }
    tag
}
