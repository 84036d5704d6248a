//! Text encodings applied to the assembled key bytes.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

use crate::error::{KeyError, KeyResult};

/// Reversible mapping between raw key bytes and their transport form.
///
/// `encode` is total; `decode` rejects malformed input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Encoding {
    /// Bytes are passed through unchanged.
    #[default]
    Identity,
    /// Lowercase hexadecimal.
    Hex,
    /// Standard base64 alphabet with padding.
    Base64,
}

impl Encoding {
    /// Encode raw bytes.
    #[must_use]
    pub fn encode(self, bytes: &[u8]) -> Vec<u8> {
        match self {
            Self::Identity => bytes.to_vec(),
            Self::Hex => hex::encode(bytes).into_bytes(),
            Self::Base64 => STANDARD.encode(bytes).into_bytes(),
        }
    }

    /// Decode previously encoded bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::InvalidHexEncoding`] or
    /// [`KeyError::InvalidBase64Encoding`] for malformed input.
    pub fn decode(self, encoded: &[u8]) -> KeyResult<Vec<u8>> {
        match self {
            Self::Identity => Ok(encoded.to_vec()),
            Self::Hex => hex::decode(encoded).map_err(|_| KeyError::InvalidHexEncoding),
            Self::Base64 => STANDARD
                .decode(encoded)
                .map_err(|_| KeyError::InvalidBase64Encoding),
        }
    }

    /// Name used in settings files and log output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Identity => "identity",
            Self::Hex => "hex",
            Self::Base64 => "base64",
        }
    }
}

impl std::fmt::Display for Encoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Encoding; 3] = [Encoding::Identity, Encoding::Hex, Encoding::Base64];

    #[test]
    fn test_roundtrip_all_encodings() {
        let inputs: [&[u8]; 4] = [b"", b"\x00", b"testkeylength_16", &[0xff, 0x00, 0x7f, 0x80, 0x01]];
        for encoding in ALL {
            for input in inputs {
                let encoded = encoding.encode(input);
                assert_eq!(encoding.decode(&encoded).unwrap(), input, "{encoding}");
            }
        }
    }

    #[test]
    fn test_literal_vectors() {
        assert_eq!(
            Encoding::Hex.encode(b"testkeylength_16"),
            b"746573746b65796c656e6774685f3136"
        );
        assert_eq!(
            Encoding::Base64.encode(b"testkeylength_16"),
            b"dGVzdGtleWxlbmd0aF8xNg=="
        );
    }

    #[test]
    fn test_hex_is_lowercase() {
        assert_eq!(Encoding::Hex.encode(&[0xab, 0xcd]), b"abcd");
    }

    #[test]
    fn test_malformed_hex() {
        // Odd length
        assert!(matches!(
            Encoding::Hex.decode(b"abc"),
            Err(KeyError::InvalidHexEncoding)
        ));
        // Non-hex characters
        assert!(matches!(
            Encoding::Hex.decode(b"zz"),
            Err(KeyError::InvalidHexEncoding)
        ));
    }

    #[test]
    fn test_malformed_base64() {
        assert!(matches!(
            Encoding::Base64.decode(b"dGVzd*=="),
            Err(KeyError::InvalidBase64Encoding)
        ));
        // Missing padding
        assert!(matches!(
            Encoding::Base64.decode(b"dGVzdGtleWxlbmd0aF8xNg"),
            Err(KeyError::InvalidBase64Encoding)
        ));
    }

    #[test]
    fn test_serde_names() {
        let parsed: Encoding = serde_json::from_str("\"base64\"").unwrap();
        assert_eq!(parsed, Encoding::Base64);
        assert_eq!(serde_json::to_string(&Encoding::Hex).unwrap(), "\"hex\"");
    }
}
