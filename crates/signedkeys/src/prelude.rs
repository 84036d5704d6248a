//! Prelude module - commonly used types for convenient import.
//!
//! Use `use signedkeys::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use signedkeys::prelude::*;
//!
//! let generator = Generator::builder()
//!     .signer(HmacSigner::new(HashAlgorithm::Sha256, b"secret".to_vec()).truncate(12))
//!     .verifier(HmacVerifier::new(HashAlgorithm::Sha256, b"secret".to_vec()).truncate(12))
//!     .encoding(Encoding::Hex)
//!     .build()
//!     .unwrap();
//!
//! let key = generator.generate_key().unwrap();
//! assert!(generator.verify_signature(&key));
//! ```

// Errors
pub use crate::{KeyError, KeyResult};

// Assembly
pub use crate::{Encoding, Generator, GeneratorBuilder};

// Strategies
pub use crate::{RandomSource, SecureRandom, Signer, Verifier};
pub use crate::{HashAlgorithm, HmacSigner, HmacVerifier, NoopSigner, NoopVerifier};

// Key material
pub use crate::{KeyPair, PublicKey};

// Settings
pub use crate::{Settings, SignatureSettings};
