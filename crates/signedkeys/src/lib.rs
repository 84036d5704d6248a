//! Signedkeys - random, signed, text-encoded keys that verify offline.
//!
//! This crate provides:
//! - A [`Generator`] that assembles `random ‖ signature` keys and encodes them
//! - Pluggable [`RandomSource`], [`Signer`] and [`Verifier`] strategies
//! - HMAC (SHA-1/SHA-2) and Ed25519 signatures, identity/hex/base64 encodings
//! - TOML [`Settings`] for describing a generator in a file
//!
//! Anyone holding the verification material can check a key without a
//! lookup store.
//!
//! # Example
//!
//! ```
//! use signedkeys::{Encoding, Generator, KeyPair};
//!
//! let keypair = KeyPair::generate();
//! let generator = Generator::builder()
//!     .key_length(24)
//!     .signer(keypair.signer())
//!     .verifier(keypair.verifier())
//!     .encoding(Encoding::Base64)
//!     .build()
//!     .unwrap();
//!
//! let key = generator.generate_key().unwrap();
//! assert!(generator.verify_signature(&key));
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod encoding;
mod error;
mod generator;
mod keypair;
mod mac;
mod random;
mod settings;
mod signer;
mod verifier;

pub use encoding::Encoding;
pub use error::{KeyError, KeyResult};
pub use generator::{DEFAULT_KEY_LENGTH, Generator, GeneratorBuilder};
pub use keypair::{KEYPAIR_LENGTH, KeyPair, PUBLIC_KEY_LENGTH, PublicKey, SECRET_KEY_LENGTH};
pub use mac::HashAlgorithm;
pub use random::{RandomSource, SecureRandom};
pub use settings::{Settings, SignatureSettings};
pub use signer::{Ed25519Signer, HmacSigner, NoopSigner, Signer};
pub use verifier::{Ed25519Verifier, HmacVerifier, NoopVerifier, Verifier};
