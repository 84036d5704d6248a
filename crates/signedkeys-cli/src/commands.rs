//! Command implementations.

use std::path::Path;

use anyhow::Context;
use signedkeys::{Encoding, Generator, KeyPair, Settings};
use tracing::{debug, warn};

/// Resolve the generator from a settings file, or use defaults.
pub(crate) fn load_generator(config: Option<&Path>) -> anyhow::Result<Generator> {
    let settings = match config {
        Some(path) => Settings::load(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => {
            debug!("no settings file given, using defaults");
            Settings::default()
        },
    };
    Ok(settings.into_generator()?)
}

/// Render a key for the terminal.
///
/// Identity-encoded keys are raw bytes and are always shown as hex;
/// [`key_bytes`] undoes this.
fn printable(encoding: Encoding, key: Vec<u8>) -> String {
    match encoding {
        Encoding::Identity => hex::encode(key),
        Encoding::Hex | Encoding::Base64 => String::from_utf8_lossy(&key).into_owned(),
    }
}

/// Turn a key typed on the command line back into what the generator
/// produced.
///
/// Identity keys are read as hex. Input that is not hex is taken as the raw
/// key, untrimmed.
fn key_bytes(encoding: Encoding, input: &str) -> Vec<u8> {
    match encoding {
        Encoding::Identity => hex::decode(input.trim()).unwrap_or_else(|_| {
            debug!("key is not hex, checking it as raw bytes");
            input.as_bytes().to_vec()
        }),
        Encoding::Hex | Encoding::Base64 => input.trim().as_bytes().to_vec(),
    }
}

/// Generate `count` keys, one per line.
pub(crate) fn generate(generator: &Generator, count: usize) -> anyhow::Result<Vec<String>> {
    (0..count)
        .map(|_| {
            generator
                .generate_key()
                .map(|key| printable(generator.encoding(), key))
                .context("failed to generate key")
        })
        .collect()
}

/// Check a key given on the command line.
pub(crate) fn verify(generator: &Generator, key: &str) -> bool {
    if !generator.has_verifier() {
        warn!("no verifier configured; every key is rejected");
    }
    generator.verify_signature(&key_bytes(generator.encoding(), key))
}

/// Create a fresh Ed25519 key pair for a settings file.
pub(crate) fn keypair() -> (String, String) {
    let keypair = KeyPair::generate();
    (keypair.secret_key_hex().to_string(), keypair.public_key().to_hex())
}
