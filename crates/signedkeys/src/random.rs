//! Random byte sources.

use rand::RngCore;
use rand::rngs::OsRng;

use crate::error::{KeyError, KeyResult};

/// Supplies the random part of every generated key.
///
/// Implementations must either return exactly `len` bytes or fail.
/// Closures of the form `Fn(usize) -> KeyResult<Vec<u8>>` implement this
/// trait, which is handy for injecting fixed bytes in tests.
pub trait RandomSource: Send + Sync {
    /// Produce `len` random bytes.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::Entropy`] if the underlying source is unavailable.
    fn fill(&self, len: usize) -> KeyResult<Vec<u8>>;
}

impl<F> RandomSource for F
where
    F: Fn(usize) -> KeyResult<Vec<u8>> + Send + Sync,
{
    fn fill(&self, len: usize) -> KeyResult<Vec<u8>> {
        self(len)
    }
}

/// Cryptographically secure bytes from the operating system RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureRandom;

impl RandomSource for SecureRandom {
    fn fill(&self, len: usize) -> KeyResult<Vec<u8>> {
        let mut bytes = vec![0u8; len];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| KeyError::Entropy(e.to_string()))?;
        Ok(bytes)
    }
}
