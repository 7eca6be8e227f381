//! Session key material

use rand::{CryptoRng, RngCore};
use zeroize::Zeroize;

use super::cipher::MIN_KEY_LEN;
use super::error::SessionKeyError;

/// A validated session key.
///
/// Holds the original (pre-mutation) key bytes for one communication
/// session. Construction guarantees the [`MIN_KEY_LEN`] lower bound, so
/// consumers can derive cipher state from it without a fallible path.
///
/// Cloning copies the key bytes; every copy zeroizes its own buffer on
/// drop. The type deliberately implements no `Display`, and its `Debug`
/// redacts the key bytes, so key material cannot leak through formatting.
#[derive(Clone)]
pub struct SessionKey {
    /// Raw key bytes, always at least [`MIN_KEY_LEN`] long.
    bytes: Vec<u8>,
}

impl std::fmt::Debug for SessionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionKey").field("bytes", &"<redacted>").finish()
    }
}

impl SessionKey {
    /// Validate caller-supplied key bytes (for example a key the remote
    /// side unwrapped and handed back to protocol code).
    ///
    /// # Errors
    ///
    /// [`SessionKeyError::InvalidKey`] if fewer than [`MIN_KEY_LEN`]
    /// bytes are supplied.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, SessionKeyError> {
        if bytes.len() < MIN_KEY_LEN {
            return Err(SessionKeyError::InvalidKey { minimum: MIN_KEY_LEN, actual: bytes.len() });
        }
        Ok(Self { bytes })
    }

    /// Generate a fresh session key of `len` bytes.
    ///
    /// The caller provides the randomness source; production callers pass
    /// a cryptographically secure generator such as `OsRng`. Seedable
    /// generators keep tests deterministic.
    ///
    /// # Errors
    ///
    /// [`SessionKeyError::InvalidKey`] if `len` is below [`MIN_KEY_LEN`].
    pub fn generate<R>(rng: &mut R, len: usize) -> Result<Self, SessionKeyError>
    where
        R: RngCore + CryptoRng,
    {
        if len < MIN_KEY_LEN {
            return Err(SessionKeyError::InvalidKey { minimum: MIN_KEY_LEN, actual: len });
        }
        let mut bytes = vec![0u8; len];
        rng.fill_bytes(&mut bytes);
        Ok(Self { bytes })
    }

    /// The key bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl Drop for SessionKey {
    fn drop(&mut self) {
        self.bytes.zeroize();
    }
}
