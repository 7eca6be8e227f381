//! Evolving-key XOR stream cipher
//!
//! Each byte is XOR-masked with a cyclically indexed key byte and offset
//! by the top byte of a 64-bit seed; afterwards the seed advances through
//! a wrapping multiplicative update and the key byte at the current
//! position is rewritten with the new seed's low byte. Sender and
//! receiver must perform byte-identical updates or their streams
//! desynchronize permanently.
//!
//! # Security
//!
//! NOT a vetted primitive. The keystream is a low-entropy
//! multiplicative update over a short cyclic key; the construction
//! exists for interoperability with a fixed wire protocol. See the crate
//! docs.

use zeroize::Zeroize;

use super::error::SessionKeyError;

/// Minimum key length in bytes: the first 8 key bytes form the initial
/// 64-bit seed.
pub const MIN_KEY_LEN: usize = 8;

/// Stateful evolving-key XOR stream cipher.
///
/// Owns a mutable key buffer and a 64-bit seed, both derived from the
/// session key at construction and rewritten as every byte is processed.
/// There is no key schedule separate from this state: the state IS the
/// key.
///
/// Encrypt and decrypt are exact inverses when both sides start from the
/// same key and process the same call sequence. Every operation takes
/// `&mut self`, so a single instance cannot serve two logical streams at
/// once; run one instance per direction.
pub struct EvolvingKeyCipher {
    /// Key buffer, indexed cyclically and rewritten per processed byte.
    key: Vec<u8>,
    /// Evolving seed; never left at zero by an update step.
    seed: u64,
}

impl std::fmt::Debug for EvolvingKeyCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvolvingKeyCipher")
            .field("key", &"<redacted>")
            .field("seed", &"<redacted>")
            .finish()
    }
}

impl EvolvingKeyCipher {
    /// Create a cipher from a session key of at least [`MIN_KEY_LEN`]
    /// bytes.
    ///
    /// The key is copied into an owned buffer; the caller's slice is
    /// never aliased or mutated. The initial seed is the first 8 key
    /// bytes interpreted as a little-endian unsigned 64-bit integer.
    ///
    /// # Errors
    ///
    /// [`SessionKeyError::InvalidKey`] if the key is shorter than
    /// [`MIN_KEY_LEN`].
    pub fn new(key: &[u8]) -> Result<Self, SessionKeyError> {
        if key.len() < MIN_KEY_LEN {
            return Err(SessionKeyError::InvalidKey { minimum: MIN_KEY_LEN, actual: key.len() });
        }
        let key = key.to_vec();
        let seed = derive_seed(&key);
        Ok(Self { key, seed })
    }

    /// Current seed value.
    ///
    /// Both sides of a synchronized stream observe the same seed
    /// sequence; exposed for diagnostics and state-evolution tests.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Encrypt `payload` in place.
    ///
    /// The key index restarts at zero on every call (the protocol makes
    /// one call per message) while the key buffer contents carry over
    /// from earlier calls, so encrypting the same bytes twice on one
    /// instance produces different ciphertexts. A zero-length payload
    /// leaves the state untouched.
    pub fn encrypt(&mut self, payload: &mut [u8]) {
        for (i, byte) in payload.iter_mut().enumerate() {
            let slot = i % self.key.len();
            *byte ^= self.key[slot];
            *byte = byte.wrapping_add((self.seed >> 56) as u8);
            self.advance(slot);
        }
    }

    /// Decrypt `payload` in place.
    ///
    /// Exact inverse of [`encrypt`](Self::encrypt): the seed pad is
    /// removed before the XOR mask, in the reverse order of encryption.
    /// The state update is identical in both directions, which keeps the
    /// two ends of a stream in lockstep.
    pub fn decrypt(&mut self, payload: &mut [u8]) {
        for (i, byte) in payload.iter_mut().enumerate() {
            let slot = i % self.key.len();
            *byte = byte.wrapping_sub((self.seed >> 56) as u8);
            *byte ^= self.key[slot];
            self.advance(slot);
        }
    }

    /// Advance the seed and rewrite the key byte at `slot`.
    ///
    /// Runs AFTER the output byte is produced: byte `c` is transformed
    /// with the pre-update state, byte `c + 1` sees the post-update
    /// state. If the multiplicative update lands on zero, the seed is
    /// re-derived from the key buffer's current (mutated) contents.
    fn advance(&mut self, slot: usize) {
        let factor = (self.seed >> 8) & 0xFFFF_FFFF;
        let addend = (self.seed >> 40) & 0xFFFF;
        self.seed = self.seed.wrapping_mul(factor).wrapping_add(addend);
        if self.seed == 0 {
            self.seed = derive_seed(&self.key);
        }
        self.key[slot] = (self.seed & 0xFF) as u8;
    }
}

impl Drop for EvolvingKeyCipher {
    fn drop(&mut self) {
        self.key.zeroize();
        self.seed.zeroize();
    }
}

/// Interpret the first 8 bytes of `key` as a little-endian u64.
///
/// Used at construction and by the zero-seed recovery rule, which reads
/// the buffer's current contents rather than the original key.
fn derive_seed(key: &[u8]) -> u64 {
    let mut bytes = [0u8; MIN_KEY_LEN];
    bytes.copy_from_slice(&key[..MIN_KEY_LEN]);
    u64::from_le_bytes(bytes)
}
