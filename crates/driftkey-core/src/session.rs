//! Session establishment
//!
//! Mirrors the protocol's connect sequence after the transport
//! handshake: generate a session key, wrap it under the recipient's RSA
//! public key for transmission, and stand up the duplex channel that
//! protects all subsequent traffic.

use std::ops::RangeInclusive;
use std::sync::{Mutex, PoisonError};

use driftkey_crypto::{SessionKey, SessionKeyError, wrap_session_key};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

use crate::channel::SecureChannel;

/// Session key lengths the protocol accepts, in bytes.
pub const SESSION_KEY_LEN_RANGE: RangeInclusive<usize> = 16..=40;

/// Key length used when a request falls outside
/// [`SESSION_KEY_LEN_RANGE`].
pub const DEFAULT_SESSION_KEY_LEN: usize = 16;

/// Most recently established session key.
///
/// Protocol code outside the session layer reads the original session
/// key back after establishment, so the slot is process-wide by design.
/// Every establishment overwrites it; the mutex makes cross-thread
/// establishment safe.
static LAST_SESSION_KEY: Mutex<Option<SessionKey>> = Mutex::new(None);

/// An established session: the key, its wrapped form, and the channel.
pub struct Session {
    /// Session key both sides derive their cipher state from.
    session_key: SessionKey,
    /// Session key encrypted under the recipient's RSA key, ready for
    /// transmission.
    wrapped_key: Vec<u8>,
    /// Duplex cipher pair for session traffic.
    channel: SecureChannel,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("session_key", &"<redacted>")
            .field("wrapped_key", &self.wrapped_key)
            .field("channel", &"<channel>")
            .finish()
    }
}

impl Session {
    /// Establish a session using the operating system's secure RNG.
    ///
    /// Production entry point; see [`Session::establish_with_rng`].
    ///
    /// # Errors
    ///
    /// Propagates [`SessionKeyError`] from key wrapping.
    pub fn establish(
        recipient_public_key_pem: &str,
        requested_key_len: usize,
    ) -> Result<Self, SessionKeyError> {
        Self::establish_with_rng(&mut OsRng, recipient_public_key_pem, requested_key_len)
    }

    /// Establish a session with a caller-provided randomness source.
    ///
    /// Requested key lengths outside [`SESSION_KEY_LEN_RANGE`] fall back
    /// to [`DEFAULT_SESSION_KEY_LEN`]. The generated key is wrapped
    /// under `recipient_public_key_pem` (RSA-OAEP with SHA-1) and
    /// recorded in the process-wide slot read by [`last_session_key`].
    ///
    /// # Errors
    ///
    /// Propagates [`SessionKeyError`] from key wrapping; generation
    /// itself cannot fail once the length is clamped.
    pub fn establish_with_rng<R>(
        rng: &mut R,
        recipient_public_key_pem: &str,
        requested_key_len: usize,
    ) -> Result<Self, SessionKeyError>
    where
        R: RngCore + CryptoRng,
    {
        let key_len = clamp_key_len(requested_key_len);
        let session_key = SessionKey::generate(rng, key_len)?;
        tracing::debug!(key_len, "session key generated");

        let wrapped_key = wrap_session_key(rng, &session_key, recipient_public_key_pem)?;
        tracing::debug!(wrapped_len = wrapped_key.len(), "session key wrapped for recipient");

        let channel = SecureChannel::new(&session_key);
        record_last_session_key(&session_key);

        Ok(Self { session_key, wrapped_key, channel })
    }

    /// The session key this session's cipher state derives from.
    pub fn session_key(&self) -> &SessionKey {
        &self.session_key
    }

    /// The wrapped session key to transmit to the recipient.
    pub fn wrapped_key(&self) -> &[u8] {
        &self.wrapped_key
    }

    /// The duplex channel protecting session traffic.
    pub fn channel_mut(&mut self) -> &mut SecureChannel {
        &mut self.channel
    }

    /// Consume the session, keeping only the channel.
    ///
    /// For callers that have transmitted the wrapped key and no longer
    /// need the session key itself; the key is zeroized on drop.
    pub fn into_channel(self) -> SecureChannel {
        self.channel
    }
}

/// Clamp a requested key length to the protocol interval.
///
/// Out-of-range requests fall back to the default rather than erroring;
/// the interval is a protocol constant, not a caller contract.
fn clamp_key_len(requested: usize) -> usize {
    if SESSION_KEY_LEN_RANGE.contains(&requested) { requested } else { DEFAULT_SESSION_KEY_LEN }
}

/// Overwrite the process-wide last-session-key slot.
fn record_last_session_key(key: &SessionKey) {
    let mut slot = LAST_SESSION_KEY.lock().unwrap_or_else(PoisonError::into_inner);
    *slot = Some(key.clone());
}

/// The session key of the most recently established session, if any.
///
/// Shared mutable state by design: every establishment overwrites the
/// slot, whichever thread it runs on. The returned value is a clone;
/// dropping it does not affect live sessions.
pub fn last_session_key() -> Option<SessionKey> {
    LAST_SESSION_KEY.lock().unwrap_or_else(PoisonError::into_inner).clone()
}
