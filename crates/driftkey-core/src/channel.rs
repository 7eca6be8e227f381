//! Duplex secure channel over one session key
//!
//! The wire protocol runs one evolving-key cipher per direction: both
//! sides construct the pair from the same session key, after which each
//! direction's state evolves only with the traffic it carries. Mixing
//! the directions through a single cipher would desynchronize the
//! streams the moment send and receive interleave.

use driftkey_crypto::{EvolvingKeyCipher, SessionKey};

/// Paired outbound/inbound ciphers for one session.
///
/// This side's outbound stream lines up with the peer's inbound stream
/// and vice versa, because both pairs start from the same session key.
/// Operations take `&mut self`; a channel serves exactly one logical
/// session.
pub struct SecureChannel {
    /// Cipher for traffic this side sends.
    outbound: EvolvingKeyCipher,
    /// Cipher for traffic this side receives.
    inbound: EvolvingKeyCipher,
}

impl SecureChannel {
    /// Build the cipher pair from a validated session key.
    pub fn new(session_key: &SessionKey) -> Self {
        let Ok(outbound) = EvolvingKeyCipher::new(session_key.as_bytes()) else {
            unreachable!("SessionKey guarantees the minimum key length");
        };
        let Ok(inbound) = EvolvingKeyCipher::new(session_key.as_bytes()) else {
            unreachable!("SessionKey guarantees the minimum key length");
        };
        Self { outbound, inbound }
    }

    /// Encrypt an outgoing message in place.
    pub fn seal_outbound(&mut self, payload: &mut [u8]) {
        self.outbound.encrypt(payload);
    }

    /// Decrypt an incoming message in place.
    pub fn open_inbound(&mut self, payload: &mut [u8]) {
        self.inbound.decrypt(payload);
    }
}
