//! Session key wrapping under a recipient's RSA public key
//!
//! The wire protocol transmits the session key RSA-OAEP-encrypted with a
//! SHA-1 digest and SHA-1-based MGF1, so the standard `rsa` primitive is
//! configured to match. Unwrapping happens on the remote side and is not
//! implemented here.

use rand::{CryptoRng, RngCore};
use rsa::{Oaep, RsaPublicKey, pkcs8::DecodePublicKey};
use sha1::Sha1;

use super::error::SessionKeyError;
use super::key::SessionKey;

/// Encrypt `session_key` under `recipient_public_key_pem`.
///
/// The recipient key is an SPKI ("BEGIN PUBLIC KEY") PEM string. Returns
/// the wrapped key bytes, sized to the recipient's RSA modulus.
///
/// # Errors
///
/// - [`SessionKeyError::InvalidRecipientKey`] if the PEM does not parse
///   to an RSA public key
/// - [`SessionKeyError::WrapFailed`] if OAEP encryption fails, for
///   example a session key too large for the recipient's modulus
pub fn wrap_session_key<R>(
    rng: &mut R,
    session_key: &SessionKey,
    recipient_public_key_pem: &str,
) -> Result<Vec<u8>, SessionKeyError>
where
    R: RngCore + CryptoRng,
{
    let recipient_key = RsaPublicKey::from_public_key_pem(recipient_public_key_pem)
        .map_err(|e| SessionKeyError::InvalidRecipientKey { reason: e.to_string() })?;

    recipient_key
        .encrypt(rng, Oaep::new::<Sha1>(), session_key.as_bytes())
        .map_err(|e| SessionKeyError::WrapFailed { reason: e.to_string() })
}

#[cfg(test)]
mod tests {
    use std::sync::OnceLock;

    use rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;
    use rsa::RsaPrivateKey;
    use rsa::pkcs8::{EncodePublicKey, LineEnding};

    use super::*;

    /// Shared 2048-bit recipient key; generation is too slow to repeat
    /// per test.
    fn recipient() -> &'static (RsaPrivateKey, String) {
        static RECIPIENT: OnceLock<(RsaPrivateKey, String)> = OnceLock::new();
        RECIPIENT.get_or_init(|| {
            let mut rng = ChaCha20Rng::seed_from_u64(0x5eed);
            let private = RsaPrivateKey::new(&mut rng, 2048).unwrap();
            let pem = private.to_public_key().to_public_key_pem(LineEnding::LF).unwrap();
            (private, pem)
        })
    }

    #[test]
    fn wrap_round_trips_through_recipient_private_key() {
        let (private, pem) = recipient();
        let mut rng = ChaCha20Rng::seed_from_u64(1);
        let key = SessionKey::generate(&mut rng, 16).unwrap();

        let wrapped = wrap_session_key(&mut rng, &key, pem).unwrap();
        assert_eq!(wrapped.len(), 256);
        assert_ne!(wrapped.as_slice(), key.as_bytes());

        let unwrapped = private.decrypt(Oaep::new::<Sha1>(), &wrapped).unwrap();
        assert_eq!(unwrapped.as_slice(), key.as_bytes());
    }

    #[test]
    fn wrapping_is_randomized() {
        let (_, pem) = recipient();
        let mut rng = ChaCha20Rng::seed_from_u64(2);
        let key = SessionKey::generate(&mut rng, 16).unwrap();

        let first = wrap_session_key(&mut rng, &key, pem).unwrap();
        let second = wrap_session_key(&mut rng, &key, pem).unwrap();
        assert_ne!(first, second);
    }

    #[test]
    fn rejects_unparseable_recipient_key() {
        let mut rng = ChaCha20Rng::seed_from_u64(3);
        let key = SessionKey::generate(&mut rng, 16).unwrap();

        let err = wrap_session_key(&mut rng, &key, "not a pem").unwrap_err();
        assert!(matches!(err, SessionKeyError::InvalidRecipientKey { .. }));
    }

    #[test]
    fn oversized_session_key_fails_to_wrap() {
        let (_, pem) = recipient();
        let mut rng = ChaCha20Rng::seed_from_u64(4);
        // OAEP-SHA1 under a 2048-bit modulus caps the payload at
        // 256 - 2 * 20 - 2 = 214 bytes.
        let key = SessionKey::generate(&mut rng, 215).unwrap();

        let err = wrap_session_key(&mut rng, &key, pem).unwrap_err();
        assert!(matches!(err, SessionKeyError::WrapFailed { .. }));
    }
}
