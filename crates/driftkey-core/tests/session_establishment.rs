//! End-to-end establishment tests
//!
//! Walk the full connect sequence the way the wire protocol does it:
//! establish a session, hand the wrapped key to a simulated recipient,
//! let the recipient unwrap it and build the mirror channel, then run
//! traffic both ways.

use std::sync::OnceLock;

use driftkey_core::{
    DEFAULT_SESSION_KEY_LEN, SecureChannel, Session, SessionKey, SessionKeyError,
};
use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use rsa::pkcs8::{EncodePublicKey, LineEnding};
use rsa::{Oaep, RsaPrivateKey};
use sha1::Sha1;

/// Shared 2048-bit recipient key; generation is too slow to repeat per
/// test.
fn recipient() -> &'static (RsaPrivateKey, String) {
    static RECIPIENT: OnceLock<(RsaPrivateKey, String)> = OnceLock::new();
    RECIPIENT.get_or_init(|| {
        let mut rng = ChaCha20Rng::seed_from_u64(0xD21F);
        let private = RsaPrivateKey::new(&mut rng, 2048).unwrap();
        let pem = private.to_public_key().to_public_key_pem(LineEnding::LF).unwrap();
        (private, pem)
    })
}

/// Unwrap the transmitted key the way the remote side would.
fn unwrap_at_recipient(private: &RsaPrivateKey, wrapped: &[u8]) -> SessionKey {
    let bytes = private.decrypt(Oaep::new::<Sha1>(), wrapped).unwrap();
    SessionKey::from_bytes(bytes).unwrap()
}

#[test]
fn wrapped_key_unwraps_to_the_session_key() {
    let (private, pem) = recipient();
    let mut rng = ChaCha20Rng::seed_from_u64(1);

    let session = Session::establish_with_rng(&mut rng, pem, 24).unwrap();
    assert_eq!(session.session_key().as_bytes().len(), 24);

    let unwrapped = unwrap_at_recipient(private, session.wrapped_key());
    assert_eq!(unwrapped.as_bytes(), session.session_key().as_bytes());
}

#[test]
fn established_channel_talks_to_the_recipient_channel() {
    let (private, pem) = recipient();
    let mut rng = ChaCha20Rng::seed_from_u64(2);

    let mut session = Session::establish_with_rng(&mut rng, pem, 16).unwrap();
    let remote_key = unwrap_at_recipient(private, session.wrapped_key());
    let mut remote = SecureChannel::new(&remote_key);

    let mut request = b"LIST /incoming".to_vec();
    session.channel_mut().seal_outbound(&mut request);
    remote.open_inbound(&mut request);
    assert_eq!(request, b"LIST /incoming".to_vec());

    let mut response = b"OK 3 entries".to_vec();
    remote.seal_outbound(&mut response);
    session.channel_mut().open_inbound(&mut response);
    assert_eq!(response, b"OK 3 entries".to_vec());
}

#[test]
fn out_of_range_request_gets_the_default_key_length() {
    let (_, pem) = recipient();
    let mut rng = ChaCha20Rng::seed_from_u64(3);

    let session = Session::establish_with_rng(&mut rng, pem, 1000).unwrap();
    assert_eq!(session.session_key().as_bytes().len(), DEFAULT_SESSION_KEY_LEN);
}

#[test]
fn establishment_fails_on_bad_recipient_key() {
    let mut rng = ChaCha20Rng::seed_from_u64(4);
    let err = Session::establish_with_rng(&mut rng, "garbage", 16).unwrap_err();
    assert!(matches!(err, SessionKeyError::InvalidRecipientKey { .. }));
}

#[test]
fn os_rng_establishment_works() {
    let (private, pem) = recipient();

    let mut session = Session::establish(pem, 16).unwrap();
    let remote_key = unwrap_at_recipient(private, session.wrapped_key());
    let mut remote = SecureChannel::new(&remote_key);

    let mut payload = b"system entropy".to_vec();
    session.channel_mut().seal_outbound(&mut payload);
    remote.open_inbound(&mut payload);
    assert_eq!(payload, b"system entropy".to_vec());
}

#[test]
fn into_channel_keeps_working_state() {
    let (private, pem) = recipient();
    let mut rng = ChaCha20Rng::seed_from_u64(5);

    let session = Session::establish_with_rng(&mut rng, pem, 16).unwrap();
    let remote_key = unwrap_at_recipient(private, session.wrapped_key());
    let mut remote = SecureChannel::new(&remote_key);

    let mut channel = session.into_channel();
    let mut payload = b"after handover".to_vec();
    channel.seal_outbound(&mut payload);
    remote.open_inbound(&mut payload);
    assert_eq!(payload, b"after handover".to_vec());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_conversations_round_trip(
        rng_seed in any::<u64>(),
        messages in prop::collection::vec(prop::collection::vec(any::<u8>(), 0..300), 1..6),
    ) {
        let (private, pem) = recipient();
        let mut rng = ChaCha20Rng::seed_from_u64(rng_seed);

        let mut session = Session::establish_with_rng(&mut rng, pem, 32).unwrap();
        let remote_key = unwrap_at_recipient(private, session.wrapped_key());
        let mut remote = SecureChannel::new(&remote_key);

        for (i, message) in messages.iter().enumerate() {
            let mut payload = message.clone();
            if i % 2 == 0 {
                session.channel_mut().seal_outbound(&mut payload);
                remote.open_inbound(&mut payload);
            } else {
                remote.seal_outbound(&mut payload);
                session.channel_mut().open_inbound(&mut payload);
            }
            prop_assert_eq!(&payload, message);
        }
    }
}
