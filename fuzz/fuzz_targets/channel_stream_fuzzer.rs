//! Fuzz target for the duplex secure channel
//!
//! # Strategy
//!
//! - Arbitrary session keys (validated through `SessionKey`)
//! - Arbitrary interleavings of both traffic directions
//!
//! # Invariants
//!
//! - Every sealed message opens to its plaintext on the peer channel
//! - Traffic in one direction never perturbs the other direction

#![no_main]

use arbitrary::Arbitrary;
use driftkey_core::{SecureChannel, SessionKey};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct ChannelScenario {
    key: Vec<u8>,
    /// (direction, payload): true = client-to-server
    traffic: Vec<(bool, Vec<u8>)>,
}

fuzz_target!(|scenario: ChannelScenario| {
    let Ok(key) = SessionKey::from_bytes(scenario.key) else {
        return;
    };

    let mut client = SecureChannel::new(&key);
    let mut server = SecureChannel::new(&key);

    for (client_to_server, message) in &scenario.traffic {
        let mut payload = message.clone();
        if *client_to_server {
            client.seal_outbound(&mut payload);
            server.open_inbound(&mut payload);
        } else {
            server.seal_outbound(&mut payload);
            client.open_inbound(&mut payload);
        }
        assert_eq!(&payload, message, "channel round-trip must recover the plaintext");
    }
});
