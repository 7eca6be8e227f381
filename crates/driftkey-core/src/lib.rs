//! Driftkey session layer
//!
//! Stands up an encrypted session on top of the primitives in
//! [`driftkey_crypto`]: generate a session key, wrap it for the
//! recipient, and run a duplex evolving-key channel over it — the same
//! sequence the wire protocol performs right after its transport
//! handshake.
//!
//! # Components
//!
//! - [`Session`]: establishment flow (generate -> wrap -> channel)
//! - [`SecureChannel`]: independently evolving per-direction ciphers
//! - [`last_session_key`]: synchronized process-wide accessor for the
//!   most recently established session key
//!
//! # Security
//!
//! The channel cipher is a bespoke, interoperability-driven construction
//! and NOT a vetted primitive; see the [`driftkey_crypto`] crate docs.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod channel;
mod session;

pub use channel::SecureChannel;
pub use driftkey_crypto::{EvolvingKeyCipher, MIN_KEY_LEN, SessionKey, SessionKeyError};
pub use session::{DEFAULT_SESSION_KEY_LEN, SESSION_KEY_LEN_RANGE, Session, last_session_key};
