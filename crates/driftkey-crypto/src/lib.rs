//! Driftkey Cryptographic Primitives
//!
//! Building blocks for the Driftkey session protocol. Pure functions and
//! self-contained state machines with deterministic outputs; callers
//! provide random bytes so tests stay deterministic.
//!
//! # Key Lifecycle
//!
//! A session starts from a random session key. The key is wrapped under
//! the recipient's RSA public key for transmission, and the same key
//! bytes seed the evolving-key stream cipher that protects all session
//! traffic.
//!
//! ```text
//! Session Key (CSPRNG, 8..=40 bytes)
//!        │
//!        ├── RSA-OAEP(SHA-1) ──► wrapped key, sent to the recipient
//!        ▼
//! Seed = first 8 key bytes (little-endian u64)
//!        │
//!        ▼
//! Evolving-Key Cipher ──► per-byte XOR + pad; seed and key buffer
//!                         mutate after every processed byte
//! ```
//!
//! Both sides of a session construct the cipher from the same key and
//! perform byte-identical state updates; one mismatched step
//! desynchronizes the streams permanently.
//!
//! # Security
//!
//! The stream cipher is a bespoke construction fixed by an existing wire
//! protocol, NOT a vetted cryptographic primitive: its keystream comes
//! from a low-entropy multiplicative update over a short cyclic key.
//! This crate reproduces the arithmetic bit-exactly for interoperability
//! and makes no security claims beyond that. Key material is zeroized on
//! drop, and key generation refuses to use anything but caller-supplied
//! randomness (pass a cryptographically secure generator in production).

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod session_keys;

pub use session_keys::{
    EvolvingKeyCipher, MIN_KEY_LEN, SessionKey, SessionKeyError, wrap_session_key,
};
