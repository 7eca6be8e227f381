//! Session keys: per-session state for the Driftkey secure channel
//!
//! One session key drives everything a session needs:
//!
//! ```text
//! SessionKey (random, validated length)
//!        │
//!        ├── wrap ──► RSA-OAEP(SHA-1) ciphertext for the recipient
//!        ▼
//! EvolvingKeyCipher (one per direction)
//!        │
//!        ▼ per byte
//! XOR mask + seed pad ──► ciphertext byte; seed and key buffer rewritten
//! ```
//!
//! There is no key schedule separate from the cipher state: the key
//! buffer and the 64-bit seed are rewritten as traffic flows, so the
//! state IS the key.

pub mod cipher;
pub mod error;
pub mod key;
pub mod wrap;

pub use cipher::{EvolvingKeyCipher, MIN_KEY_LEN};
pub use error::SessionKeyError;
pub use key::SessionKey;
pub use wrap::wrap_session_key;
