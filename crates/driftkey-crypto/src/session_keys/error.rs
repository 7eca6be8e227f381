//! Error types for session key operations

use thiserror::Error;

/// Errors from session key validation, cipher construction, and wrapping.
#[derive(Debug, Error)]
pub enum SessionKeyError {
    /// Key material too short to derive the 64-bit cipher seed
    #[error("invalid session key: need at least {minimum} bytes, got {actual}")]
    InvalidKey {
        /// Minimum accepted key length in bytes
        minimum: usize,
        /// Length that was supplied
        actual: usize,
    },

    /// Recipient public key material could not be parsed
    #[error("invalid recipient key: {reason}")]
    InvalidRecipientKey {
        /// Underlying parse failure
        reason: String,
    },

    /// RSA-OAEP encryption of the session key failed
    #[error("session key wrapping failed: {reason}")]
    WrapFailed {
        /// Underlying encryption failure
        reason: String,
    },
}
