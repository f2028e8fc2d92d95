//! Error types shared by every primitive in the crate.
//!
//! All fallible operations return [`Result`]. Verification failures are
//! reported as [`Error::InvalidSignature`] regardless of whether the input
//! was malformed or simply did not match, so callers cannot learn where a
//! check failed.

use thiserror::Error;

use crate::keys::rsa::ParamError;

/// Errors produced by the cryptographic core.
#[derive(Error, Debug)]
pub enum Error {
    /// An argument was empty, out of range, or of the wrong length.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// The operating system could not supply random bytes.
    #[error("secure randomness unavailable")]
    EntropyUnavailable,

    /// A fixed-width arithmetic result exceeded 2048 bits.
    #[error("arithmetic overflow beyond the fixed integer width")]
    Overflow,

    #[error("division by zero")]
    DivideByZero,

    /// The value has no inverse for the given modulus.
    #[error("no modular inverse exists")]
    NoInverse,

    /// Prime search or key assembly exhausted its retry budget.
    #[error("key generation failed after {attempts} attempts")]
    KeyGenerationFailed { attempts: u32 },

    /// Serialized key material was short, truncated or inconsistent.
    #[error("malformed key data: {0}")]
    MalformedKeyData(&'static str),

    /// An RSA input block is not smaller than the modulus.
    #[error("plaintext too large for modulus")]
    PlaintextTooLarge,

    #[error("invalid signature")]
    InvalidSignature,

    /// Padding or integrity checks failed while decrypting.
    #[error("decryption failed")]
    DecryptionFailed,

    #[error("invalid parameters: {0}")]
    InvalidParams(#[from] ParamError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, Error>;
