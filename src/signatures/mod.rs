//! Digital signature schemes.
//!
//! Each submodule implements one scheme end to end and defines its own
//! signing and verification rules; there is no shared signature trait.
//!
//! - [`ed25519`]: RFC 8032 Ed25519 over Curve25519.
//! - [`digital_signature`]: SHA-256 digest signed with the RSA private
//!   exponent.
//! - [`dsa`]: the same RSA signatures computed through the Chinese
//!   remainder theorem, verified region by region.
//!
//! Verification in every scheme returns [`crate::Error::InvalidSignature`]
//! for any failure, without saying which check rejected the input.

pub mod digital_signature;
pub mod dsa;
pub mod ed25519;
