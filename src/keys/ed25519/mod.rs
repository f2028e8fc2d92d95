//! Ed25519 key material.
//!
//! A private key is a 32-byte seed. Everything else is derived from
//! `SHA-512(seed)` (RFC 8032 §5.1.5): the low half, clamped, is the secret
//! scalar `a`; the high half is the nonce prefix; the public key is the
//! compressed point `a·B`.
//!
//! Signing and verification live in [`crate::signatures::ed25519`]; this
//! module only builds, validates and encodes keys.

mod core;

pub use self::core::{KeyPair, PrivateKey, PublicKey};
