//! RSA key material.
//!
//! Key pairs come from [`KeyPair::generate`] (two random probable primes,
//! fixed public exponent, private exponent by modular inversion) or from
//! key files written by [`KeyPair::to_files`]. Encryption and decryption
//! live in [`crate::encryption::rsa`]; signatures in
//! [`crate::signatures::digital_signature`] and [`crate::signatures::dsa`].

mod codec;
mod core;
mod generate;
mod params;

pub use self::core::{KeyPair, PrivateKey, PublicKey};
pub use params::{ParamError, RsaParams};
