//! Encryption primitives.
//!
//! - [`aes256`]: the AES-256 block cipher with CBC chaining.
//! - [`rsa`]: RSA block encryption, raw and with OAEP padding.

pub mod aes256;
pub mod rsa;
