//! AES-256 block cipher (FIPS-197) with CBC chaining (SP 800-38A).
//!
//! [`Aes256Key`] expands a 32-byte key into 15 round keys once; blocks are
//! then transformed in place with [`Aes256Key::encrypt_block`] and
//! [`Aes256Key::decrypt_block`]. [`encrypt_cbc`] and [`decrypt_cbc`] chain
//! block-aligned data under a caller-supplied IV, which [`iv_construct`]
//! draws from the secure random source.
//!
//! S-box lookups index a table with secret bytes; this implementation is
//! not hardened against cache-timing observers.

mod block;
mod cbc;
mod key;
mod tables;

use crate::error::Result;
use crate::rng::{EntropySource, OsRandom};

pub use cbc::{decrypt_cbc, decrypt_cbc_padded, encrypt_cbc, encrypt_cbc_padded};
pub use key::{Aes256Key, key_expansion};

/// Block size in bytes.
pub const BLOCK_LEN: usize = 16;

/// Key size in bytes.
pub const KEY_LEN: usize = 32;

/// Number of rounds for a 256-bit key.
pub const ROUNDS: usize = 14;

/// Generates a fresh 16-byte IV from the process-wide secure source.
///
/// If no entropy is available the error propagates; there is no fixed or
/// predictable fallback IV.
pub fn iv_construct() -> Result<[u8; BLOCK_LEN]> {
    iv_construct_with(&mut OsRandom)
}

/// Generates a 16-byte IV from `rng`.
pub fn iv_construct_with<R: EntropySource + ?Sized>(rng: &mut R) -> Result<[u8; BLOCK_LEN]> {
    let mut iv = [0u8; BLOCK_LEN];
    rng.fill(&mut iv)?;

    Ok(iv)
}
