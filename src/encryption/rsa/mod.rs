//! RSA encryption and decryption.
//!
//! [`enc`] and [`dec`] are raw (textbook) RSA on a single integer block:
//! `c = m^a mod n` and `m = c^b mod n`. They add no padding and are only
//! safe for uniformly random inputs such as wrapped keys. [`oaep_encrypt`]
//! and [`oaep_decrypt`] add RSAES-OAEP padding (SHA-256, MGF1-SHA-256)
//! for arbitrary short messages.

mod oaep;

use crate::error::{Error, Result};
use crate::keys::rsa::{PrivateKey, PublicKey};
use crate::primitives::BigInt;

pub use oaep::{oaep_decrypt, oaep_encrypt, oaep_encrypt_with};

fn check_block(block: &BigInt, n: &BigInt) -> Result<()> {
    if block.is_negative() {
        return Err(Error::InvalidArgument("RSA block must be non-negative"));
    }
    if block >= n {
        return Err(Error::PlaintextTooLarge);
    }

    Ok(())
}

/// Encrypts the block `m` under `public`. Requires `0 <= m < n`.
pub fn enc(m: &BigInt, public: &PublicKey) -> Result<BigInt> {
    check_block(m, public.modulus())?;

    m.mod_exp(public.exponent(), public.modulus())
}

/// Decrypts the block `c`. Requires `0 <= c < n`.
pub fn dec(c: &BigInt, public: &PublicKey, private: &PrivateKey) -> Result<BigInt> {
    check_block(c, public.modulus())?;

    c.mod_exp(private.exponent(), public.modulus())
}
