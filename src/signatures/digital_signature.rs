//! Hash-then-sign with RSA and SHA-256.
//!
//! The SHA-256 digest of the message is placed in the low 32 bytes of an
//! otherwise zero block as long as the modulus (`k` bytes). Read big-endian,
//! that block is an integer below `n`, and the signature is
//! `block^b mod n` serialized to exactly `k` bytes.
//!
//! Verification recovers `sig^a mod n`, rebuilds the expected block and
//! compares all `k` bytes in constant time. Every failure, malformed or
//! mismatched, is reported as [`Error::InvalidSignature`].

use tracing::trace;

use crate::ct::ConstantTimeEq;
use crate::error::{Error, Result};
use crate::hash::sha256::{DIGEST_LEN, sha256};
use crate::keys::rsa::{KeyPair, PublicKey};
use crate::primitives::BigInt;

/// The `k`-byte block holding the digest of `message` in its low bytes.
pub(super) fn digest_block(message: &[u8], k: usize) -> Result<Vec<u8>> {
    if message.is_empty() {
        return Err(Error::InvalidArgument("message must not be empty"));
    }
    if k <= DIGEST_LEN {
        return Err(Error::InvalidArgument("modulus too small for a SHA-256 digest"));
    }

    let mut block = vec![0u8; k];
    block[k - DIGEST_LEN..].copy_from_slice(&sha256(message));

    Ok(block)
}

/// Parses a `k`-byte signature as an integer below `n`, then recovers the
/// signed block `sig^a mod n` as `k` bytes.
pub(super) fn recover_block(signature: &[u8], public: &PublicKey) -> Result<Vec<u8>> {
    let k = public.size();
    if signature.len() != k {
        return Err(Error::InvalidSignature);
    }

    let s = BigInt::from_be_bytes(signature).map_err(|_| Error::InvalidSignature)?;
    if s >= *public.modulus() {
        return Err(Error::InvalidSignature);
    }

    s.mod_exp(public.exponent(), public.modulus())?
        .to_be_bytes_padded(k)
        .map_err(|_| Error::InvalidSignature)
}

/// Signs `message` with the private half of `key_pair`.
///
/// Fails with [`Error::InvalidArgument`] for an empty message or a modulus
/// not longer than the digest.
pub fn sign(message: &[u8], key_pair: &KeyPair) -> Result<Vec<u8>> {
    let public = &key_pair.public;
    let block = digest_block(message, public.size())?;

    let m = BigInt::from_be_bytes(&block)?;
    let s = m.mod_exp(key_pair.private.exponent(), public.modulus())?;

    s.to_be_bytes_padded(public.size())
}

/// Verifies `signature` over `message` under `public`.
pub fn verify(message: &[u8], signature: &[u8], public: &PublicKey) -> Result<()> {
    let Ok(expected) = digest_block(message, public.size()) else {
        return Err(Error::InvalidSignature);
    };
    let recovered = recover_block(signature, public)?;

    if recovered[..].ct_eq(&expected[..]) != 1 {
        trace!("RSA signature mismatch");
        return Err(Error::InvalidSignature);
    }

    Ok(())
}
