//! Ed25519 signatures (RFC 8032).
//!
//! Field arithmetic over `2²⁵⁵ − 19` in ten limbs, extended-coordinate
//! group law, and scalar arithmetic modulo the group order, structured after
//! the public-domain reference implementation by Orson Peters
//! (<https://github.com/orlp/ed25519>).
//!
//! Signing is deterministic: the nonce is derived from the key's prefix and
//! the message, so the same key and message always give the same signature.
//!
//! Verification fails closed. A signature is rejected, with
//! [`Error::InvalidSignature`] and nothing more specific, when it has the
//! wrong length, when `s` is not below the group order, when the public key
//! does not decode, or when `[s]B ≠ R + [k]A`.

mod constants;
mod field;
pub(crate) mod group;
pub(crate) mod scalar;

use tracing::trace;

use self::group::GeP3;
use self::scalar::Scalar;
use crate::ct::ConstantTimeEq;
use crate::error::{Error, Result};
use crate::hash::Sha512;
use crate::keys::ed25519::{KeyPair, PublicKey};

/// Signature length in bytes.
pub const SIGNATURE_LEN: usize = 64;

/// `R || s`, both little-endian.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Signature([u8; SIGNATURE_LEN]);

impl Signature {
    #[inline]
    pub fn from_bytes(bytes: [u8; SIGNATURE_LEN]) -> Self {
        Self(bytes)
    }

    /// Fails with [`Error::InvalidSignature`] unless `bytes` is 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        bytes.try_into().map(Self).map_err(|_| Error::InvalidSignature)
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; SIGNATURE_LEN] {
        self.0
    }

    fn r_bytes(&self) -> &[u8] {
        &self.0[..32]
    }

    fn s(&self) -> Scalar {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[32..]);
        Scalar(s)
    }
}

/// `SHA-512(parts…) mod ℓ`.
fn hash_to_scalar(parts: &[&[u8]]) -> Scalar {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }

    Scalar::reduce(hasher.finalize())
}

/// Signs `message`.
pub fn sign(message: &[u8], key_pair: &KeyPair) -> Signature {
    let private = &key_pair.private;

    let r = hash_to_scalar(&[private.prefix(), message]);
    let r_bytes = GeP3::from_scalar_mul(&r).to_bytes();

    let k = hash_to_scalar(&[&r_bytes, key_pair.public.as_bytes(), message]);
    let s = Scalar::from_mul_sum(k, *private.scalar(), r);

    let mut signature = [0u8; SIGNATURE_LEN];
    signature[..32].copy_from_slice(&r_bytes);
    signature[32..].copy_from_slice(&s.to_bytes());

    Signature(signature)
}

/// Verifies `signature` over `message` under `public`.
pub fn verify(message: &[u8], signature: &Signature, public: &PublicKey) -> Result<()> {
    let s = signature.s();
    if !s.is_canonical() {
        trace!("Ed25519 signature scalar out of range");
        return Err(Error::InvalidSignature);
    }

    let a = GeP3::decompress(public.as_bytes()).ok_or(Error::InvalidSignature)?;

    let k = hash_to_scalar(&[signature.r_bytes(), public.as_bytes(), message]);

    // [s]B − [k]A must equal R.
    let check = a.neg().double_scalar_mul(&k, &s).to_bytes();

    if check[..].ct_eq(signature.r_bytes()) != 1 {
        return Err(Error::InvalidSignature);
    }

    Ok(())
}

/// Like [`verify`] for a signature of unchecked length.
pub fn verify_slice(message: &[u8], signature: &[u8], public: &PublicKey) -> Result<()> {
    verify(message, &Signature::from_slice(signature)?, public)
}

impl KeyPair {
    /// Signs `message` with this key pair. See [`sign`].
    pub fn sign(&self, message: &[u8]) -> Signature {
        sign(message, self)
    }
}

impl PublicKey {
    /// Verifies `signature` over `message`. See [`verify`].
    pub fn verify(&self, message: &[u8], signature: &Signature) -> Result<()> {
        verify(message, signature, self)
    }
}
