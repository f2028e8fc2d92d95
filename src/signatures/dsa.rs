//! RSA signatures computed through the Chinese remainder theorem.
//!
//! Uses the same keys and block layout as
//! [`digital_signature`](super::digital_signature), so either module
//! verifies the other's signatures. Signing splits the exponentiation
//! over the two primes:
//!
//! ```text
//! s_p = d^(b mod p−1) mod p
//! s_q = d^(b mod q−1) mod q
//! s   = s_q + q · ((s_p − s_q) · q⁻¹ mod p)
//! ```
//!
//! which is about four times faster than a full-width exponentiation. A
//! fault in either half would leak a factor of `n`, so every signature is
//! checked against the public key before it is returned.
//!
//! Verification checks the digest region and the zero high region of the
//! recovered block separately, both in constant time.

use tracing::warn;
use zeroize::Zeroizing;

use super::digital_signature::{digest_block, recover_block};
use crate::ct::{ConstantTimeEq, ct_is_zero};
use crate::error::{Error, Result};
use crate::hash::sha256::DIGEST_LEN;
use crate::keys::rsa::{KeyPair, PublicKey};
use crate::primitives::BigInt;

/// Signs `message` using the CRT form of the private key.
pub fn sign(message: &[u8], key_pair: &KeyPair) -> Result<Vec<u8>> {
    let public = &key_pair.public;
    let private = &key_pair.private;
    let k = public.size();

    let block = digest_block(message, k)?;
    let d = BigInt::from_be_bytes(&block)?;

    let (p, q) = (private.p(), private.q());
    let dp = Zeroizing::new(private.exponent().rem_euclid(&p.sub(&BigInt::ONE)?)?);
    let dq = Zeroizing::new(private.exponent().rem_euclid(&q.sub(&BigInt::ONE)?)?);
    let q_inv = Zeroizing::new(q.mod_inverse(p)?);

    let s_p = Zeroizing::new(d.mod_exp(&dp, p)?);
    let s_q = Zeroizing::new(d.mod_exp(&dq, q)?);

    let h = Zeroizing::new(s_p.sub(&s_q)?.mod_mul(&q_inv, p)?);
    let s = q.mul(&h)?.add(&s_q)?;

    if s.mod_exp(public.exponent(), public.modulus())? != d {
        warn!("CRT signature failed its consistency check");
        return Err(Error::MalformedKeyData("private key does not match public key"));
    }

    s.to_be_bytes_padded(k)
}

/// Verifies `signature` over `message` under `public`.
pub fn verify(message: &[u8], signature: &[u8], public: &PublicKey) -> Result<()> {
    let Ok(expected) = digest_block(message, public.size()) else {
        return Err(Error::InvalidSignature);
    };
    let recovered = recover_block(signature, public)?;

    let split = recovered.len() - DIGEST_LEN;
    let high_zero = ct_is_zero(&recovered[..split]);
    let digest_ok = recovered[split..].ct_eq(&expected[split..]);

    if high_zero & digest_ok != 1 {
        return Err(Error::InvalidSignature);
    }

    Ok(())
}
