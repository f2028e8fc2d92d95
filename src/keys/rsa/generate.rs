//! Prime search and key assembly.

use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use super::core::{KeyPair, PrivateKey, PublicKey};
use super::params::RsaParams;
use crate::error::{Error, Result};
use crate::primitives::BigInt;
use crate::rng::EntropySource;

/// Draws random odd candidates with the top two bits set until one passes
/// trial division and Miller–Rabin, or the attempt budget runs out.
///
/// Setting the top two bits makes the product of two such primes exactly
/// `2 * prime_bits` bits long.
pub(crate) fn random_prime<R: EntropySource + ?Sized>(params: &RsaParams, rng: &mut R) -> Result<BigInt> {
    let bits = params.prime_bits;

    for attempt in 1..=params.max_prime_attempts {
        let mut candidate = BigInt::random_bits_with(bits, rng)?;
        candidate.set_bit(bits - 1);
        candidate.set_bit(bits - 2);
        candidate.set_bit(0);

        if candidate.is_probable_prime_with(params.mr_rounds, rng)? {
            debug!(bits, attempt, "prime found");
            return Ok(candidate);
        }

        trace!(attempt, "prime candidate rejected");
    }

    warn!(bits, attempts = params.max_prime_attempts, "prime search exhausted");
    Err(Error::KeyGenerationFailed {
        attempts: params.max_prime_attempts,
    })
}

pub(crate) fn key_pair<R: EntropySource + ?Sized>(params: &RsaParams, rng: &mut R) -> Result<KeyPair> {
    params.validate()?;

    let a = BigInt::from_u64(params.public_exponent);

    for attempt in 1..=params.max_key_attempts {
        // Discarded candidates are wiped on every retry path.
        let p = Zeroizing::new(random_prime(params, rng)?);
        let q = Zeroizing::new(random_prime(params, rng)?);

        if *p == *q {
            debug!(attempt, "identical primes drawn, retrying");
            continue;
        }

        let p_1 = Zeroizing::new(p.sub(&BigInt::ONE)?);
        let q_1 = Zeroizing::new(q.sub(&BigInt::ONE)?);
        let phi = Zeroizing::new(p_1.mul(&q_1)?);
        let inverse = a.mod_inverse(&phi);

        let b = match inverse {
            Ok(b) => b,
            Err(Error::NoInverse) => {
                debug!(attempt, "public exponent not invertible, retrying");
                continue;
            }
            Err(err) => return Err(err),
        };

        let n = p.mul(&q)?;
        debug!(bits = n.bits(), attempt, "RSA key pair generated");

        return Ok(KeyPair {
            public: PublicKey::new(n, a)?,
            private: PrivateKey::new((*p).clone(), (*q).clone(), b),
        });
    }

    warn!(attempts = params.max_key_attempts, "RSA key generation exhausted");
    Err(Error::KeyGenerationFailed {
        attempts: params.max_key_attempts,
    })
}
