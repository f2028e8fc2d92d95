//! Parameter definitions and validation for RSA key generation.

use thiserror::Error;

/// Configuration for RSA key generation.
///
/// The defaults produce 2048-bit moduli from two 1024-bit primes with the
/// public exponent 65537 and 20 Miller–Rabin rounds per prime. Each prime
/// gets up to 10 000 random candidates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RsaParams {
    /// Size of each prime in bits; the modulus has twice as many.
    pub prime_bits: usize,
    /// Fixed public exponent `a`. Must be odd and at least 3.
    pub public_exponent: u64,
    /// Miller–Rabin rounds per candidate (minimum 20).
    pub mr_rounds: u32,
    /// Random candidates tried per prime before giving up.
    pub max_prime_attempts: u32,
    /// Prime pairs tried before giving up, when `a` has no inverse modulo
    /// `(p-1)(q-1)` or the primes collide.
    pub max_key_attempts: u32,
}

/// Reasons an [`RsaParams`] value is rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamError {
    /// `prime_bits` must be a multiple of 64 in `128..=1024`.
    #[error("prime size must be a multiple of 64 between 128 and 1024 bits")]
    PrimeSize,
    /// The public exponent must be odd and at least 3.
    #[error("public exponent must be odd and at least 3")]
    PublicExponent,
    /// At least 20 Miller–Rabin rounds are required.
    #[error("at least 20 Miller-Rabin rounds are required")]
    TooFewRounds,
    /// Attempt budgets must be at least 1.
    #[error("retry budgets must be at least 1")]
    EmptyBudget,
}

impl RsaParams {
    /// Smallest accepted round count.
    pub const MIN_MR_ROUNDS: u32 = 20;

    pub(crate) fn validate(&self) -> Result<(), ParamError> {
        if !(128..=1024).contains(&self.prime_bits) || self.prime_bits % 64 != 0 {
            return Err(ParamError::PrimeSize);
        }

        if self.public_exponent < 3 || self.public_exponent % 2 == 0 {
            return Err(ParamError::PublicExponent);
        }

        if self.mr_rounds < Self::MIN_MR_ROUNDS {
            return Err(ParamError::TooFewRounds);
        }

        if self.max_prime_attempts == 0 || self.max_key_attempts == 0 {
            return Err(ParamError::EmptyBudget);
        }

        Ok(())
    }

    /// Modulus size in bits.
    pub fn modulus_bits(&self) -> usize {
        2 * self.prime_bits
    }
}

impl Default for RsaParams {
    fn default() -> Self {
        Self {
            prime_bits: 1024,
            public_exponent: 65537,
            mr_rounds: 20,
            max_prime_attempts: 10_000,
            max_key_attempts: 16,
        }
    }
}
