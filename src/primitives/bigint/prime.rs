//! Random integers and probabilistic primality testing.

use tracing::trace;
use zeroize::Zeroize;

use super::BigInt;
use crate::error::{Error, Result};
use crate::rng::{EntropySource, OsRandom};

/// The first 100 primes, used for trial division before Miller–Rabin.
#[rustfmt::skip]
pub const SMALL_PRIMES: [u64; 100] = [
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37,
    41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151,
    157, 163, 167, 173, 179, 181, 191, 193, 197, 199, 211, 223,
    227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281,
    283, 293, 307, 311, 313, 317, 331, 337, 347, 349, 353, 359,
    367, 373, 379, 383, 389, 397, 401, 409, 419, 421, 431, 433,
    439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503,
    509, 521, 523, 541,
];

/// Below this bound trial division by [`SMALL_PRIMES`] is a complete test.
const TRIAL_DIVISION_LIMIT: u64 = 541 * 541;

/// Outcome of trial division.
enum Sieve {
    Prime,
    Composite,
    Unknown,
}

fn trial_division(n: &BigInt) -> Sieve {
    let small = n.bits() <= 64;
    let value = n.low_u64();

    for &p in SMALL_PRIMES.iter() {
        if small && value == p {
            return Sieve::Prime;
        }
        if n.rem_u64(p) == 0 {
            return Sieve::Composite;
        }
    }

    if small && value < TRIAL_DIVISION_LIMIT {
        return Sieve::Prime;
    }

    Sieve::Unknown
}

impl BigInt {
    /// Uniform random value in `[0, 2^bits)` from the process-wide source.
    pub fn random_bits(bits: usize) -> Result<Self> {
        Self::random_bits_with(bits, &mut OsRandom)
    }

    /// Uniform random value in `[0, 2^bits)` from `rng`.
    ///
    /// Fails with [`Error::InvalidArgument`] when `bits` exceeds the width and
    /// with [`Error::EntropyUnavailable`] when the source fails.
    pub fn random_bits_with<R: EntropySource + ?Sized>(bits: usize, rng: &mut R) -> Result<Self> {
        if bits > Self::BITS {
            return Err(Error::InvalidArgument("random width exceeds 2048 bits"));
        }

        let len = bits.div_ceil(8);
        let mut buf = [0u8; Self::BYTES];
        rng.fill(&mut buf[Self::BYTES - len..])?;

        if bits % 8 != 0 {
            buf[Self::BYTES - len] &= (1u8 << (bits % 8)) - 1;
        }

        let value = Self::from_be_bytes(&buf);
        buf.zeroize();

        value
    }

    /// Uniform random value in `[0, bound)` by rejection sampling.
    pub fn random_below<R: EntropySource + ?Sized>(bound: &Self, rng: &mut R) -> Result<Self> {
        if bound.is_zero() || bound.is_negative() {
            return Err(Error::InvalidArgument("bound must be positive"));
        }

        let bits = bound.bits();
        loop {
            let candidate = Self::random_bits_with(bits, rng)?;
            if candidate < *bound {
                return Ok(candidate);
            }
        }
    }

    /// Miller–Rabin test with bases drawn from the process-wide source.
    ///
    /// Values below 2 are not prime. Values with a factor in
    /// [`SMALL_PRIMES`] (or small enough for trial division to be complete)
    /// are decided without randomness, so answers for them never vary.
    /// For the rest the false-positive rate is at most `4^-rounds`.
    pub fn is_probable_prime(&self, rounds: u32) -> Result<bool> {
        self.is_probable_prime_with(rounds, &mut OsRandom)
    }

    /// Miller–Rabin test with bases drawn from `rng`.
    pub fn is_probable_prime_with<R: EntropySource + ?Sized>(
        &self,
        rounds: u32,
        rng: &mut R,
    ) -> Result<bool> {
        if rounds == 0 {
            return Err(Error::InvalidArgument("at least one Miller-Rabin round required"));
        }
        if self.is_negative() || *self < Self::TWO {
            return Ok(false);
        }

        match trial_division(self) {
            Sieve::Prime => return Ok(true),
            Sieve::Composite => return Ok(false),
            Sieve::Unknown => {}
        }

        // n - 1 = d * 2^s with d odd
        let n_minus_one = self.sub(&Self::ONE)?;
        let s = n_minus_one.trailing_zeros();
        let d = n_minus_one.shr(s);

        // bases in [2, n - 2]
        let span = self.sub(&Self::from_u64(3))?;

        'witness: for round in 0..rounds {
            let a = Self::random_below(&span, rng)?.add(&Self::TWO)?;
            let mut x = a.mod_exp(&d, self)?;

            if x.is_one() || x == n_minus_one {
                continue;
            }

            for _ in 1..s {
                x = x.mod_mul(&x, self)?;
                if x == n_minus_one {
                    continue 'witness;
                }
            }

            trace!(round, "Miller-Rabin witness found");
            return Ok(false);
        }

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::Csprng;

    #[test]
    fn test_small_primes_table_is_prime() {
        let mut rng = Csprng::from_seed([3; 32]);
        for &p in SMALL_PRIMES.iter() {
            assert!(BigInt::from_u64(p).is_probable_prime_with(20, &mut rng).unwrap());
        }
    }

    #[test]
    fn test_trial_division_bound() {
        // 547 is the first prime past the table; 547 * 557 exceeds the bound.
        assert!(matches!(trial_division(&BigInt::from_u64(547)), Sieve::Prime));
        assert!(matches!(trial_division(&BigInt::from_u64(547 * 557)), Sieve::Unknown));
    }

    #[test]
    fn test_random_bits_masks_top_byte() {
        let mut rng = Csprng::from_seed([9; 32]);
        for bits in [1, 7, 9, 63, 1023] {
            let v = BigInt::random_bits_with(bits, &mut rng).unwrap();
            assert!(v.bits() <= bits);
        }
    }
}
