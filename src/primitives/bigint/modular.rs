//! Modular arithmetic: multiplication, exponentiation, inverses.

use zeroize::{Zeroize, Zeroizing};

use super::limbs;
use super::{BigInt, LIMBS, WIDE_LIMBS};
use crate::error::{Error, Result};

/// `a * b mod m` on reduced magnitudes, through a 4096-bit product.
fn mul_reduce(a: &[u64; LIMBS], b: &[u64; LIMBS], m: &[u64; LIMBS]) -> [u64; LIMBS] {
    let mut wide = [0u64; WIDE_LIMBS];
    limbs::mul(&mut wide, a, b);

    let mut quo = [0u64; WIDE_LIMBS];
    let mut rem = [0u64; LIMBS];
    limbs::div_rem(&wide, m, &mut quo, &mut rem);

    rem
}

/// Copies `src` into `dst` when `choice` is 1, without branching on it.
#[inline(always)]
fn conditional_assign(dst: &mut [u64; LIMBS], src: &[u64; LIMBS], choice: u64) {
    let mask = 0u64.wrapping_sub(choice);
    for (d, s) in dst.iter_mut().zip(src) {
        *d ^= (*d ^ *s) & mask;
    }
}

/// Shifts a pair of Euclid terms forward: `older ← newer`, `newer ← next`.
/// The dropped `older` value is wiped first.
fn advance(older: &mut BigInt, newer: &mut BigInt, next: BigInt) {
    std::mem::swap(older, newer);
    newer.zeroize();
    *newer = next;
}

impl BigInt {
    fn check_modulus(m: &Self) -> Result<()> {
        if m.is_zero() {
            return Err(Error::DivideByZero);
        }
        if m.negative {
            return Err(Error::InvalidArgument("modulus must be positive"));
        }

        Ok(())
    }

    /// `self * rhs mod m`, result in `[0, m)`.
    pub fn mod_mul(&self, rhs: &Self, m: &Self) -> Result<Self> {
        Self::check_modulus(m)?;

        let a = self.rem_euclid(m)?;
        let b = rhs.rem_euclid(m)?;

        Ok(Self::from_limbs(mul_reduce(&a.limbs, &b.limbs, &m.limbs), false))
    }

    /// `self ^ exponent mod m` by left-to-right square-and-multiply.
    ///
    /// Every exponent bit costs one squaring and one multiplication, and the
    /// product is kept or discarded with a masked copy, so the exponent's
    /// bits do not select which operations run. This is not fully constant
    /// time: limb multiplication skips leading zero limbs and the division
    /// step has data-dependent quotient corrections.
    ///
    /// `exponent == 0` yields 1 (reduced, so 0 when `m == 1`). A zero modulus
    /// fails with [`Error::DivideByZero`]; negative exponents or moduli with
    /// [`Error::InvalidArgument`].
    pub fn mod_exp(&self, exponent: &Self, m: &Self) -> Result<Self> {
        Self::check_modulus(m)?;
        if exponent.negative {
            return Err(Error::InvalidArgument("negative exponent"));
        }

        let base = self.rem_euclid(m)?;
        let (_, one) = Self::ONE.div_rem(m)?;

        let mut acc = one.limbs;
        for i in (0..exponent.bits()).rev() {
            acc = mul_reduce(&acc, &acc, &m.limbs);
            let product = mul_reduce(&acc, &base.limbs, &m.limbs);
            conditional_assign(&mut acc, &product, exponent.bit(i) as u64);
        }

        Ok(Self::from_limbs(acc, false))
    }

    /// Greatest common divisor of the magnitudes.
    pub fn gcd(&self, rhs: &Self) -> Result<Self> {
        let mut a = self.abs();
        let mut b = rhs.abs();

        while !b.is_zero() {
            let (_, r) = a.div_rem(&b)?;
            a = std::mem::replace(&mut b, r);
        }

        Ok(a)
    }

    /// Inverse of `self` modulo `m` by the extended Euclidean algorithm.
    ///
    /// Returns the unique `x` in `[0, m)` with `self * x ≡ 1 (mod m)`, or
    /// [`Error::NoInverse`] when `gcd(self, m) != 1`.
    pub fn mod_inverse(&self, m: &Self) -> Result<Self> {
        Self::check_modulus(m)?;

        // The remainders carry the modulus (φ during key generation) and the
        // final coefficient is the inverse itself, so every working value is
        // wiped on drop.
        let mut old_r = Zeroizing::new(self.rem_euclid(m)?);
        let mut r = Zeroizing::new(m.clone());
        let mut old_s = Zeroizing::new(Self::ONE);
        let mut s = Zeroizing::new(Self::ZERO);

        // Bezout coefficients stay bounded by m, so none of this overflows.
        while !r.is_zero() {
            let (q, rem) = old_r.div_rem(&r)?;
            let q = Zeroizing::new(q);
            advance(&mut old_r, &mut r, rem);

            let qs = Zeroizing::new(q.mul(&s)?);
            let next = old_s.sub(&qs)?;
            advance(&mut old_s, &mut s, next);
        }

        if !old_r.is_one() {
            return Err(Error::NoInverse);
        }

        old_s.rem_euclid(m)
    }
}
