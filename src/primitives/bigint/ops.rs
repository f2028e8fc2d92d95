//! Checked signed arithmetic.

use std::cmp::Ordering;
use std::ops::Neg;

use super::limbs;
use super::{BigInt, LIMBS, WIDE_LIMBS};
use crate::error::{Error, Result};

impl BigInt {
    /// `self + rhs`, or [`Error::Overflow`] if the magnitude exceeds 2048 bits.
    pub fn add(&self, rhs: &Self) -> Result<Self> {
        if self.negative == rhs.negative {
            let mut sum = self.limbs;
            if limbs::add_assign(&mut sum, &rhs.limbs) != 0 {
                return Err(Error::Overflow);
            }

            return Ok(Self::from_limbs(sum, self.negative));
        }

        // Opposite signs: subtract the smaller magnitude from the larger.
        let (big, small) = match limbs::cmp(&self.limbs, &rhs.limbs) {
            Ordering::Less => (rhs, self),
            _ => (self, rhs),
        };

        let mut diff = big.limbs;
        limbs::sub_assign(&mut diff, &small.limbs);

        Ok(Self::from_limbs(diff, big.negative))
    }

    /// `self - rhs`, or [`Error::Overflow`] if the magnitude exceeds 2048 bits.
    pub fn sub(&self, rhs: &Self) -> Result<Self> {
        self.add(&-rhs)
    }

    /// `self * rhs`, or [`Error::Overflow`] if the product needs more than
    /// 2048 bits.
    pub fn mul(&self, rhs: &Self) -> Result<Self> {
        let mut wide = [0u64; WIDE_LIMBS];
        limbs::mul(&mut wide, &self.limbs, &rhs.limbs);

        Self::from_wide(&wide, self.negative != rhs.negative)
    }

    /// Truncating division: the quotient rounds toward zero and the
    /// remainder takes the sign of `self`.
    pub fn div_rem(&self, rhs: &Self) -> Result<(Self, Self)> {
        if rhs.is_zero() {
            return Err(Error::DivideByZero);
        }

        let mut quo = [0u64; LIMBS];
        let mut rem = [0u64; LIMBS];
        limbs::div_rem(&self.limbs, &rhs.limbs, &mut quo, &mut rem);

        Ok((
            Self::from_limbs(quo, self.negative != rhs.negative),
            Self::from_limbs(rem, self.negative),
        ))
    }

    /// Least non-negative residue of `self` modulo `|m|`.
    pub fn rem_euclid(&self, m: &Self) -> Result<Self> {
        let (_, r) = self.div_rem(m)?;

        if r.negative {
            return r.add(&m.abs());
        }

        Ok(r)
    }

    /// Remainder of the magnitude modulo a small non-zero divisor.
    pub(crate) fn rem_u64(&self, d: u64) -> u64 {
        limbs::rem_limb(&self.limbs, d)
    }

    /// Shifts the magnitude left, failing if any set bit would be lost.
    pub fn shl(&self, bits: usize) -> Result<Self> {
        if self.is_zero() {
            return Ok(Self::ZERO);
        }
        if self.bits() + bits > Self::BITS {
            return Err(Error::Overflow);
        }

        let words = bits / 64;
        let mut out = [0u64; LIMBS];
        out[words..].copy_from_slice(&self.limbs[..LIMBS - words]);
        limbs::shl_small(&mut out, (bits % 64) as u32);

        Ok(Self::from_limbs(out, self.negative))
    }

    /// Shifts the magnitude right, discarding low bits.
    pub fn shr(&self, bits: usize) -> Self {
        if bits >= Self::BITS {
            return Self::ZERO;
        }

        let words = bits / 64;
        let mut out = [0u64; LIMBS];
        out[..LIMBS - words].copy_from_slice(&self.limbs[words..]);
        limbs::shr_small(&mut out, (bits % 64) as u32);

        Self::from_limbs(out, self.negative)
    }

    /// Number of trailing zero bits of the magnitude (0 for zero).
    pub fn trailing_zeros(&self) -> usize {
        self.limbs
            .iter()
            .position(|&l| l != 0)
            .map_or(0, |i| 64 * i + self.limbs[i].trailing_zeros() as usize)
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt::from_limbs(self.limbs, !self.negative)
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        -&self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signed_add_crosses_zero() {
        let a = BigInt::from_u64(5);
        let b = -BigInt::from_u64(8);

        assert_eq!(a.add(&b).unwrap(), -BigInt::from_u64(3));
        assert_eq!(b.add(&a).unwrap(), -BigInt::from_u64(3));
        assert_eq!(a.add(&-&a).unwrap(), BigInt::ZERO);
        assert!(!a.add(&-&a).unwrap().is_negative());
    }

    #[test]
    fn test_rem_euclid_of_negative() {
        let a = -BigInt::from_u64(7);
        let m = BigInt::from_u64(5);

        assert_eq!(a.rem_euclid(&m).unwrap(), BigInt::from_u64(3));
    }

    #[test]
    fn test_shift_round_trip() {
        let a = BigInt::from_u64(0xdead_beef);
        let shifted = a.shl(1000).unwrap();

        assert_eq!(shifted.bits(), 1032);
        assert_eq!(shifted.trailing_zeros(), 1000);
        assert_eq!(shifted.shr(1000), a);
    }
}
