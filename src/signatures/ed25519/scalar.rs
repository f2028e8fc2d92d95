//! Arithmetic modulo the group order
//! `ℓ = 2²⁵² + 27742317777372353535851937790883648493`.
//!
//! Scalars are 32 little-endian bytes. Internally, reduction works on
//! signed 21-bit limbs: a 512-bit input spans 24 of them, and the limbs at
//! position 12 and above are folded down with
//!
//! ```text
//! 2²⁵² ≡ −27742317777372353535851937790883648493 (mod ℓ)
//! ```
//!
//! whose 21-bit signed digits are the six coefficients in `FOLD`.
//!
//! [`Scalar::reduce`] and [`Scalar::from_mul_sum`] are constant time and
//! safe for secret scalars. [`Scalar::slide`] is not and must only see
//! public values.

use std::array;

use zeroize::Zeroize;

const LIMB_BITS: usize = 21;
const LIMB_MASK: u64 = (1 << LIMB_BITS) - 1;

/// Signed 21-bit digits of `−(ℓ − 2²⁵²)`.
const FOLD: [i64; 6] = [666_643, 470_296, 654_183, -997_805, 136_657, -683_901];

/// `ℓ` in little-endian bytes.
const ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

/// Splits little-endian bytes into `N` 21-bit limbs; the last limb keeps
/// every remaining bit.
fn load_limbs<const N: usize>(bytes: &[u8]) -> [i64; N] {
    array::from_fn(|i| {
        let bit = LIMB_BITS * i;
        let window = bytes[bit / 8..]
            .iter()
            .take(8)
            .enumerate()
            .fold(0u64, |acc, (k, &b)| acc | ((b as u64) << (8 * k)));
        let value = window >> (bit % 8);

        if i == N - 1 {
            value as i64
        } else {
            (value & LIMB_MASK) as i64
        }
    })
}

/// Rounded carry from limb `index` into `index + 1`.
#[inline(always)]
fn carry_rounded(s: &mut [i64; 24], index: usize) {
    let c = (s[index] + (1 << (LIMB_BITS - 1))) >> LIMB_BITS;
    s[index + 1] += c;
    s[index] -= c << LIMB_BITS;
}

/// Exact (floor) carry from limb `index` into `index + 1`.
#[inline(always)]
fn carry_exact(s: &mut [i64; 24], index: usize) {
    let c = s[index] >> LIMB_BITS;
    s[index + 1] += c;
    s[index] -= c << LIMB_BITS;
}

/// Adds `s[index] · 2^(21·index)` back in at `index − 12` via [`FOLD`].
#[inline(always)]
fn fold(s: &mut [i64; 24], index: usize) {
    let high = s[index];
    for (j, coeff) in FOLD.iter().enumerate() {
        s[index - 12 + j] += high * coeff;
    }
    s[index] = 0;
}

/// Reduces 24 limbs (at most ~2⁵¹² in magnitude, carried) modulo `ℓ`.
fn reduce_limbs(mut s: [i64; 24]) -> Scalar {
    for index in (18..=23).rev() {
        fold(&mut s, index);
    }

    for index in [6, 8, 10, 12, 14, 16, 7, 9, 11, 13, 15] {
        carry_rounded(&mut s, index);
    }

    for index in (12..=17).rev() {
        fold(&mut s, index);
    }

    for index in [0, 2, 4, 6, 8, 10, 1, 3, 5, 7, 9, 11] {
        carry_rounded(&mut s, index);
    }

    fold(&mut s, 12);
    for index in 0..12 {
        carry_exact(&mut s, index);
    }

    fold(&mut s, 12);
    for index in 0..11 {
        carry_exact(&mut s, index);
    }

    Scalar(pack(&s))
}

/// Packs the twelve low limbs into 32 little-endian bytes.
fn pack(s: &[i64; 24]) -> [u8; 32] {
    let mut out = [0u8; 32];
    let mut acc = 0u64;
    let mut acc_bits = 0;
    let mut at = 0;

    for &limb in &s[..12] {
        acc |= (limb as u64) << acc_bits;
        acc_bits += LIMB_BITS;

        while acc_bits >= 8 {
            out[at] = acc as u8;
            acc >>= 8;
            acc_bits -= 8;
            at += 1;
        }
    }

    // 252 bits leave the top nibble pending.
    out[at] = acc as u8;

    out
}

/// A scalar as 32 little-endian bytes.
///
/// Values are not implicitly reduced; [`Scalar::reduce`] and
/// [`Scalar::from_mul_sum`] always return values below `ℓ`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Zeroize)]
pub(crate) struct Scalar(pub(crate) [u8; 32]);

impl Scalar {
    #[cfg(test)]
    pub(crate) const ONE: Self = {
        let mut bytes = [0u8; 32];
        bytes[0] = 1;
        Scalar(bytes)
    };

    pub(crate) fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Reduces a 512-bit little-endian value (a SHA-512 digest) mod `ℓ`.
    pub(crate) fn reduce(wide: [u8; 64]) -> Self {
        reduce_limbs(load_limbs::<24>(&wide))
    }

    /// Computes `a · b + c mod ℓ`.
    pub(crate) fn from_mul_sum(a: Scalar, b: Scalar, c: Scalar) -> Self {
        let a = load_limbs::<12>(&a.0);
        let b = load_limbs::<12>(&b.0);
        let c = load_limbs::<12>(&c.0);

        let mut s = [0i64; 24];
        s[..12].copy_from_slice(&c);

        for (i, &ai) in a.iter().enumerate() {
            for (j, &bj) in b.iter().enumerate() {
                s[i + j] += ai * bj;
            }
        }

        for index in [0, 2, 4, 6, 8, 10, 12, 14, 16, 18, 20, 22] {
            carry_rounded(&mut s, index);
        }
        for index in [1, 3, 5, 7, 9, 11, 13, 15, 17, 19, 21] {
            carry_rounded(&mut s, index);
        }

        reduce_limbs(s)
    }

    /// True when the value is strictly below `ℓ`. Runs in constant time.
    pub(crate) fn is_canonical(&self) -> bool {
        // Borrow out of `self − ℓ`, most significant byte decides last.
        let mut borrow = 0i16;
        for (&x, &l) in self.0.iter().zip(ORDER.iter()) {
            borrow = ((x as i16) - (l as i16) + borrow) >> 8;
        }

        borrow != 0
    }

    /// Signed sliding-window recoding with odd digits in `[−15, 15]`.
    ///
    /// Variable time; only for public scalars during verification.
    pub(crate) fn slide(&self) -> Slide {
        let mut r: Slide = array::from_fn(|index| ((self.0[index >> 3] >> (index & 7)) & 1) as i8);

        for index in 0..256 {
            if r[index] == 0 {
                continue;
            }

            for b in 1..=6 {
                if index + b >= 256 {
                    break;
                }
                if r[index + b] == 0 {
                    continue;
                }

                let rb = (r[index + b] as i32) << b;
                let ri = r[index] as i32;

                if ri + rb <= 15 {
                    r[index] = (ri + rb) as i8;
                    r[index + b] = 0;
                } else if ri - rb >= -15 {
                    r[index] = (ri - rb) as i8;

                    for v in r.iter_mut().skip(index + b) {
                        if *v == 0 {
                            *v = 1;
                            break;
                        }
                        *v = 0;
                    }
                } else {
                    break;
                }
            }
        }

        r
    }
}

pub(crate) type Slide = [i8; 256];

#[cfg(test)]
mod tests {
    use super::*;

    fn small(v: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&v.to_le_bytes());
        Scalar(bytes)
    }

    #[test]
    fn test_reduce_order_is_zero() {
        let mut wide = [0u8; 64];
        wide[..32].copy_from_slice(&ORDER);

        assert_eq!(Scalar::reduce(wide), Scalar([0; 32]));
    }

    #[test]
    fn test_reduce_small_is_identity() {
        let mut wide = [0u8; 64];
        wide[..8].copy_from_slice(&123_456_789u64.to_le_bytes());

        assert_eq!(Scalar::reduce(wide), small(123_456_789));
    }

    #[test]
    fn test_mul_sum_small() {
        let r = Scalar::from_mul_sum(small(1_000_003), small(999_983), small(17));
        assert_eq!(r, small(1_000_003 * 999_983 + 17));
    }

    #[test]
    fn test_mul_sum_wraps() {
        // (ℓ − 1) · 1 + 1 = ℓ ≡ 0
        let mut minus_one = ORDER;
        minus_one[0] -= 1;

        let r = Scalar::from_mul_sum(Scalar(minus_one), Scalar::ONE, Scalar::ONE);
        assert_eq!(r, Scalar([0; 32]));
    }

    #[test]
    fn test_is_canonical() {
        let mut below = ORDER;
        below[0] -= 1;

        assert!(Scalar(below).is_canonical());
        assert!(!Scalar(ORDER).is_canonical());
        assert!(!Scalar([0xff; 32]).is_canonical());
        assert!(Scalar([0; 32]).is_canonical());
    }

    #[test]
    fn test_slide_reconstructs_value() {
        let s = small(0xdead_beef_1234);
        let digits = s.slide();

        let value: i128 = digits
            .iter()
            .enumerate()
            .take(64)
            .map(|(i, &d)| (d as i128) << i)
            .sum();
        assert_eq!(value, 0xdead_beef_1234);
        assert!(digits.iter().all(|&d| d == 0 || (d % 2 != 0 && (-15..=15).contains(&d))));
    }
}
