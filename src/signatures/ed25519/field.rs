//! Arithmetic in the prime field 𝔽ₚ, `p = 2²⁵⁵ − 19`.
//!
//! ## Representation
//!
//! Field elements are 10 signed 32-bit limbs in radix 2²⁵·⁵, alternating
//! 26 and 25 bits:
//!
//! ```text
//! [26, 25, 26, 25, 26, 25, 26, 25, 26, 25] bits
//! ```
//!
//! Additions, subtractions and negations do not reduce; multiplication
//! accepts their slightly oversized limbs and brings the result back within
//! bounds. Only [`FieldElement::to_bytes`] produces a fully reduced value.
//!
//! Every operation here runs in constant time with respect to its inputs.

use std::array;
use std::ops::{Add, Mul, Neg, Sub};

/// Multiplies two limbs with explicit promotion to `i64`.
macro_rules! mul {
    ($a:expr, $b:expr) => {
        ($a as i64) * ($b as i64)
    };
}

/// Loads 3 little-endian bytes.
#[inline(always)]
pub(crate) fn load_3(input: &[u8]) -> u64 {
    (input[0] as u64) | ((input[1] as u64) << 8) | ((input[2] as u64) << 16)
}

/// Loads 4 little-endian bytes.
#[inline(always)]
pub(crate) fn load_4(input: &[u8]) -> u64 {
    (input[0] as u64)
        | ((input[1] as u64) << 8)
        | ((input[2] as u64) << 16)
        | ((input[3] as u64) << 24)
}

/// Bit width of limb `index`.
#[inline(always)]
const fn limb_bits(index: usize) -> u32 {
    if index % 2 == 0 { 26 } else { 25 }
}

/// Rounded carry out of limb `index` into the next one; the carry out of
/// limb 9 wraps into limb 0 multiplied by 19, since `2²⁵⁵ ≡ 19`.
#[inline(always)]
fn carry(h: &mut [i64; 10], index: usize) {
    let bits = limb_bits(index);
    let c = (h[index] + (1i64 << (bits - 1))) >> bits;
    h[index] -= c << bits;

    if index == 9 {
        h[0] += c * 19;
    } else {
        h[index + 1] += c;
    }
}

/// Field element modulo `2²⁵⁵ − 19`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct FieldElement(pub(crate) [i32; 10]);

impl FieldElement {
    pub(crate) const ZERO: Self = FieldElement([0; 10]);

    pub(crate) const ONE: Self = FieldElement([1, 0, 0, 0, 0, 0, 0, 0, 0, 0]);

    /// Replaces `self` with `rhs` when `condition == 1`, leaves it when 0.
    pub(crate) fn conditional_move(&mut self, rhs: &Self, condition: u32) {
        let mask = -(condition as i32);

        for (s, r) in self.0.iter_mut().zip(rhs.0.iter()) {
            *s ^= (*s ^ r) & mask;
        }
    }

    /// Decodes 32 little-endian bytes. The top bit is ignored; values in
    /// `[p, 2²⁵⁵)` are accepted and reduced by later arithmetic.
    pub(crate) fn from_bytes(input: &[u8; 32]) -> FieldElement {
        // (byte offset, load size, left shift)
        let load_configs = [
            (0, 4, 0),
            (4, 3, 6),
            (7, 3, 5),
            (10, 3, 3),
            (13, 3, 2),
            (16, 4, 0),
            (20, 3, 7),
            (23, 3, 5),
            (26, 3, 4),
            (29, 3, 2),
        ];

        let mut h = [0i64; 10];
        for (index, &(offset, size, shift)) in load_configs.iter().enumerate() {
            let mut value = if size == 4 {
                load_4(&input[offset..])
            } else {
                load_3(&input[offset..])
            };

            if index == 9 {
                value &= 0x7f_ffff;
            }

            h[index] = (value << shift) as i64;
        }

        for index in [9, 1, 3, 5, 7, 0, 2, 4, 6, 8] {
            carry(&mut h, index);
        }

        FieldElement(h.map(|x| x as i32))
    }

    /// Encodes the canonical (fully reduced) 32-byte little-endian form.
    pub(crate) fn to_bytes(self) -> [u8; 32] {
        let mut h = self.0.map(|x| x as i64);

        // q = floor(h / p), which is 0 or 1 for limbs within bounds
        let mut q = (19 * h[9] + (1i64 << 24)) >> 25;
        for (index, limb) in h.iter().enumerate() {
            q = (limb + q) >> limb_bits(index);
        }

        h[0] += 19 * q;

        // Exact carries in order; the carry out of limb 9 is the 2²⁵⁵ bit
        // and is dropped.
        for index in 0..10 {
            let bits = limb_bits(index);
            let c = h[index] >> bits;
            h[index] -= c << bits;

            if index < 9 {
                h[index + 1] += c;
            }
        }

        // Limb `index` starts at bit ceil(25.5 * index).
        let mut out = [0u8; 32];
        let mut acc: u64 = 0;
        let mut acc_bits = 0u32;
        let mut at = 0;

        for (index, &limb) in h.iter().enumerate() {
            acc |= (limb as u64) << acc_bits;
            acc_bits += limb_bits(index);

            while acc_bits >= 8 {
                out[at] = acc as u8;
                acc >>= 8;
                acc_bits -= 8;
                at += 1;
            }
        }

        // 255 bits leave 7 pending.
        out[at] = acc as u8;

        out
    }

    /// Returns 1 if this element is non-zero, 0 otherwise.
    pub(crate) fn is_non_zero(&self) -> u32 {
        let folded = self.to_bytes().iter().fold(0u8, |acc, &b| acc | b);
        (((folded as u32).wrapping_sub(1) >> 31) ^ 1) & 1
    }

    /// The sign of an element is the low bit of its canonical encoding.
    pub(crate) fn is_negative(&self) -> u32 {
        (self.to_bytes()[0] & 1) as u32
    }

    pub(crate) fn square(self) -> FieldElement {
        self * self
    }

    /// Squares `n` times in a row.
    pub(crate) fn n_square(self, n: usize) -> FieldElement {
        (0..n).fold(self, |acc, _| acc.square())
    }

    /// `2 · self²`, used by point doubling.
    pub(crate) fn double_square(self) -> FieldElement {
        let sq = self.square();
        sq + sq
    }

    /// `self^(2²⁵² − 3)`, the exponent used to take square roots during
    /// point decompression.
    pub(crate) fn pow22523(&self) -> Self {
        let mut t0 = self.square();
        let mut t1 = t0.n_square(2);

        t1 = *self * t1;
        t0 = t0 * t1;

        t0 = t0.square();
        t0 = t1 * t0;

        t1 = t0.n_square(5);
        t0 = t1 * t0;

        t1 = t0.n_square(10);
        t1 = t1 * t0;

        let mut t2 = t1.n_square(20);
        t1 = t2 * t1;

        t1 = t1.n_square(10);
        t0 = t1 * t0;

        t1 = t0.n_square(50);
        t1 = t1 * t0;

        t2 = t1.n_square(100);
        t1 = t2 * t1;

        t1 = t1.n_square(50);
        t0 = t1 * t0;

        t0 = t0.n_square(2);

        t0 * *self
    }

    /// Multiplicative inverse as `self^(p − 2)`; zero maps to zero.
    pub(crate) fn invert(&self) -> Self {
        let mut t0 = self.square();
        let mut t1 = t0.n_square(2);

        t1 = *self * t1;
        t0 = t0 * t1;

        let mut t2 = t0.square();
        t1 = t1 * t2;

        t2 = t1.n_square(5);
        t1 = t2 * t1;

        t2 = t1.n_square(10);
        t2 = t2 * t1;

        let mut t3 = t2.n_square(20);
        t2 = t3 * t2;

        t2 = t2.n_square(10);
        t1 = t2 * t1;

        t2 = t1.n_square(50);
        t2 = t2 * t1;

        t3 = t2.n_square(100);
        t2 = t3 * t2;

        t2 = t2.n_square(50);
        t1 = t2 * t1;

        t1 = t1.n_square(5);

        t1 * t0
    }
}

impl Add for FieldElement {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        FieldElement(array::from_fn(|index| self.0[index] + rhs.0[index]))
    }
}

impl Sub for FieldElement {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        FieldElement(array::from_fn(|index| self.0[index] - rhs.0[index]))
    }
}

/// Schoolbook product with the wrap-around folded in.
///
/// Limb `i` has weight `2^ceil(25.5·i)`, so a product of two odd limbs
/// lands one bit above its target limb and is doubled; products reaching
/// limb 10 or above wrap to `i + j − 10` multiplied by 19.
impl Mul for FieldElement {
    type Output = FieldElement;

    fn mul(self, rhs: Self) -> Self::Output {
        let f = self.0;
        let g = rhs.0;

        let g_19: [i64; 10] = g.map(|x| 19 * x as i64);
        let f_2: [i64; 10] = array::from_fn(|i| (1 + (i as i64 & 1)) * f[i] as i64);

        let mut h = [0i64; 10];
        for i in 0..10 {
            for j in 0..10 {
                let fi = if j % 2 == 1 { f_2[i] } else { f[i] as i64 };

                if i + j < 10 {
                    h[i + j] += mul!(fi, g[j]);
                } else {
                    h[i + j - 10] += mul!(fi, g_19[j]);
                }
            }
        }

        for index in [0, 4, 1, 5, 2, 6, 3, 7, 4, 8, 9, 0] {
            carry(&mut h, index);
        }

        FieldElement(h.map(|x| x as i32))
    }
}

impl Neg for FieldElement {
    type Output = Self;

    fn neg(self) -> Self::Output {
        FieldElement(self.0.map(|x| -x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_u32(v: u32) -> FieldElement {
        let mut bytes = [0u8; 32];
        bytes[..4].copy_from_slice(&v.to_le_bytes());
        FieldElement::from_bytes(&bytes)
    }

    #[test]
    fn test_bytes_round_trip() {
        let mut bytes = [0u8; 32];
        for (i, b) in bytes.iter_mut().enumerate() {
            *b = (i as u8).wrapping_mul(37).wrapping_add(11);
        }
        bytes[31] &= 0x7f;

        assert_eq!(FieldElement::from_bytes(&bytes).to_bytes(), bytes);
    }

    #[test]
    fn test_encoding_is_canonical() {
        // p + 1 encodes as 1.
        let mut p_plus_one = [0xffu8; 32];
        p_plus_one[0] = 0xee;
        p_plus_one[31] = 0x7f;

        assert_eq!(FieldElement::from_bytes(&p_plus_one).to_bytes(), FieldElement::ONE.to_bytes());
        assert_eq!((-FieldElement::ONE + FieldElement::ONE).is_non_zero(), 0);
    }

    #[test]
    fn test_mul_and_invert() {
        let a = from_u32(123_456_789);
        let b = from_u32(987_654_321);

        assert_eq!((a * b).to_bytes(), (b * a).to_bytes());
        assert_eq!((a * a.invert()).to_bytes(), FieldElement::ONE.to_bytes());
        assert_eq!(a.square().to_bytes(), (a * a).to_bytes());
    }
}
