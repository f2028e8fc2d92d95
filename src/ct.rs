//! Constant-time comparison helpers.
//!
//! Results come back as `u8` masks (1 or 0) so callers can keep combining
//! them without branching. Turn one into a `bool` only at the point where
//! the outcome is public.

pub(crate) trait ConstantTimeEq {
    /// 1 if `self == other`, 0 otherwise, without data-dependent branches.
    fn ct_eq(&self, other: &Self) -> u8;
}

impl ConstantTimeEq for i8 {
    #[inline(always)]
    fn ct_eq(&self, other: &Self) -> u8 {
        let x = (*self as u8 ^ *other as u8) as u64;
        (x.wrapping_sub(1) >> 63) as u8
    }
}

impl ConstantTimeEq for [u8] {
    /// Slices of different lengths compare unequal; the length itself is
    /// treated as public.
    fn ct_eq(&self, other: &Self) -> u8 {
        if self.len() != other.len() {
            return 0;
        }

        let diff = self.iter().zip(other).fold(0u8, |acc, (a, b)| acc | (a ^ b));
        ((diff as u64).wrapping_sub(1) >> 63) as u8
    }
}

/// 1 if every byte is zero, 0 otherwise.
pub(crate) fn ct_is_zero(bytes: &[u8]) -> u8 {
    let acc = bytes.iter().fold(0u8, |acc, &b| acc | b);
    ((acc as u64).wrapping_sub(1) >> 63) as u8
}

/// 1 if `value` is negative, 0 otherwise.
#[inline(always)]
pub(crate) fn ct_negative(value: i8) -> u8 {
    ((value as i64 as u64) >> 63) as u8
}
