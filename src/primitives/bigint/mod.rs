//! Fixed-width 2048-bit signed integers.
//!
//! A [`BigInt`] is a sign flag plus a magnitude of 32 little-endian `u64`
//! limbs. The width is fixed: results whose magnitude would need more than
//! 2048 bits are rejected with [`Error::Overflow`] instead of wrapping, since
//! RSA values never legitimately exceed it.
//!
//! Modular multiplication internally uses 4096-bit products, so `mod_exp`
//! and friends never overflow for any modulus that fits the width.
//!
//! Zero is always non-negative; every constructor and operation keeps that
//! normalization, so derived equality is numeric equality.

pub(crate) mod limbs;
mod modular;
mod ops;
mod prime;

use std::cmp::Ordering;
use std::fmt;

use zeroize::Zeroize;

use crate::error::{Error, Result};

pub use prime::SMALL_PRIMES;

/// Number of 64-bit limbs in a [`BigInt`].
pub const LIMBS: usize = 32;

/// Limbs in a double-width intermediate product.
pub(crate) const WIDE_LIMBS: usize = 2 * LIMBS;

/// A 2048-bit signed integer.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigInt {
    limbs: [u64; LIMBS],
    negative: bool,
}

impl BigInt {
    /// Width of the magnitude in bits.
    pub const BITS: usize = LIMBS * 64;

    /// Width of the magnitude in bytes.
    pub const BYTES: usize = LIMBS * 8;

    pub const ZERO: Self = Self {
        limbs: [0; LIMBS],
        negative: false,
    };

    pub const ONE: Self = Self::from_u64(1);

    pub const TWO: Self = Self::from_u64(2);

    /// Builds a non-negative value from a single machine word.
    pub const fn from_u64(value: u64) -> Self {
        let mut limbs = [0u64; LIMBS];
        limbs[0] = value;

        Self {
            limbs,
            negative: false,
        }
    }

    /// Builds a value from its magnitude limbs and sign, normalizing zero.
    pub(crate) fn from_limbs(limbs: [u64; LIMBS], negative: bool) -> Self {
        let negative = negative && limbs.iter().any(|&l| l != 0);
        Self { limbs, negative }
    }

    /// Builds a value from a wide magnitude, failing if it needs more than
    /// [`LIMBS`] limbs.
    pub(crate) fn from_wide(wide: &[u64], negative: bool) -> Result<Self> {
        if limbs::significant(wide) > LIMBS {
            return Err(Error::Overflow);
        }

        let mut out = [0u64; LIMBS];
        let n = wide.len().min(LIMBS);
        out[..n].copy_from_slice(&wide[..n]);

        Ok(Self::from_limbs(out, negative))
    }

    /// Parses a big-endian, unsigned magnitude.
    ///
    /// Leading zero bytes are ignored, so inputs longer than 256 bytes are
    /// accepted as long as the value fits; otherwise [`Error::Overflow`].
    pub fn from_be_bytes(bytes: &[u8]) -> Result<Self> {
        let start = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        let bytes = &bytes[start..];

        if bytes.len() > Self::BYTES {
            return Err(Error::Overflow);
        }

        let mut limbs = [0u64; LIMBS];
        for (i, &byte) in bytes.iter().rev().enumerate() {
            limbs[i / 8] |= (byte as u64) << (8 * (i % 8));
        }

        Ok(Self::from_limbs(limbs, false))
    }

    /// The magnitude as 256 big-endian bytes.
    pub fn to_be_bytes(&self) -> [u8; Self::BYTES] {
        let mut out = [0u8; Self::BYTES];

        for (i, limb) in self.limbs.iter().enumerate() {
            let at = Self::BYTES - 8 * (i + 1);
            out[at..at + 8].copy_from_slice(&limb.to_be_bytes());
        }

        out
    }

    /// The magnitude as exactly `len` big-endian bytes.
    ///
    /// Fails with [`Error::InvalidArgument`] if the value needs more than
    /// `len` bytes.
    pub fn to_be_bytes_padded(&self, len: usize) -> Result<Vec<u8>> {
        if self.byte_len() > len {
            return Err(Error::InvalidArgument("value does not fit in output length"));
        }

        let full = self.to_be_bytes();
        let mut out = vec![0u8; len];
        let take = len.min(Self::BYTES);
        out[len - take..].copy_from_slice(&full[Self::BYTES - take..]);

        Ok(out)
    }

    /// Number of significant bits of the magnitude (0 for zero).
    pub fn bits(&self) -> usize {
        let len = limbs::significant(&self.limbs);
        if len == 0 {
            return 0;
        }

        64 * len - self.limbs[len - 1].leading_zeros() as usize
    }

    /// Number of bytes needed for the magnitude.
    pub fn byte_len(&self) -> usize {
        self.bits().div_ceil(8)
    }

    /// Bit `index` of the magnitude; out-of-range indices read as zero.
    pub fn bit(&self, index: usize) -> bool {
        index < Self::BITS && (self.limbs[index / 64] >> (index % 64)) & 1 == 1
    }

    /// Sets bit `index` of the magnitude. Indices past the width are ignored.
    pub fn set_bit(&mut self, index: usize) {
        if index < Self::BITS {
            self.limbs[index / 64] |= 1 << (index % 64);
        }
    }

    pub fn is_zero(&self) -> bool {
        self.limbs.iter().all(|&l| l == 0)
    }

    pub fn is_one(&self) -> bool {
        *self == Self::ONE
    }

    pub fn is_odd(&self) -> bool {
        self.limbs[0] & 1 == 1
    }

    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Absolute value.
    pub fn abs(&self) -> Self {
        Self::from_limbs(self.limbs, false)
    }

    /// The low 64 bits of the magnitude.
    pub fn low_u64(&self) -> u64 {
        self.limbs[0]
    }
}

impl From<u64> for BigInt {
    fn from(value: u64) -> Self {
        Self::from_u64(value)
    }
}

impl Default for BigInt {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Zeroize for BigInt {
    fn zeroize(&mut self) {
        self.limbs.zeroize();
        self.negative = false;
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self.negative, other.negative) {
            (false, true) => Ordering::Greater,
            (true, false) => Ordering::Less,
            (false, false) => limbs::cmp(&self.limbs, &other.limbs),
            (true, true) => limbs::cmp(&other.limbs, &self.limbs),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.negative {
            f.write_str("-")?;
        }
        if f.alternate() {
            f.write_str("0x")?;
        }

        let len = limbs::significant(&self.limbs);
        if len == 0 {
            return f.write_str("0");
        }

        write!(f, "{:x}", self.limbs[len - 1])?;
        for limb in self.limbs[..len - 1].iter().rev() {
            write!(f, "{limb:016x}")?;
        }

        Ok(())
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:#x}")
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigInt({self:#x})")
    }
}
