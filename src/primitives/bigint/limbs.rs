//! Arithmetic on little-endian `u64` limb slices.
//!
//! These routines are the engine under [`BigInt`](super::BigInt): they work
//! on plain slices so the same code serves 2048-bit values and the 4096-bit
//! intermediates produced by modular multiplication.

use std::cmp::Ordering;

use super::WIDE_LIMBS;

/// Number of limbs up to and including the most significant non-zero limb.
#[inline]
pub(crate) fn significant(a: &[u64]) -> usize {
    a.iter().rposition(|&limb| limb != 0).map_or(0, |i| i + 1)
}

/// Compares two limb slices as unsigned integers of arbitrary length.
pub(crate) fn cmp(a: &[u64], b: &[u64]) -> Ordering {
    let a_len = significant(a);
    let b_len = significant(b);

    if a_len != b_len {
        return a_len.cmp(&b_len);
    }

    for i in (0..a_len).rev() {
        match a[i].cmp(&b[i]) {
            Ordering::Equal => continue,
            other => return other,
        }
    }

    Ordering::Equal
}

/// `a += b`, returning the carry out of `a`. Requires `b.len() <= a.len()`.
pub(crate) fn add_assign(a: &mut [u64], b: &[u64]) -> u64 {
    let mut carry = 0u64;

    for (i, limb) in a.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0);
        if i >= b.len() && carry == 0 {
            break;
        }

        let (s1, c1) = limb.overflowing_add(rhs);
        let (s2, c2) = s1.overflowing_add(carry);
        *limb = s2;
        carry = (c1 as u64) + (c2 as u64);
    }

    carry
}

/// `a -= b`, returning the borrow out of `a`. Requires `b.len() <= a.len()`.
pub(crate) fn sub_assign(a: &mut [u64], b: &[u64]) -> u64 {
    let mut borrow = 0u64;

    for (i, limb) in a.iter_mut().enumerate() {
        let rhs = b.get(i).copied().unwrap_or(0);
        if i >= b.len() && borrow == 0 {
            break;
        }

        let (s1, b1) = limb.overflowing_sub(rhs);
        let (s2, b2) = s1.overflowing_sub(borrow);
        *limb = s2;
        borrow = (b1 as u64) + (b2 as u64);
    }

    borrow
}

/// Schoolbook product `out = a * b`.
///
/// `out` must hold at least `significant(a) + significant(b)` limbs; it is
/// cleared first.
pub(crate) fn mul(out: &mut [u64], a: &[u64], b: &[u64]) {
    out.fill(0);

    let a_len = significant(a);
    let b_len = significant(b);

    for i in 0..a_len {
        let mut carry = 0u128;
        let ai = a[i] as u128;

        for j in 0..b_len {
            let t = ai * (b[j] as u128) + (out[i + j] as u128) + carry;
            out[i + j] = t as u64;
            carry = t >> 64;
        }

        out[i + b_len] = carry as u64;
    }
}

/// Shifts `a` left by `bits < 64` in place, returning the bits shifted out.
pub(crate) fn shl_small(a: &mut [u64], bits: u32) -> u64 {
    if bits == 0 {
        return 0;
    }

    let mut carry = 0u64;
    for limb in a.iter_mut() {
        let next = *limb >> (64 - bits);
        *limb = (*limb << bits) | carry;
        carry = next;
    }

    carry
}

/// Shifts `a` right by `bits < 64` in place.
pub(crate) fn shr_small(a: &mut [u64], bits: u32) {
    if bits == 0 {
        return;
    }

    let mut carry = 0u64;
    for limb in a.iter_mut().rev() {
        let next = *limb << (64 - bits);
        *limb = (*limb >> bits) | carry;
        carry = next;
    }
}

/// Remainder of `a` divided by a single non-zero limb.
pub(crate) fn rem_limb(a: &[u64], d: u64) -> u64 {
    let d = d as u128;
    let mut r = 0u128;

    for &limb in a[..significant(a)].iter().rev() {
        r = ((r << 64) | limb as u128) % d;
    }

    r as u64
}

/// Long division (Knuth, TAOCP vol. 2, 4.3.1, Algorithm D).
///
/// Writes `num / den` into `quo` and `num % den` into `rem`. `den` must be
/// non-zero and both inputs at most [`WIDE_LIMBS`] limbs long; `quo` must
/// hold `significant(num)` limbs and `rem` `significant(den)` limbs.
pub(crate) fn div_rem(num: &[u64], den: &[u64], quo: &mut [u64], rem: &mut [u64]) {
    quo.fill(0);
    rem.fill(0);

    let n_len = significant(num);
    let d_len = significant(den);
    debug_assert!(d_len > 0, "division by zero");

    if cmp(&num[..n_len], &den[..d_len]) == Ordering::Less {
        rem[..n_len].copy_from_slice(&num[..n_len]);
        return;
    }

    if d_len == 1 {
        let d = den[0] as u128;
        let mut r = 0u128;

        for i in (0..n_len).rev() {
            let cur = (r << 64) | num[i] as u128;
            quo[i] = (cur / d) as u64;
            r = cur % d;
        }

        rem[0] = r as u64;
        return;
    }

    // Normalize so the divisor's top limb has its high bit set.
    let shift = den[d_len - 1].leading_zeros();

    let mut v = [0u64; WIDE_LIMBS];
    v[..d_len].copy_from_slice(&den[..d_len]);
    shl_small(&mut v[..d_len], shift);

    let mut u = [0u64; WIDE_LIMBS + 1];
    u[..n_len].copy_from_slice(&num[..n_len]);
    u[n_len] = shl_small(&mut u[..n_len], shift);

    let v_top = v[d_len - 1] as u128;
    let v_next = v[d_len - 2] as u128;
    let base = 1u128 << 64;

    for j in (0..=n_len - d_len).rev() {
        let top = ((u[j + d_len] as u128) << 64) | u[j + d_len - 1] as u128;
        let mut q_hat = top / v_top;
        let mut r_hat = top % v_top;

        while q_hat >= base || q_hat * v_next > ((r_hat << 64) | u[j + d_len - 2] as u128) {
            q_hat -= 1;
            r_hat += v_top;
            if r_hat >= base {
                break;
            }
        }

        // u[j..=j+d_len] -= q_hat * v
        let mut carry = 0u64;
        let mut borrow = 0u64;
        for i in 0..d_len {
            let p = q_hat * (v[i] as u128) + carry as u128;
            carry = (p >> 64) as u64;

            let (s1, b1) = u[i + j].overflowing_sub(p as u64);
            let (s2, b2) = s1.overflowing_sub(borrow);
            u[i + j] = s2;
            borrow = (b1 as u64) + (b2 as u64);
        }

        let (s1, b1) = u[j + d_len].overflowing_sub(carry);
        let (s2, b2) = s1.overflowing_sub(borrow);
        u[j + d_len] = s2;

        if b1 || b2 {
            // q_hat was one too large: add the divisor back.
            q_hat -= 1;
            let c = add_assign(&mut u[j..j + d_len], &v[..d_len]);
            u[j + d_len] = u[j + d_len].wrapping_add(c);
        }

        quo[j] = q_hat as u64;
    }

    shr_small(&mut u[..=d_len], shift);
    rem[..d_len].copy_from_slice(&u[..d_len]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_carry_chain() {
        let mut a = [u64::MAX, u64::MAX, 0];
        let carry = add_assign(&mut a, &[1]);

        assert_eq!(a, [0, 0, 1]);
        assert_eq!(carry, 0);
    }

    #[test]
    fn test_sub_borrow_out() {
        let mut a = [0u64, 0];
        let borrow = sub_assign(&mut a, &[1]);

        assert_eq!(a, [u64::MAX, u64::MAX]);
        assert_eq!(borrow, 1);
    }

    #[test]
    fn test_div_rem_multi_limb() {
        // (2^128 + 5) / (2^64 + 1) = 2^64 - 1 remainder 6
        let num = [5u64, 0, 1];
        let den = [1u64, 1];
        let mut quo = [0u64; 3];
        let mut rem = [0u64; 2];

        div_rem(&num, &den, &mut quo, &mut rem);

        assert_eq!(quo, [u64::MAX, 0, 0]);
        assert_eq!(rem, [6, 0]);
    }

    #[test]
    fn test_div_rem_reconstructs_dividend() {
        let num = [
            0x0123_4567_89ab_cdef,
            0xfedc_ba98_7654_3210,
            0xdead_beef_cafe_babe,
            0x0000_0000_ffff_0001,
        ];
        let den = [0x1111_2222_3333_4444, 0x8000_0000_0000_0001];
        let mut quo = [0u64; 4];
        let mut rem = [0u64; 2];

        div_rem(&num, &den, &mut quo, &mut rem);
        assert_eq!(cmp(&rem, &den), Ordering::Less);

        let mut back = [0u64; 6];
        mul(&mut back, &quo, &den);
        add_assign(&mut back, &rem);

        assert_eq!(cmp(&back, &num), Ordering::Equal);
    }
}
