//! The four round transforms and their inverses.
//!
//! The state is 16 bytes in FIPS-197 column-major order: byte `r + 4c` is
//! row `r`, column `c`.

use super::BLOCK_LEN;
use super::tables::{INV_SBOX, SBOX};

/// Multiplication by `x` modulo the AES polynomial 0x11B.
#[inline(always)]
fn xtime(a: u8) -> u8 {
    (a << 1) ^ (0x1b & 0u8.wrapping_sub(a >> 7))
}

/// Multiplication in GF(2^8) without data-dependent branches.
#[inline(always)]
fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;

    for _ in 0..8 {
        product ^= a & 0u8.wrapping_sub(b & 1);
        a = xtime(a);
        b >>= 1;
    }

    product
}

pub(super) fn sub_bytes(state: &mut [u8; BLOCK_LEN]) {
    for byte in state.iter_mut() {
        *byte = SBOX[*byte as usize];
    }
}

pub(super) fn inv_sub_bytes(state: &mut [u8; BLOCK_LEN]) {
    for byte in state.iter_mut() {
        *byte = INV_SBOX[*byte as usize];
    }
}

/// Row `r` rotates left by `r` columns.
pub(super) fn shift_rows(state: &mut [u8; BLOCK_LEN]) {
    let old = *state;
    for r in 1..4 {
        for c in 0..4 {
            state[r + 4 * c] = old[r + 4 * ((c + r) % 4)];
        }
    }
}

pub(super) fn inv_shift_rows(state: &mut [u8; BLOCK_LEN]) {
    let old = *state;
    for r in 1..4 {
        for c in 0..4 {
            state[r + 4 * ((c + r) % 4)] = old[r + 4 * c];
        }
    }
}

pub(super) fn mix_columns(state: &mut [u8; BLOCK_LEN]) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [column[0], column[1], column[2], column[3]];

        column[0] = xtime(a0) ^ xtime(a1) ^ a1 ^ a2 ^ a3;
        column[1] = a0 ^ xtime(a1) ^ xtime(a2) ^ a2 ^ a3;
        column[2] = a0 ^ a1 ^ xtime(a2) ^ xtime(a3) ^ a3;
        column[3] = xtime(a0) ^ a0 ^ a1 ^ a2 ^ xtime(a3);
    }
}

pub(super) fn inv_mix_columns(state: &mut [u8; BLOCK_LEN]) {
    for column in state.chunks_exact_mut(4) {
        let [a0, a1, a2, a3] = [column[0], column[1], column[2], column[3]];

        column[0] = gf_mul(a0, 14) ^ gf_mul(a1, 11) ^ gf_mul(a2, 13) ^ gf_mul(a3, 9);
        column[1] = gf_mul(a0, 9) ^ gf_mul(a1, 14) ^ gf_mul(a2, 11) ^ gf_mul(a3, 13);
        column[2] = gf_mul(a0, 13) ^ gf_mul(a1, 9) ^ gf_mul(a2, 14) ^ gf_mul(a3, 11);
        column[3] = gf_mul(a0, 11) ^ gf_mul(a1, 13) ^ gf_mul(a2, 9) ^ gf_mul(a3, 14);
    }
}

pub(super) fn add_round_key(state: &mut [u8; BLOCK_LEN], round_key: &[u8; BLOCK_LEN]) {
    for (s, k) in state.iter_mut().zip(round_key) {
        *s ^= k;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gf_mul_fips197_example() {
        // FIPS-197 §4.2: {57} • {83} = {c1}
        assert_eq!(gf_mul(0x57, 0x83), 0xc1);
        assert_eq!(xtime(0x57), 0xae);
        assert_eq!(xtime(0xae), 0x47);
    }

    #[test]
    fn test_mix_columns_inverts() {
        let mut state: [u8; 16] = std::array::from_fn(|i| (i as u8).wrapping_mul(37));
        let original = state;

        mix_columns(&mut state);
        inv_mix_columns(&mut state);

        assert_eq!(state, original);
    }

    #[test]
    fn test_shift_rows_inverts() {
        let mut state: [u8; 16] = std::array::from_fn(|i| i as u8);

        shift_rows(&mut state);
        assert_eq!(state[1], 5);
        assert_eq!(state[2], 10);
        assert_eq!(state[3], 15);

        inv_shift_rows(&mut state);
        assert_eq!(state, std::array::from_fn(|i| i as u8));
    }
}
