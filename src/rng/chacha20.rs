//! ChaCha20 block function (RFC 8439 §2.3).
//!
//! Only the block function is needed: the DRBG in [`super::csprng`] uses it
//! as a keyed PRF over a 32-bit block counter.

const CHACHA20_CONSTANTS: [u32; 4] = [
    0x6170_7865, // "expa"
    0x3320_646e, // "nd 3"
    0x7962_2d32, // "2-by"
    0x6b20_6574, // "te k"
];

#[inline(always)]
fn quarter_round(state: &mut [u32; 16], a: usize, b: usize, c: usize, d: usize) {
    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(16);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(12);

    state[a] = state[a].wrapping_add(state[b]);
    state[d] = (state[d] ^ state[a]).rotate_left(8);

    state[c] = state[c].wrapping_add(state[d]);
    state[b] = (state[b] ^ state[c]).rotate_left(7);
}

/// Ten double rounds: four column rounds then four diagonal rounds.
fn double_rounds(state: &mut [u32; 16]) {
    for _ in 0..10 {
        quarter_round(state, 0, 4, 8, 12);
        quarter_round(state, 1, 5, 9, 13);
        quarter_round(state, 2, 6, 10, 14);
        quarter_round(state, 3, 7, 11, 15);

        quarter_round(state, 0, 5, 10, 15);
        quarter_round(state, 1, 6, 11, 12);
        quarter_round(state, 2, 7, 8, 13);
        quarter_round(state, 3, 4, 9, 14);
    }
}

#[inline(always)]
fn word(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Produces one 64-byte keystream block for `(key, counter, nonce)`.
pub(crate) fn chacha20_block(key: &[u8; 32], counter: u32, nonce: &[u8; 12]) -> [u8; 64] {
    let mut state = [0u32; 16];

    state[..4].copy_from_slice(&CHACHA20_CONSTANTS);
    for (s, k) in state[4..12].iter_mut().zip(key.chunks_exact(4)) {
        *s = word(k);
    }
    state[12] = counter;
    for (s, n) in state[13..].iter_mut().zip(nonce.chunks_exact(4)) {
        *s = word(n);
    }

    let initial = state;
    double_rounds(&mut state);

    let mut out = [0u8; 64];
    for ((chunk, s), i) in out.chunks_exact_mut(4).zip(&state).zip(&initial) {
        chunk.copy_from_slice(&s.wrapping_add(*i).to_le_bytes());
    }

    out
}
