use zeroize::{Zeroize, ZeroizeOnDrop};

use super::block;
use super::tables::{RCON, SBOX};
use super::{BLOCK_LEN, KEY_LEN, ROUNDS};
use crate::error::{Error, Result};

/// Words in the expanded key: `4 * (ROUNDS + 1)`.
const EXPANDED_WORDS: usize = 4 * (ROUNDS + 1);

/// Words in the cipher key.
const KEY_WORDS: usize = KEY_LEN / 4;

/// An expanded AES-256 key: 15 round keys of 16 bytes.
///
/// Derived once and reused for any number of block operations. The round
/// keys are wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Aes256Key {
    round_keys: [[u8; BLOCK_LEN]; ROUNDS + 1],
}

fn sub_word(word: [u8; 4]) -> [u8; 4] {
    word.map(|b| SBOX[b as usize])
}

/// FIPS-197 §5.2 key expansion for `Nk = 8`, `Nr = 14`.
pub fn key_expansion(key: &[u8; KEY_LEN]) -> [[u8; BLOCK_LEN]; ROUNDS + 1] {
    let mut w = [[0u8; 4]; EXPANDED_WORDS];

    for (word, chunk) in w.iter_mut().zip(key.as_chunks::<4>().0) {
        *word = *chunk;
    }

    for i in KEY_WORDS..EXPANDED_WORDS {
        let mut temp = w[i - 1];

        if i % KEY_WORDS == 0 {
            temp.rotate_left(1);
            temp = sub_word(temp);
            temp[0] ^= RCON[i / KEY_WORDS - 1];
        } else if i % KEY_WORDS == 4 {
            temp = sub_word(temp);
        }

        for (j, byte) in temp.iter().enumerate() {
            w[i][j] = w[i - KEY_WORDS][j] ^ byte;
        }
    }

    let mut round_keys = [[0u8; BLOCK_LEN]; ROUNDS + 1];
    for (round, rk) in round_keys.iter_mut().enumerate() {
        for (c, word) in w[4 * round..4 * round + 4].iter().enumerate() {
            rk[4 * c..4 * c + 4].copy_from_slice(word);
        }
    }

    w.zeroize();
    round_keys
}

impl Aes256Key {
    /// Expands a 32-byte cipher key.
    pub fn new(key: &[u8; KEY_LEN]) -> Self {
        Self {
            round_keys: key_expansion(key),
        }
    }

    /// Expands a key given as a slice, which must be exactly 32 bytes.
    pub fn from_slice(key: &[u8]) -> Result<Self> {
        let key: &[u8; KEY_LEN] = key
            .try_into()
            .map_err(|_| Error::InvalidArgument("AES-256 key must be 32 bytes"))?;

        Ok(Self::new(key))
    }

    /// Round key `round` (0 through 14).
    pub fn round_key(&self, round: usize) -> Option<&[u8; BLOCK_LEN]> {
        self.round_keys.get(round)
    }

    /// Encrypts one block in place.
    pub fn encrypt_block(&self, state: &mut [u8; BLOCK_LEN]) {
        block::add_round_key(state, &self.round_keys[0]);

        for round_key in &self.round_keys[1..ROUNDS] {
            block::sub_bytes(state);
            block::shift_rows(state);
            block::mix_columns(state);
            block::add_round_key(state, round_key);
        }

        block::sub_bytes(state);
        block::shift_rows(state);
        block::add_round_key(state, &self.round_keys[ROUNDS]);
    }

    /// Decrypts one block in place, applying the inverse transforms in
    /// reverse round order.
    pub fn decrypt_block(&self, state: &mut [u8; BLOCK_LEN]) {
        block::add_round_key(state, &self.round_keys[ROUNDS]);

        for round_key in self.round_keys[1..ROUNDS].iter().rev() {
            block::inv_shift_rows(state);
            block::inv_sub_bytes(state);
            block::add_round_key(state, round_key);
            block::inv_mix_columns(state);
        }

        block::inv_shift_rows(state);
        block::inv_sub_bytes(state);
        block::add_round_key(state, &self.round_keys[0]);
    }
}
