use zeroize::{Zeroize, ZeroizeOnDrop};

use super::computations::rounds;
use super::{BLOCK_LEN, DIGEST_LEN, H512_INIT};

/// SHA-512 compression function: absorbs one 128-byte block into `state`.
#[inline(always)]
pub fn compress(block: &[u8; BLOCK_LEN], state: &mut [u64; 8]) {
    let mut words = [0u64; 16];
    for (w, chunk) in words.iter_mut().zip(block.as_chunks::<8>().0) {
        *w = u64::from_be_bytes(*chunk);
    }

    rounds(state, &words);
}

/// Incremental SHA-512 state. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Sha512 {
    state: [u64; 8],
    buffer: [u8; BLOCK_LEN],
    buffered: usize,
    /// Total message length in bytes, tracked to 128 bits.
    length: u128,
}

impl Sha512 {
    /// A fresh state loaded with the initial hash value.
    pub fn new() -> Self {
        Self {
            state: H512_INIT,
            buffer: [0u8; BLOCK_LEN],
            buffered: 0,
            length: 0,
        }
    }

    /// Absorbs `data`. Empty input is a no-op.
    pub fn update(&mut self, mut data: &[u8]) {
        self.length = self.length.wrapping_add(data.len() as u128);

        if self.buffered > 0 {
            let take = (BLOCK_LEN - self.buffered).min(data.len());
            self.buffer[self.buffered..self.buffered + take].copy_from_slice(&data[..take]);
            self.buffered += take;
            data = &data[take..];

            if self.buffered < BLOCK_LEN {
                return;
            }

            compress(&self.buffer, &mut self.state);
            self.buffered = 0;
        }

        let (blocks, rest) = data.as_chunks::<BLOCK_LEN>();
        for block in blocks {
            compress(block, &mut self.state);
        }

        self.buffer[..rest.len()].copy_from_slice(rest);
        self.buffered = rest.len();
    }

    /// Pads with `0x80`, zeros and the 128-bit big-endian bit length, then
    /// returns the digest. Consumes the state.
    pub fn finalize(mut self) -> [u8; DIGEST_LEN] {
        let bit_len = self.length.wrapping_mul(8);

        let mut block = [0u8; BLOCK_LEN];
        block[..self.buffered].copy_from_slice(&self.buffer[..self.buffered]);
        block[self.buffered] = 0x80;

        if self.buffered >= BLOCK_LEN - 16 {
            compress(&block, &mut self.state);
            block = [0u8; BLOCK_LEN];
        }

        block[BLOCK_LEN - 16..].copy_from_slice(&bit_len.to_be_bytes());
        compress(&block, &mut self.state);
        block.zeroize();

        let mut digest = [0u8; DIGEST_LEN];
        for (out, word) in digest.chunks_exact_mut(8).zip(self.state) {
            out.copy_from_slice(&word.to_be_bytes());
        }

        digest
    }

    /// One-shot digest of `data`.
    pub fn digest(data: &[u8]) -> [u8; DIGEST_LEN] {
        let mut hasher = Self::new();
        hasher.update(data);
        hasher.finalize()
    }
}

impl Default for Sha512 {
    fn default() -> Self {
        Self::new()
    }
}

/// Computes the SHA-512 digest of `input`.
pub fn sha512(input: &[u8]) -> [u8; DIGEST_LEN] {
    Sha512::digest(input)
}

/// The first eight digest bytes of `input` as a big-endian `u64`.
pub fn sha512_hash64(input: &[u8]) -> u64 {
    let digest = sha512(input);
    u64::from_be_bytes([
        digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6], digest[7],
    ])
}
