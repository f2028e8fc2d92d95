//! ChaCha20-based CSPRNG.
//!
//! A small deterministic random bit generator: the 32-byte key is the only
//! secret state, output is the ChaCha20 keystream under a zero nonce, and
//! the key is replaced by fresh keystream after every request so earlier
//! output cannot be recovered from a later state.

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::Result;
use crate::os::sys_random;
use crate::rng::EntropySource;
use crate::rng::chacha20::chacha20_block;

/// ChaCha20 DRBG seeded from the OS or from a caller-supplied seed.
///
/// Seeded instances are fully deterministic, which makes them useful for
/// reproducible primality tests and key generation in tests.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct Csprng {
    key: [u8; 32],

    nonce: [u8; 12],

    counter: u32,

    /// Bytes produced since the last seeding.
    generated: u64,
}

impl Csprng {
    /// Seeds a new generator from operating system entropy.
    pub fn from_os() -> Result<Self> {
        let mut seed = [0u8; 32];
        sys_random(&mut seed)?;

        Ok(Self::from_seed(seed))
    }

    /// Builds a deterministic generator from a 32-byte seed.
    pub fn from_seed(mut seed: [u8; 32]) -> Self {
        let key = seed;
        seed.zeroize();

        Self {
            key,
            nonce: [0u8; 12],
            counter: 0,
            generated: 0,
        }
    }

    /// Fills `out` with keystream and rekeys.
    pub fn fill_bytes(&mut self, out: &mut [u8]) {
        for chunk in out.chunks_mut(64) {
            let mut block = chacha20_block(&self.key, self.counter, &self.nonce);
            self.counter = self.counter.wrapping_add(1);

            chunk.copy_from_slice(&block[..chunk.len()]);
            block.zeroize();
        }

        self.generated = self.generated.saturating_add(out.len() as u64);
        self.rekey();
    }

    /// Number of bytes emitted since this generator was seeded.
    pub(crate) fn generated(&self) -> u64 {
        self.generated
    }

    fn rekey(&mut self) {
        let mut block = chacha20_block(&self.key, self.counter, &self.nonce);

        self.counter = 0;
        self.key.copy_from_slice(&block[..32]);
        block.zeroize();
    }
}

impl EntropySource for Csprng {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        self.fill_bytes(buf);
        Ok(())
    }
}
