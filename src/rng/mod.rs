//! Random number generation.
//!
//! Two layers are provided:
//!
//! - [`Csprng`], a ChaCha20 DRBG that can be seeded from the OS or from a
//!   fixed seed;
//! - [`fill_random`], the process-wide secure source used by key generation,
//!   IV construction and Miller–Rabin bases. It owns a lazily seeded
//!   [`Csprng`] behind a mutex and reseeds it from the OS periodically and
//!   after a `fork`.
//!
//! Components that consume randomness take an [`EntropySource`], so callers
//! can substitute a seeded generator (or a failing one in tests).

pub(crate) mod chacha20;
mod csprng;

use once_cell::sync::Lazy;
use parking_lot::Mutex;
use tracing::debug;

use crate::error::{Error, Result};

pub use csprng::Csprng;

/// Bytes the shared generator may emit before it is reseeded from the OS.
pub const RESEED_INTERVAL: u64 = 1 << 20;

static SHARED: Lazy<Mutex<Option<Shared>>> = Lazy::new(|| Mutex::new(None));

/// The shared generator and the process it was seeded in.
struct Shared {
    rng: Csprng,
    pid: u32,
}

/// A missing, exhausted, or inherited (after `fork`) generator is reseeded.
fn needs_reseed(shared: Option<&Shared>, pid: u32) -> bool {
    shared.is_none_or(|s| s.pid != pid || s.rng.generated() >= RESEED_INTERVAL)
}

/// A source of cryptographically secure bytes.
pub trait EntropySource {
    /// Fills `buf` completely or fails with `EntropyUnavailable`.
    fn fill(&mut self, buf: &mut [u8]) -> Result<()>;
}

/// Handle to the process-wide generator behind [`fill_random`].
#[derive(Clone, Copy, Debug, Default)]
pub struct OsRandom;

impl EntropySource for OsRandom {
    fn fill(&mut self, buf: &mut [u8]) -> Result<()> {
        fill_random(buf)
    }
}

/// Fills `buf` from the process-wide secure generator.
///
/// The generator is seeded from the operating system on first use, again
/// every [`RESEED_INTERVAL`] bytes, and on the first call in a forked child
/// so parent and child never share a keystream. If the OS cannot supply a
/// seed the call fails with [`Error::EntropyUnavailable`] and `buf` is left
/// untouched. Concurrent callers are serialized.
pub fn fill_random(buf: &mut [u8]) -> Result<()> {
    let mut shared = SHARED.lock();
    let pid = std::process::id();

    if needs_reseed(shared.as_ref(), pid) {
        *shared = None;
        *shared = Some(Shared {
            rng: Csprng::from_os()?,
            pid,
        });
        debug!(pid, "shared DRBG seeded from OS entropy");
    }

    match shared.as_mut() {
        Some(state) => {
            state.rng.fill_bytes(buf);
            Ok(())
        }
        None => Err(Error::EntropyUnavailable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reseed_conditions() {
        let pid = std::process::id();
        assert!(needs_reseed(None, pid));

        let mut state = Shared {
            rng: Csprng::from_seed([1; 32]),
            pid,
        };
        assert!(!needs_reseed(Some(&state), pid));

        // Inherited across fork: same state, different process.
        assert!(needs_reseed(Some(&state), pid.wrapping_add(1)));

        let mut sink = vec![0u8; RESEED_INTERVAL as usize];
        state.rng.fill_bytes(&mut sink);
        assert!(needs_reseed(Some(&state), pid));
    }
}
