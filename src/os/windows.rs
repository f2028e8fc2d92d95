//! System-preferred RNG through `BCryptGenRandom`.

use tracing::warn;
use windows_sys::Win32::Security::Cryptography::{
    BCRYPT_USE_SYSTEM_PREFERRED_RNG, BCryptGenRandom,
};

use crate::error::{Error, Result};

/// Fills `buf` with random bytes, in chunks of at most `u32::MAX` bytes.
pub(crate) fn sys_random(buf: &mut [u8]) -> Result<()> {
    for chunk in buf.chunks_mut(u32::MAX as usize) {
        let status = unsafe {
            BCryptGenRandom(
                std::ptr::null_mut(),
                chunk.as_mut_ptr(),
                chunk.len() as u32,
                BCRYPT_USE_SYSTEM_PREFERRED_RNG,
            )
        };

        if status != 0 {
            warn!(status, "BCryptGenRandom failed");
            return Err(Error::EntropyUnavailable);
        }
    }

    Ok(())
}
