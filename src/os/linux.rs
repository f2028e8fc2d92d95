//! Kernel entropy through the `getrandom` system call.

use libc::{EINTR, c_void, getrandom};
use tracing::warn;

use crate::error::{Error, Result};

/// Fills `buf` with bytes from the kernel entropy pool.
///
/// Short reads and `EINTR` are retried until the buffer is full. Any other
/// error is returned as [`Error::EntropyUnavailable`].
pub(crate) fn sys_random(buf: &mut [u8]) -> Result<()> {
    let mut filled = 0;

    while filled < buf.len() {
        let ret = unsafe {
            getrandom(
                buf[filled..].as_mut_ptr() as *mut c_void,
                buf.len() - filled,
                0,
            )
        };

        if ret < 0 {
            let err = std::io::Error::last_os_error();
            if err.raw_os_error() == Some(EINTR) {
                continue;
            }

            warn!(error = %err, "getrandom failed");
            return Err(Error::EntropyUnavailable);
        }

        filled += ret as usize;
    }

    Ok(())
}
