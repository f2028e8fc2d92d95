//! Operating system entropy.
//!
//! Each platform module exposes the same `sys_random` function, selected at
//! compile time. Failures are reported as `Error::EntropyUnavailable`;
//! there is no fallback to a weaker source.

#[cfg(target_os = "macos")]
mod macos;

#[cfg(target_os = "macos")]
pub(crate) use macos::sys_random;

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub(crate) use linux::sys_random;

#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "windows")]
pub(crate) use windows::sys_random;
