//! Hash functions.
//!
//! Pure-Rust SHA-256 and SHA-512 with incremental and one-shot interfaces.
//! Both are restartable: every [`Sha256::new`] / [`Sha512::new`] starts from
//! the standard initial value, independent of any earlier use.

pub mod sha256;
pub mod sha512;

pub use sha256::{Sha256, sha256, sha256_hash64};
pub use sha512::{Sha512, sha512, sha512_hash64};
