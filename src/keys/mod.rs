//! Key material.
//!
//! Algorithm-specific key types, their generation, validation and
//! encoding. Operations that use keys live with their algorithm in
//! [`crate::encryption`] and [`crate::signatures`].
//!
//! Private keys in both submodules are wiped from memory when dropped and
//! never print their contents through `Debug`.

pub mod ed25519;
pub mod rsa;
