//! Cryptographic core: big-integer RSA, AES-256, SHA-2 and Ed25519,
//! implemented from first principles.
//!
//! The focus is on **clarity, predictability, and auditability**. Every
//! primitive is written out explicitly in this crate; the only outside
//! code is the operating system's entropy source.
//!
//! # Module overview
//!
//! - `primitives`
//!   Fixed-width 2048-bit signed integers ([`primitives::BigInt`]) with
//!   modular arithmetic, inverses and Miller–Rabin primality testing.
//!
//! - `hash`
//!   SHA-256 and SHA-512, one-shot and incremental.
//!
//! - `rng`
//!   A ChaCha20 DRBG and the process-wide secure source
//!   ([`rng::fill_random`]) it backs, seeded from the operating system.
//!
//! - `encryption`
//!   AES-256 (block, CBC, PKCS#7) and RSA encryption (raw and OAEP).
//!
//! - `keys`
//!   RSA and Ed25519 key types: generation, validation, encoding and
//!   key files.
//!
//! - `signatures`
//!   Ed25519, and RSA hash-then-sign signatures in direct and CRT form.
//!
//! # Errors
//!
//! Every fallible operation returns [`Result`] with the shared [`Error`]
//! enum. Nothing in the crate panics on bad input.
//!
//! # Logging
//!
//! Key generation and entropy failures emit [`tracing`] events (`debug`
//! for progress, `warn` for exhausted budgets or a failing OS source). No
//! event ever carries key material.
//!
//! # Features
//!
//! - `speed`: unrolled SHA-256 compression rounds.
//!
//! This crate is not intended to replace full-featured, externally audited
//! cryptographic libraries.

mod ct;
mod os;

pub mod encryption;
pub mod error;
pub mod hash;
pub mod keys;
pub mod primitives;
pub mod rng;
pub mod signatures;

pub use error::{Error, Result};
