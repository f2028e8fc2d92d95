//! Primitive types.
//!
//! Currently a single primitive: [`BigInt`], the fixed-width 2048-bit
//! signed integer underneath RSA and the digital signature layer. It is
//! deliberately not a general big-number library: the width never grows,
//! and exceeding it is an error rather than a silent wrap.

pub mod bigint;

pub use bigint::BigInt;
