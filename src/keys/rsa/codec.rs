//! Tagged binary encoding for key files.
//!
//! A key file is a sequence of fields, each laid out as:
//!
//! ```text
//! tag: u8 | len: u16 (big-endian, 1..=256) | value: len bytes (big-endian)
//! ```
//!
//! Public key files hold `n` and `a`; private key files hold `p`, `q` and
//! `b`. Every expected field must appear exactly once, in any order, and
//! nothing else may follow.

use zeroize::Zeroize;

use crate::error::{Error, Result};
use crate::primitives::BigInt;

pub(crate) const TAG_N: u8 = b'n';
pub(crate) const TAG_A: u8 = b'a';
pub(crate) const TAG_P: u8 = b'p';
pub(crate) const TAG_Q: u8 = b'q';
pub(crate) const TAG_B: u8 = b'b';

const HEADER_LEN: usize = 3;

pub(crate) fn encode(fields: &[(u8, &BigInt)]) -> Vec<u8> {
    let mut out = Vec::new();

    for &(tag, value) in fields {
        let mut bytes = value.to_be_bytes();
        let len = value.byte_len().max(1);

        out.push(tag);
        out.extend_from_slice(&(len as u16).to_be_bytes());
        out.extend_from_slice(&bytes[BigInt::BYTES - len..]);
        bytes.zeroize();
    }

    out
}

/// Decodes exactly the fields named by `tags`, returned in that order.
pub(crate) fn decode<const N: usize>(mut bytes: &[u8], tags: [u8; N]) -> Result<[BigInt; N]> {
    let mut found: [Option<BigInt>; N] = std::array::from_fn(|_| None);

    while !bytes.is_empty() {
        if bytes.len() < HEADER_LEN {
            return Err(Error::MalformedKeyData("truncated field header"));
        }

        let tag = bytes[0];
        let len = u16::from_be_bytes([bytes[1], bytes[2]]) as usize;
        bytes = &bytes[HEADER_LEN..];

        if len == 0 || len > BigInt::BYTES {
            return Err(Error::MalformedKeyData("field length out of range"));
        }
        if bytes.len() < len {
            return Err(Error::MalformedKeyData("truncated field value"));
        }

        let slot = tags
            .iter()
            .position(|&t| t == tag)
            .ok_or(Error::MalformedKeyData("unexpected field tag"))?;

        if found[slot].is_some() {
            return Err(Error::MalformedKeyData("duplicate field"));
        }

        found[slot] = Some(BigInt::from_be_bytes(&bytes[..len])?);
        bytes = &bytes[len..];
    }

    if found.iter().any(Option::is_none) {
        return Err(Error::MalformedKeyData("missing field"));
    }

    Ok(found.map(Option::unwrap_or_default))
}
