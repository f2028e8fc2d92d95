//! Cipher block chaining.

use super::{Aes256Key, BLOCK_LEN};
use crate::error::{Error, Result};

fn check_length(data: &[u8]) -> Result<()> {
    if data.is_empty() || data.len() % BLOCK_LEN != 0 {
        return Err(Error::InvalidArgument(
            "CBC input must be a non-empty multiple of 16 bytes",
        ));
    }

    Ok(())
}

/// Chains whole blocks; the caller guarantees `data` is block-aligned.
fn chain_encrypt(key: &Aes256Key, iv: &[u8; BLOCK_LEN], data: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(data.len());
    let mut chain = *iv;

    for block in data.as_chunks::<BLOCK_LEN>().0 {
        for (c, p) in chain.iter_mut().zip(block) {
            *c ^= p;
        }

        key.encrypt_block(&mut chain);
        out.extend_from_slice(&chain);
    }

    out
}

/// Validates PKCS#7 padding on the final block without branching on the
/// byte values.
fn padding_is_valid(block: &[u8; BLOCK_LEN]) -> bool {
    let pad = block[BLOCK_LEN - 1] as u32;

    // pad must lie in 1..=16
    let mut bad = (pad.wrapping_sub(1) >> 8) | ((BLOCK_LEN as u32).wrapping_sub(pad) >> 8);

    for (i, &byte) in block.iter().enumerate() {
        let from_end = (BLOCK_LEN - i) as u32;
        let in_pad = from_end.wrapping_sub(pad + 1) >> 31;
        bad |= 0u32.wrapping_sub(in_pad) & (byte as u32 ^ pad);
    }

    bad == 0
}

/// CBC encryption: each plaintext block is XORed with the previous
/// ciphertext block (the IV for the first) before encryption.
///
/// `data` must be a non-empty multiple of the block size; no padding is
/// added. See [`encrypt_cbc_padded`] for PKCS#7.
pub fn encrypt_cbc(key: &Aes256Key, iv: &[u8; BLOCK_LEN], data: &[u8]) -> Result<Vec<u8>> {
    check_length(data)?;

    Ok(chain_encrypt(key, iv, data))
}

/// Inverse of [`encrypt_cbc`].
pub fn decrypt_cbc(key: &Aes256Key, iv: &[u8; BLOCK_LEN], data: &[u8]) -> Result<Vec<u8>> {
    check_length(data)?;

    let mut out = Vec::with_capacity(data.len());
    let mut previous = *iv;

    for block in data.as_chunks::<BLOCK_LEN>().0 {
        let mut plain = *block;
        key.decrypt_block(&mut plain);

        for (p, c) in plain.iter_mut().zip(&previous) {
            *p ^= c;
        }

        out.extend_from_slice(&plain);
        previous = *block;
    }

    Ok(out)
}

/// CBC encryption with PKCS#7 padding. Any length, including empty, is
/// accepted; the output is one to sixteen bytes longer than the input.
pub fn encrypt_cbc_padded(key: &Aes256Key, iv: &[u8; BLOCK_LEN], data: &[u8]) -> Vec<u8> {
    let pad = BLOCK_LEN - data.len() % BLOCK_LEN;

    let mut padded = Vec::with_capacity(data.len() + pad);
    padded.extend_from_slice(data);
    padded.resize(data.len() + pad, pad as u8);

    let out = chain_encrypt(key, iv, &padded);
    padded.fill(0);

    out
}

/// Inverse of [`encrypt_cbc_padded`]. Bad padding fails with
/// [`Error::DecryptionFailed`].
pub fn decrypt_cbc_padded(key: &Aes256Key, iv: &[u8; BLOCK_LEN], data: &[u8]) -> Result<Vec<u8>> {
    let mut plain = decrypt_cbc(key, iv, data)?;

    let mut last = [0u8; BLOCK_LEN];
    last.copy_from_slice(&plain[plain.len() - BLOCK_LEN..]);

    if !padding_is_valid(&last) {
        plain.fill(0);
        return Err(Error::DecryptionFailed);
    }

    plain.truncate(plain.len() - last[BLOCK_LEN - 1] as usize);

    Ok(plain)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padding_validation() {
        let mut block = [0u8; BLOCK_LEN];

        block[BLOCK_LEN - 1] = 1;
        assert!(padding_is_valid(&block));

        block[BLOCK_LEN - 3..].copy_from_slice(&[3, 3, 3]);
        assert!(padding_is_valid(&block));

        block[BLOCK_LEN - 3] = 2;
        assert!(!padding_is_valid(&block));

        assert!(padding_is_valid(&[16u8; BLOCK_LEN]));
        assert!(!padding_is_valid(&[0u8; BLOCK_LEN]));
        assert!(!padding_is_valid(&[17u8; BLOCK_LEN]));
    }
}
