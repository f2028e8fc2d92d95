//! RSAES-OAEP (RFC 8017 §7.1) with SHA-256 and MGF1-SHA-256.

use zeroize::Zeroizing;

use super::{dec, enc};
use crate::error::{Error, Result};
use crate::hash::{Sha256, sha256};
use crate::keys::rsa::{PrivateKey, PublicKey};
use crate::primitives::BigInt;
use crate::rng::{EntropySource, OsRandom};

const HASH_LEN: usize = 32;

/// MGF1 (RFC 8017 §B.2.1): XORs `SHA-256(seed || counter)` blocks into `out`.
fn mgf1_xor(seed: &[u8], out: &mut [u8]) {
    for (counter, chunk) in out.chunks_mut(HASH_LEN).enumerate() {
        let mut hasher = Sha256::new();
        hasher.update(seed);
        hasher.update(&(counter as u32).to_be_bytes());
        let mask = hasher.finalize();

        for (o, m) in chunk.iter_mut().zip(mask) {
            *o ^= m;
        }
    }
}

/// Encrypts `message` with a random seed from the process-wide source.
pub fn oaep_encrypt(public: &PublicKey, message: &[u8], label: &[u8]) -> Result<Vec<u8>> {
    oaep_encrypt_with(public, message, label, &mut OsRandom)
}

/// Encrypts `message` (at most `k - 66` bytes for a `k`-byte modulus).
pub fn oaep_encrypt_with<R: EntropySource + ?Sized>(
    public: &PublicKey,
    message: &[u8],
    label: &[u8],
    rng: &mut R,
) -> Result<Vec<u8>> {
    let k = public.size();
    if k < 2 * HASH_LEN + 2 || message.len() > k - 2 * HASH_LEN - 2 {
        return Err(Error::PlaintextTooLarge);
    }

    // EM = 0x00 || maskedSeed || maskedDB
    let mut em = Zeroizing::new(vec![0u8; k]);
    let (seed, db) = em[1..].split_at_mut(HASH_LEN);

    // DB = lHash || PS || 0x01 || M
    db[..HASH_LEN].copy_from_slice(&sha256(label));
    let separator = db.len() - message.len() - 1;
    db[separator] = 0x01;
    db[separator + 1..].copy_from_slice(message);

    rng.fill(seed)?;
    mgf1_xor(seed, db);
    mgf1_xor(db, seed);

    let c = enc(&BigInt::from_be_bytes(&em)?, public)?;
    c.to_be_bytes_padded(k)
}

/// Decrypts an OAEP ciphertext of exactly `k` bytes.
///
/// Every padding failure returns the same [`Error::DecryptionFailed`], and
/// the checks run to completion before deciding.
pub fn oaep_decrypt(
    public: &PublicKey,
    private: &PrivateKey,
    ciphertext: &[u8],
    label: &[u8],
) -> Result<Vec<u8>> {
    let k = public.size();
    if k < 2 * HASH_LEN + 2 || ciphertext.len() != k {
        return Err(Error::DecryptionFailed);
    }

    let c = BigInt::from_be_bytes(ciphertext)?;
    let m = match dec(&c, public, private) {
        Ok(m) => Zeroizing::new(m),
        Err(Error::PlaintextTooLarge) => return Err(Error::DecryptionFailed),
        Err(err) => return Err(err),
    };

    let mut em = Zeroizing::new(m.to_be_bytes_padded(k)?);
    let leading = em[0];
    let (seed, db) = em[1..].split_at_mut(HASH_LEN);

    mgf1_xor(db, seed);
    mgf1_xor(seed, db);

    let label_hash = sha256(label);
    let mut bad = leading;
    for (x, y) in db[..HASH_LEN].iter().zip(label_hash) {
        bad |= x ^ y;
    }

    // Scan PS || 0x01 without branching on where the separator sits.
    let mut separator = 0usize;
    let mut looking = 1u8;
    for (i, &byte) in db.iter().enumerate().skip(HASH_LEN) {
        let is_one = ((byte ^ 0x01) as u16).wrapping_sub(1) >> 15;
        let is_zero = (byte as u16).wrapping_sub(1) >> 15;

        let found = looking & is_one as u8;
        separator |= i & 0usize.wrapping_sub(found as usize);
        bad |= looking & !(is_one | is_zero) as u8 & 1;
        looking &= !found & 1;
    }
    bad |= looking;

    if bad != 0 {
        return Err(Error::DecryptionFailed);
    }

    Ok(db[separator + 1..].to_vec())
}
