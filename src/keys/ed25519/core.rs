use std::fmt;

use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{Error, Result};
use crate::hash::sha512;
use crate::rng::{EntropySource, OsRandom};
use crate::signatures::ed25519::group::GeP3;
use crate::signatures::ed25519::scalar::Scalar;

/// Length of seeds, scalars, prefixes and public keys in bytes.
pub const KEY_LEN: usize = 32;

/// A compressed Edwards point known to decode to a curve point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PublicKey([u8; KEY_LEN]);

impl PublicKey {
    /// Accepts only canonical encodings of points on the curve.
    pub fn from_bytes(bytes: &[u8; KEY_LEN]) -> Result<Self> {
        let point = GeP3::decompress(bytes).ok_or(Error::MalformedKeyData("point not on curve"))?;

        if point.to_bytes() != *bytes {
            return Err(Error::MalformedKeyData("non-canonical point encoding"));
        }

        Ok(Self(*bytes))
    }

    /// Like [`PublicKey::from_bytes`], for a slice of any length.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let bytes: &[u8; KEY_LEN] = bytes
            .try_into()
            .map_err(|_| Error::MalformedKeyData("public key must be 32 bytes"))?;

        Self::from_bytes(bytes)
    }

    #[inline]
    pub fn to_bytes(&self) -> [u8; KEY_LEN] {
        self.0
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

/// Seed and the secrets expanded from it. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    seed: [u8; KEY_LEN],
    scalar: Scalar,
    prefix: [u8; KEY_LEN],
}

impl PrivateKey {
    fn from_seed(seed: [u8; KEY_LEN]) -> Self {
        let mut digest = sha512(&seed);

        let mut scalar = [0u8; KEY_LEN];
        scalar.copy_from_slice(&digest[..KEY_LEN]);
        scalar[0] &= 248;
        scalar[31] &= 63;
        scalar[31] |= 64;

        let mut prefix = [0u8; KEY_LEN];
        prefix.copy_from_slice(&digest[KEY_LEN..]);
        digest.zeroize();

        Self {
            seed,
            scalar: Scalar(scalar),
            prefix,
        }
    }

    /// The 32-byte seed; the only value that needs storing.
    pub fn seed(&self) -> &[u8; KEY_LEN] {
        &self.seed
    }

    pub(crate) fn scalar(&self) -> &Scalar {
        &self.scalar
    }

    pub(crate) fn prefix(&self) -> &[u8; KEY_LEN] {
        &self.prefix
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

/// A matched Ed25519 key pair.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl KeyPair {
    /// Generates a key pair from a fresh seed from the process-wide source.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&mut OsRandom)
    }

    /// Generates a key pair from a seed drawn from `rng`.
    pub fn generate_with<R: EntropySource + ?Sized>(rng: &mut R) -> Result<Self> {
        let mut seed = [0u8; KEY_LEN];
        rng.fill(&mut seed)?;

        let pair = Self::from_seed(&seed);
        seed.zeroize();

        debug!("Ed25519 key pair generated");
        Ok(pair)
    }

    /// Derives the key pair for `seed`. Deterministic.
    pub fn from_seed(seed: &[u8; KEY_LEN]) -> Self {
        let private = PrivateKey::from_seed(*seed);
        let public = PublicKey(GeP3::from_scalar_mul(private.scalar()).to_bytes());

        Self { public, private }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamping() {
        let pair = KeyPair::from_seed(&[0x42; KEY_LEN]);
        let scalar = pair.private.scalar().to_bytes();

        assert_eq!(scalar[0] & 7, 0);
        assert_eq!(scalar[31] & 0xc0, 0x40);
    }

    #[test]
    fn test_public_key_validation() {
        let pair = KeyPair::from_seed(&[7; KEY_LEN]);
        assert_eq!(PublicKey::from_bytes(pair.public.as_bytes()).unwrap(), pair.public);

        // y = 2 is not on the curve.
        let mut off_curve = [0u8; KEY_LEN];
        off_curve[0] = 2;
        assert!(matches!(PublicKey::from_bytes(&off_curve), Err(Error::MalformedKeyData(_))));

        // y = p + 1 decodes to y = 1 but is not canonical.
        let mut non_canonical = [0xff; KEY_LEN];
        non_canonical[0] = 0xee;
        non_canonical[31] = 0x7f;
        assert!(matches!(PublicKey::from_bytes(&non_canonical), Err(Error::MalformedKeyData(_))));

        assert!(PublicKey::from_slice(&[0; 31]).is_err());
    }

    #[test]
    fn test_debug_hides_secrets() {
        let pair = KeyPair::from_seed(&[0xab; KEY_LEN]);
        let shown = format!("{:?}", pair.private);

        assert!(!shown.contains("171"));
        assert!(!shown.to_lowercase().contains("ab, "));
    }
}
