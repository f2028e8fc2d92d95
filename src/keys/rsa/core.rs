use std::fmt;
use std::path::Path;

use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use super::codec;
use super::generate;
use super::params::RsaParams;
use crate::error::{Error, Result};
use crate::primitives::BigInt;
use crate::rng::{EntropySource, OsRandom};

/// RSA public key: modulus `n` and public exponent `a`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublicKey {
    n: BigInt,
    a: BigInt,
}

impl PublicKey {
    /// Builds a public key, rejecting a modulus or exponent below 2 and an
    /// exponent not smaller than the modulus.
    pub fn new(n: BigInt, a: BigInt) -> Result<Self> {
        if n <= BigInt::ONE || a <= BigInt::ONE || a >= n {
            return Err(Error::MalformedKeyData("public key out of range"));
        }

        Ok(Self { n, a })
    }

    /// Decodes a public key file (fields `n`, `a`).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [n, a] = codec::decode(bytes, [codec::TAG_N, codec::TAG_A])?;
        Self::new(n, a)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        codec::encode(&[(codec::TAG_N, &self.n), (codec::TAG_A, &self.a)])
    }

    pub fn modulus(&self) -> &BigInt {
        &self.n
    }

    pub fn exponent(&self) -> &BigInt {
        &self.a
    }

    /// Modulus length in bytes; also the RSA signature length.
    pub fn size(&self) -> usize {
        self.n.byte_len()
    }
}

/// RSA private key: primes `p`, `q` and private exponent `b`.
///
/// All three values are wiped when the key is dropped, and `Debug` output
/// never includes them.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct PrivateKey {
    p: BigInt,
    q: BigInt,
    b: BigInt,
}

impl PrivateKey {
    pub(crate) fn new(p: BigInt, q: BigInt, b: BigInt) -> Self {
        Self { p, q, b }
    }

    /// Decodes a private key file (fields `p`, `q`, `b`).
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let [p, q, b] = codec::decode(bytes, [codec::TAG_P, codec::TAG_Q, codec::TAG_B])?;

        if p <= BigInt::ONE || q <= BigInt::ONE || b.is_zero() {
            return Err(Error::MalformedKeyData("private key out of range"));
        }

        Ok(Self { p, q, b })
    }

    /// Encodes the key. The buffer is wiped when dropped.
    pub fn to_bytes(&self) -> Zeroizing<Vec<u8>> {
        Zeroizing::new(codec::encode(&[
            (codec::TAG_P, &self.p),
            (codec::TAG_Q, &self.q),
            (codec::TAG_B, &self.b),
        ]))
    }

    pub fn p(&self) -> &BigInt {
        &self.p
    }

    pub fn q(&self) -> &BigInt {
        &self.q
    }

    /// The private exponent `b`.
    pub fn exponent(&self) -> &BigInt {
        &self.b
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrivateKey").finish_non_exhaustive()
    }
}

/// A matched RSA key pair.
#[derive(Clone, Debug)]
pub struct KeyPair {
    pub public: PublicKey,
    pub private: PrivateKey,
}

impl KeyPair {
    /// Generates a 2048-bit key pair with default parameters and the
    /// process-wide random source.
    pub fn generate() -> Result<Self> {
        Self::generate_with(&RsaParams::default(), &mut OsRandom)
    }

    /// Generates a key pair with explicit parameters and randomness.
    pub fn generate_with<R: EntropySource + ?Sized>(params: &RsaParams, rng: &mut R) -> Result<Self> {
        generate::key_pair(params, rng)
    }

    /// Pairs a public and a private key after checking they belong
    /// together: `n == p * q` and `a * b ≡ 1 (mod (p-1)(q-1))`.
    pub fn from_parts(public: PublicKey, private: PrivateKey) -> Result<Self> {
        let n = private.p.mul(&private.q)?;
        if n != public.n {
            return Err(Error::MalformedKeyData("modulus does not match primes"));
        }

        let p_1 = Zeroizing::new(private.p.sub(&BigInt::ONE)?);
        let q_1 = Zeroizing::new(private.q.sub(&BigInt::ONE)?);
        let phi = Zeroizing::new(p_1.mul(&q_1)?);
        if !public.a.mod_mul(&private.b, &phi)?.is_one() {
            return Err(Error::MalformedKeyData("exponents do not match"));
        }

        Ok(Self { public, private })
    }

    /// Decodes and cross-checks a public and a private key buffer.
    pub fn from_bytes(public: &[u8], private: &[u8]) -> Result<Self> {
        Self::from_parts(PublicKey::from_bytes(public)?, PrivateKey::from_bytes(private)?)
    }

    /// Encodes the public and the private key; the inverse of
    /// [`KeyPair::from_bytes`].
    pub fn to_bytes(&self) -> (Vec<u8>, Zeroizing<Vec<u8>>) {
        (self.public.to_bytes(), self.private.to_bytes())
    }

    /// Loads a key pair from a public and a private key file.
    pub fn from_files<P: AsRef<Path>, Q: AsRef<Path>>(public: P, private: Q) -> Result<Self> {
        let public = std::fs::read(public)?;
        let private = Zeroizing::new(std::fs::read(private)?);

        Self::from_bytes(&public, &private)
    }

    /// Writes the public and private key files. On Unix the private file is
    /// created with mode `0600`.
    pub fn to_files<P: AsRef<Path>, Q: AsRef<Path>>(&self, public: P, private: Q) -> Result<()> {
        let (public_bytes, private_bytes) = self.to_bytes();

        std::fs::write(public, public_bytes)?;
        write_private(private.as_ref(), &private_bytes)?;

        Ok(())
    }
}

#[cfg(unix)]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::OpenOptionsExt;

    std::fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)?
        .write_all(bytes)
}

#[cfg(not(unix))]
fn write_private(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    std::fs::write(path, bytes)
}
