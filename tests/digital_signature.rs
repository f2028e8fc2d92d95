use once_cell::sync::Lazy;

use cryptal_core::Error;
use cryptal_core::hash::sha256::sha256;
use cryptal_core::keys::rsa::{KeyPair, RsaParams};
use cryptal_core::primitives::BigInt;
use cryptal_core::rng::Csprng;
use cryptal_core::signatures::{digital_signature, dsa};

fn generate(seed: u8) -> KeyPair {
    let params = RsaParams {
        prime_bits: 512,
        ..RsaParams::default()
    };

    KeyPair::generate_with(&params, &mut Csprng::from_seed([seed; 32])).unwrap()
}

static KEYS: Lazy<KeyPair> = Lazy::new(|| generate(0x51));

// -------------------------------------------------------
// 1. DIGITAL SIGNATURE
// -------------------------------------------------------

#[test]
fn signature_round_trip() {
    let signature = digital_signature::sign(b"Hello, World!", &KEYS).unwrap();

    assert_eq!(signature.len(), KEYS.public.size());
    assert!(digital_signature::verify(b"Hello, World!", &signature, &KEYS.public).is_ok());
}

#[test]
fn signature_is_deterministic() {
    let a = digital_signature::sign(b"same message", &KEYS).unwrap();
    let b = digital_signature::sign(b"same message", &KEYS).unwrap();

    assert_eq!(a, b);
}

#[test]
fn signature_recovers_digest_block() {
    let message = b"block layout";
    let signature = digital_signature::sign(message, &KEYS).unwrap();

    let s = BigInt::from_be_bytes(&signature).unwrap();
    let block = s
        .mod_exp(KEYS.public.exponent(), KEYS.public.modulus())
        .unwrap()
        .to_be_bytes_padded(KEYS.public.size())
        .unwrap();

    let split = block.len() - 32;
    assert!(block[..split].iter().all(|&b| b == 0));
    assert_eq!(block[split..], sha256(message));
}

#[test]
fn signature_rejects_tampered_message() {
    let signature = digital_signature::sign(b"Hello, World!", &KEYS).unwrap();

    assert!(matches!(
        digital_signature::verify(b"hello, World!", &signature, &KEYS.public),
        Err(Error::InvalidSignature)
    ));
}

#[test]
fn signature_rejects_tampered_signature() {
    let signature = digital_signature::sign(b"payload", &KEYS).unwrap();

    for index in [0, 1, signature.len() / 2, signature.len() - 1] {
        let mut tampered = signature.clone();
        tampered[index] ^= 0x80;

        assert!(matches!(
            digital_signature::verify(b"payload", &tampered, &KEYS.public),
            Err(Error::InvalidSignature)
        ));
    }
}

#[test]
fn signature_rejects_wrong_length() {
    let signature = digital_signature::sign(b"payload", &KEYS).unwrap();

    assert!(matches!(
        digital_signature::verify(b"payload", &signature[1..], &KEYS.public),
        Err(Error::InvalidSignature)
    ));
    assert!(matches!(
        digital_signature::verify(b"payload", &[], &KEYS.public),
        Err(Error::InvalidSignature)
    ));

    let mut long = signature.clone();
    long.push(0);
    assert!(matches!(
        digital_signature::verify(b"payload", &long, &KEYS.public),
        Err(Error::InvalidSignature)
    ));
}

#[test]
fn signature_rejects_out_of_range() {
    // All-ones is at least n for any k-byte modulus.
    let forged = vec![0xff; KEYS.public.size()];

    assert!(matches!(
        digital_signature::verify(b"payload", &forged, &KEYS.public),
        Err(Error::InvalidSignature)
    ));
}

#[test]
fn signature_rejects_wrong_key() {
    let other = generate(0x52);
    let signature = digital_signature::sign(b"payload", &KEYS).unwrap();

    assert!(matches!(
        digital_signature::verify(b"payload", &signature, &other.public),
        Err(Error::InvalidSignature)
    ));
}

#[test]
fn signature_empty_message() {
    assert!(matches!(
        digital_signature::sign(b"", &KEYS),
        Err(Error::InvalidArgument(_))
    ));

    let signature = digital_signature::sign(b"x", &KEYS).unwrap();
    assert!(matches!(
        digital_signature::verify(b"", &signature, &KEYS.public),
        Err(Error::InvalidSignature)
    ));
}

// -------------------------------------------------------
// 2. DSA (CRT)
// -------------------------------------------------------

#[test]
fn dsa_round_trip() {
    let signature = dsa::sign(b"Hello, World!", &KEYS).unwrap();

    assert_eq!(signature.len(), KEYS.public.size());
    assert!(dsa::verify(b"Hello, World!", &signature, &KEYS.public).is_ok());
    assert!(matches!(
        dsa::verify(b"Hello, World?", &signature, &KEYS.public),
        Err(Error::InvalidSignature)
    ));
}

#[test]
fn dsa_matches_plain_signature() {
    let message = b"cross-check";

    let plain = digital_signature::sign(message, &KEYS).unwrap();
    let crt = dsa::sign(message, &KEYS).unwrap();

    assert_eq!(plain, crt);
    assert!(dsa::verify(message, &plain, &KEYS.public).is_ok());
    assert!(digital_signature::verify(message, &crt, &KEYS.public).is_ok());
}

#[test]
fn dsa_rejects_mismatched_key_pair() {
    let other = generate(0x53);
    let mixed = KeyPair {
        public: KEYS.public.clone(),
        private: other.private.clone(),
    };

    assert!(matches!(
        dsa::sign(b"payload", &mixed),
        Err(Error::MalformedKeyData(_))
    ));
}

#[test]
fn dsa_rejects_malformed_input() {
    assert!(matches!(dsa::sign(b"", &KEYS), Err(Error::InvalidArgument(_))));

    let signature = dsa::sign(b"payload", &KEYS).unwrap();
    assert!(matches!(
        dsa::verify(b"payload", &signature[..10], &KEYS.public),
        Err(Error::InvalidSignature)
    ));

    let mut tampered = signature;
    tampered[5] ^= 0x01;
    assert!(matches!(
        dsa::verify(b"payload", &tampered, &KEYS.public),
        Err(Error::InvalidSignature)
    ));
}
