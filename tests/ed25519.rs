use cryptal_core::Error;
use cryptal_core::keys::ed25519::{KeyPair, PublicKey};
use cryptal_core::rng::Csprng;
use cryptal_core::signatures::ed25519::{SIGNATURE_LEN, Signature, sign, verify, verify_slice};

/// Group order ℓ, little-endian.
const ORDER: [u8; 32] = [
    0xed, 0xd3, 0xf5, 0x5c, 0x1a, 0x63, 0x12, 0x58, 0xd6, 0x9c, 0xf7, 0xa2, 0xde, 0xf9, 0xde, 0x14,
    0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x10,
];

fn seed(s: &str) -> [u8; 32] {
    hex::decode(s).unwrap().try_into().unwrap()
}

// -------------------------------------------------------
// 1. RFC 8032 §7.1
// -------------------------------------------------------

struct Vector {
    seed: &'static str,
    public: &'static str,
    message: &'static str,
    signature: &'static str,
}

const RFC8032: [Vector; 3] = [
    Vector {
        seed: "9d61b19deffd5a60ba844af492ec2cc44449c5697b326919703bac031cae7f60",
        public: "d75a980182b10ab7d54bfed3c964073a0ee172f3daa62325af021a68f707511a",
        message: "",
        signature: "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b",
    },
    Vector {
        seed: "4ccd089b28ff96da9db6c346ec114e0f5b8a319f35aba624da8cf6ed4fb8a6fb",
        public: "3d4017c3e843895a92b70aa74d1b7ebc9c982ccf2ec4968cc0cd55f12af4660c",
        message: "72",
        signature: "92a009a9f0d4cab8720e820b5f642540a2b27b5416503f8fb3762223ebdb69da085ac1e43e15996e458f3613d0f11d8c387b2eaeb4302aeeb00d291612bb0c00",
    },
    Vector {
        seed: "c5aa8df43f9f837bedb7442f31dcb7b166d38535076f094b85ce3a2e0b4458f7",
        public: "fc51cd8e6218a1a38da47ed00230f0580816ed13ba3303ac5deb911548908025",
        message: "af82",
        signature: "6291d657deec24024827e69c3abe01a30ce548a284743a445e3680d7db5ac3ac18ff9b538d16f290ae67f760984dc6594a7c15e9716ed28dc027beceea1ec40a",
    },
];

#[test]
fn ed25519_rfc8032_vectors() {
    for vector in &RFC8032 {
        let pair = KeyPair::from_seed(&seed(vector.seed));
        let message = hex::decode(vector.message).unwrap();

        assert_eq!(hex::encode(pair.public.to_bytes()), vector.public);

        let signature = sign(&message, &pair);
        assert_eq!(hex::encode(signature.to_bytes()), vector.signature);

        assert!(verify(&message, &signature, &pair.public).is_ok());
    }
}

#[test]
fn ed25519_verifies_external_signature() {
    let vector = &RFC8032[2];
    let public = PublicKey::from_slice(&hex::decode(vector.public).unwrap()).unwrap();
    let signature = hex::decode(vector.signature).unwrap();

    assert!(verify_slice(&[0xaf, 0x82], &signature, &public).is_ok());
}

// -------------------------------------------------------
// 2. SIGN / VERIFY
// -------------------------------------------------------

#[test]
fn ed25519_sign_is_deterministic() {
    let pair = KeyPair::from_seed(&[5; 32]);

    assert_eq!(pair.sign(b"message"), pair.sign(b"message"));
    assert_ne!(pair.sign(b"message"), pair.sign(b"messagf"));
}

#[test]
fn ed25519_generated_keys_round_trip() {
    let mut rng = Csprng::from_seed([0x33; 32]);
    let pair = KeyPair::generate_with(&mut rng).unwrap();

    let message = vec![0xa5u8; 1000];
    let signature = pair.sign(&message);
    assert!(pair.public.verify(&message, &signature).is_ok());

    let fresh = KeyPair::generate().unwrap();
    assert_ne!(fresh.public, pair.public);
    assert!(fresh.public.verify(&message, &fresh.sign(&message)).is_ok());
}

#[test]
fn ed25519_rejects_modified_message() {
    let pair = KeyPair::from_seed(&[1; 32]);
    let message = b"transfer 100 coins".to_vec();
    let signature = pair.sign(&message);

    for index in 0..message.len() {
        for bit in 0..8 {
            let mut tampered = message.clone();
            tampered[index] ^= 1 << bit;

            assert!(matches!(
                verify(&tampered, &signature, &pair.public),
                Err(Error::InvalidSignature)
            ));
        }
    }

    assert!(verify(&message[..message.len() - 1], &signature, &pair.public).is_err());
}

#[test]
fn ed25519_rejects_modified_signature() {
    let pair = KeyPair::from_seed(&[2; 32]);
    let signature = pair.sign(b"hello").to_bytes();

    // Every bit of R and s.
    for index in 0..SIGNATURE_LEN {
        for bit in 0..8 {
            let mut tampered = signature;
            tampered[index] ^= 1 << bit;

            assert!(matches!(
                verify(b"hello", &Signature::from_bytes(tampered), &pair.public),
                Err(Error::InvalidSignature)
            ));
        }
    }
}

#[test]
fn ed25519_rejects_wrong_key() {
    let pair = KeyPair::from_seed(&[3; 32]);
    let other = KeyPair::from_seed(&[4; 32]);
    let signature = pair.sign(b"hello");

    assert!(matches!(
        verify(b"hello", &signature, &other.public),
        Err(Error::InvalidSignature)
    ));
}

#[test]
fn ed25519_rejects_non_canonical_s() {
    let pair = KeyPair::from_seed(&[6; 32]);
    let mut signature = pair.sign(b"malleable").to_bytes();

    // s + ℓ still fits in 32 bytes and is congruent to s.
    let mut carry = 0u16;
    for (byte, &l) in signature[32..].iter_mut().zip(ORDER.iter()) {
        let sum = *byte as u16 + l as u16 + carry;
        *byte = sum as u8;
        carry = sum >> 8;
    }
    assert_eq!(carry, 0);

    assert!(matches!(
        verify(b"malleable", &Signature::from_bytes(signature), &pair.public),
        Err(Error::InvalidSignature)
    ));
}

#[test]
fn ed25519_rejects_wrong_length() {
    let pair = KeyPair::from_seed(&[8; 32]);
    let signature = pair.sign(b"x").to_bytes();

    assert!(matches!(
        verify_slice(b"x", &signature[..63], &pair.public),
        Err(Error::InvalidSignature)
    ));
    assert!(matches!(
        verify_slice(b"x", &[signature.as_slice(), &[0]].concat(), &pair.public),
        Err(Error::InvalidSignature)
    ));
    assert!(matches!(Signature::from_slice(&[]), Err(Error::InvalidSignature)));
}

#[test]
fn ed25519_public_key_from_slice() {
    let pair = KeyPair::from_seed(&[9; 32]);

    assert_eq!(PublicKey::from_slice(pair.public.as_bytes()).unwrap(), pair.public);
    assert!(matches!(PublicKey::from_slice(&[1; 33]), Err(Error::MalformedKeyData(_))));
}
