use cryptal_core::Error;
use cryptal_core::primitives::BigInt;
use cryptal_core::rng::{Csprng, EntropySource};

fn big(v: u64) -> BigInt {
    BigInt::from_u64(v)
}

fn from_hex(s: &str) -> BigInt {
    BigInt::from_be_bytes(&hex::decode(s).unwrap()).unwrap()
}

/// An entropy source that always fails.
struct NoEntropy;

impl EntropySource for NoEntropy {
    fn fill(&mut self, _buf: &mut [u8]) -> cryptal_core::Result<()> {
        Err(Error::EntropyUnavailable)
    }
}

// -------------------------------------------------------
// 1. ARITHMETIC
// -------------------------------------------------------

#[test]
fn test_add_sub_carry_across_limbs() {
    let a = from_hex("ffffffffffffffffffffffffffffffff");
    let sum = a.add(&BigInt::ONE).unwrap();

    assert_eq!(sum, BigInt::ONE.shl(128).unwrap());
    assert_eq!(sum.sub(&BigInt::ONE).unwrap(), a);
}

#[test]
fn test_signed_arithmetic() {
    let d = big(5).sub(&big(9)).unwrap();
    assert!(d.is_negative());
    assert_eq!(d.abs(), big(4));
    assert_eq!(d.add(&big(4)).unwrap(), BigInt::ZERO);
    assert!(!BigInt::ZERO.is_negative());

    let p = d.mul(&big(3)).unwrap();
    assert_eq!(p, -big(12));
    assert!(p < BigInt::ZERO);
}

#[test]
fn test_mul_matches_u128() {
    let a = 0xdead_beef_cafe_babe_u64;
    let b = 0x1234_5678_9abc_def1_u64;
    let expected = a as u128 * b as u128;

    let product = big(a).mul(&big(b)).unwrap();
    assert_eq!(product.to_be_bytes()[240..], expected.to_be_bytes());
}

#[test]
fn test_overflow_is_reported() {
    let top = BigInt::ONE.shl(2047).unwrap();

    assert!(matches!(top.add(&top), Err(Error::Overflow)));
    assert!(matches!(top.mul(&BigInt::TWO), Err(Error::Overflow)));
    assert!(matches!(BigInt::ONE.shl(2048), Err(Error::Overflow)));
    assert!(matches!(BigInt::from_be_bytes(&[1; 257]), Err(Error::Overflow)));
}

#[test]
fn test_div_rem() {
    let (q, r) = big(100).div_rem(&big(7)).unwrap();
    assert_eq!((q, r), (big(14), big(2)));

    let (q, r) = (-big(100)).div_rem(&big(7)).unwrap();
    assert_eq!((q, r), (-big(14), -big(2)));
    assert_eq!((-big(100)).rem_euclid(&big(7)).unwrap(), big(5));

    assert!(matches!(big(1).div_rem(&BigInt::ZERO), Err(Error::DivideByZero)));
}

#[test]
fn test_div_rem_large() {
    let n = from_hex("c0ffee00000000000000000000000000000000000000000000000123456789abcdef");
    let d = from_hex("fedcba98765432100000000000000001");

    let (q, r) = n.div_rem(&d).unwrap();
    assert!(r < d);
    assert_eq!(q.mul(&d).unwrap().add(&r).unwrap(), n);
}

#[test]
fn test_byte_conversions() {
    let v = from_hex("0102030405060708090a");
    assert_eq!(v.bits(), 73);
    assert_eq!(v.byte_len(), 10);
    assert_eq!(v.to_be_bytes_padded(12).unwrap(), hex::decode("00000102030405060708090a").unwrap());
    assert!(matches!(v.to_be_bytes_padded(9), Err(Error::InvalidArgument(_))));
    assert_eq!(format!("{v:x}"), "102030405060708090a");
    assert_eq!(format!("{:?}", -big(255)), "BigInt(-0xff)");
}

// -------------------------------------------------------
// 2. MODULAR ARITHMETIC
// -------------------------------------------------------

#[test]
fn test_mod_exp_zero_exponent_is_one() {
    let n = big(1_000_003);
    for x in [0u64, 1, 2, 999_999] {
        assert_eq!(big(x).mod_exp(&BigInt::ZERO, &n).unwrap(), BigInt::ONE);
    }
}

#[test]
fn test_mod_exp_fermat() {
    // 2^(p-1) ≡ 1 mod p for the Mersenne prime 2^127 - 1.
    let p = BigInt::ONE.shl(127).unwrap().sub(&BigInt::ONE).unwrap();
    let e = p.sub(&BigInt::ONE).unwrap();

    assert_eq!(big(2).mod_exp(&e, &p).unwrap(), BigInt::ONE);
}

#[test]
fn test_mod_exp_errors() {
    assert!(matches!(big(2).mod_exp(&big(3), &BigInt::ZERO), Err(Error::DivideByZero)));
    assert!(matches!(
        big(2).mod_exp(&-big(3), &big(7)),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_mod_inverse() {
    let inv = big(17).mod_inverse(&big(3120)).unwrap();
    assert_eq!(inv, big(2753));
    assert_eq!(big(17).mod_mul(&inv, &big(3120)).unwrap(), BigInt::ONE);

    let inv = (-big(3)).mod_inverse(&big(11)).unwrap();
    assert_eq!(inv, big(7));
}

#[test]
fn test_mod_inverse_none() {
    assert!(matches!(big(6).mod_inverse(&big(9)), Err(Error::NoInverse)));
    assert!(matches!(BigInt::ZERO.mod_inverse(&big(9)), Err(Error::NoInverse)));
}

#[test]
fn test_gcd() {
    assert_eq!(big(462).gcd(&big(1071)).unwrap(), big(21));
    assert_eq!(big(0).gcd(&big(5)).unwrap(), big(5));
}

// -------------------------------------------------------
// 3. PRIMALITY AND RANDOMNESS
// -------------------------------------------------------

#[test]
fn test_small_primality_is_stable() {
    for _ in 0..50 {
        assert!(big(61).is_probable_prime(20).unwrap());
        assert!(!big(91).is_probable_prime(20).unwrap());
    }

    assert!(!BigInt::ZERO.is_probable_prime(20).unwrap());
    assert!(!BigInt::ONE.is_probable_prime(20).unwrap());
    assert!(big(2).is_probable_prime(20).unwrap());
    assert!(!(-big(7)).is_probable_prime(20).unwrap());
}

#[test]
fn test_large_primes_and_composites() {
    let mut rng = Csprng::from_seed([11; 32]);

    // 2^127 - 1 and 2^521 - 1 are Mersenne primes.
    let m127 = BigInt::ONE.shl(127).unwrap().sub(&BigInt::ONE).unwrap();
    let m521 = BigInt::ONE.shl(521).unwrap().sub(&BigInt::ONE).unwrap();
    assert!(m127.is_probable_prime_with(20, &mut rng).unwrap());
    assert!(m521.is_probable_prime_with(20, &mut rng).unwrap());

    // Carmichael number and a product of two large primes.
    assert!(!big(561).is_probable_prime_with(20, &mut rng).unwrap());
    assert!(!m127.mul(&m127).unwrap().is_probable_prime_with(20, &mut rng).unwrap());
    assert!(!big(1_000_003 * 1_000_033).is_probable_prime_with(20, &mut rng).unwrap());
}

#[test]
fn test_zero_rounds_rejected() {
    assert!(matches!(big(61).is_probable_prime(0), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_random_bits_bounds() {
    let mut rng = Csprng::from_seed([5; 32]);

    for bits in [1, 8, 100, 1024, 2048] {
        for _ in 0..10 {
            assert!(BigInt::random_bits_with(bits, &mut rng).unwrap().bits() <= bits);
        }
    }

    assert_eq!(BigInt::random_bits(0).unwrap(), BigInt::ZERO);
    assert!(matches!(BigInt::random_bits(2049), Err(Error::InvalidArgument(_))));
}

#[test]
fn test_random_below() {
    let mut rng = Csprng::from_seed([6; 32]);
    let bound = big(1000);

    for _ in 0..100 {
        assert!(BigInt::random_below(&bound, &mut rng).unwrap() < bound);
    }
}

#[test]
fn test_entropy_failure_propagates() {
    assert!(matches!(
        BigInt::random_bits_with(128, &mut NoEntropy),
        Err(Error::EntropyUnavailable)
    ));

    // Trial division settles small values without drawing any bases.
    assert!(big(61).is_probable_prime_with(20, &mut NoEntropy).unwrap());

    let m127 = BigInt::ONE.shl(127).unwrap().sub(&BigInt::ONE).unwrap();
    assert!(matches!(
        m127.is_probable_prime_with(20, &mut NoEntropy),
        Err(Error::EntropyUnavailable)
    ));
}
