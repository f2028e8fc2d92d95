//! Group arithmetic on the twisted Edwards curve
//!
//! ```text
//! −x² + y² = 1 + d·x²·y²
//! ```
//!
//! Points move between several coordinate systems, each suited to one step:
//!
//! - [`GeP2`] projective `(X : Y : Z)`, the input to doubling,
//! - [`GeP3`] extended `(X : Y : Z : T)` with `XY = ZT`, the general form,
//! - [`GeP1`] completed `((X : Z), (Y : T))`, the output of add/double,
//! - [`GeCached`] `(Y+X, Y−X, Z, 2dT)`, a ready-to-add operand,
//! - [`GePrecomp`] affine `(y+x, y−x, 2dxy)`, a table entry.
//!
//! Fixed-base multiplication for secret scalars ([`GeP3::from_scalar_mul`])
//! walks radix-16 signed digits and reads every table entry on every
//! lookup, so neither branches nor memory addresses depend on the scalar.
//! Double-scalar multiplication ([`GeP3::double_scalar_mul`]) only ever
//! sees public data and uses variable-time sliding windows.
//!
//! The precomputed tables are derived from the base point the first time
//! they are needed.

use once_cell::sync::Lazy;

use super::constants::{BASE_POINT, D, D2, SQRTM1};
use super::field::FieldElement;
use super::scalar::Scalar;
use crate::ct::{ConstantTimeEq, ct_negative};

/// `[j+1] · 256^pos · B` for `pos` in 0..32 and `j` in 0..8.
static BASE: Lazy<Box<[[GePrecomp; 8]; 32]>> = Lazy::new(|| {
    let mut table = Box::new([[GePrecomp::ONE; 8]; 32]);
    let mut point = base_point();

    for row in table.iter_mut() {
        let cached = GeCached::from_p3(&point);
        let mut multiple = point;

        for entry in row.iter_mut() {
            *entry = GePrecomp::from_p3(&multiple);
            multiple = GeP3::from_gep1(&GeP1::from_sum(&multiple, &cached));
        }

        for _ in 0..8 {
            point = GeP3::from_gep1(&point.double());
        }
    }

    table
});

/// Odd multiples `B, 3B, 5B, …, 15B`.
static BI: Lazy<[GePrecomp; 8]> = Lazy::new(|| {
    let b = base_point();
    let b2 = GeCached::from_p3(&GeP3::from_gep1(&b.double()));

    let mut table = [GePrecomp::ONE; 8];
    let mut multiple = b;
    for entry in table.iter_mut() {
        *entry = GePrecomp::from_p3(&multiple);
        multiple = GeP3::from_gep1(&GeP1::from_sum(&multiple, &b2));
    }

    table
});

/// The standard base point `B`.
pub(crate) fn base_point() -> GeP3 {
    // The encoding is a fixed, valid point; decoding cannot fail.
    GeP3::decompress(&BASE_POINT).unwrap_or(GeP3::ONE)
}

/// Affine encoding shared by [`GeP2`] and [`GeP3`]: `y` with the sign of
/// `x` in the top bit.
fn encode(x: &FieldElement, y: &FieldElement, z: &FieldElement) -> [u8; 32] {
    let recip = z.invert();
    let x = *x * recip;
    let y = *y * recip;

    let mut output = y.to_bytes();
    output[31] ^= (x.is_negative() as u8) << 7;

    output
}

/// Completed point, the result of an addition or doubling.
pub(crate) struct GeP1 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl GeP1 {
    /// `a + b`.
    pub(crate) fn from_sum(a: &GeP3, b: &GeCached) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yplusx;
        let mut t = b.t2d * a.t;

        y = y * b.yminusx;
        x = a.z * b.z;

        let sumx = x + x;

        x = z - y;
        y = z + y;
        z = sumx + t;
        t = sumx - t;

        Self { x, y, z, t }
    }

    /// `a − b`.
    pub(crate) fn from_difference(a: &GeP3, b: &GeCached) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yminusx;
        let mut t = b.t2d * a.t;

        y = y * b.yplusx;
        x = a.z * b.z;

        let sumx = x + x;

        x = z - y;
        y = z + y;
        z = sumx - t;
        t = sumx + t;

        Self { x, y, z, t }
    }

    /// `a + b` for an affine `b`.
    pub(crate) fn from_mixed_sum(a: &GeP3, b: &GePrecomp) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yplusx;
        let mut t = b.xy2d * a.t;
        let sumz = a.z + a.z;

        y = y * b.yminusx;
        x = z - y;
        y = z + y;
        z = sumz + t;
        t = sumz - t;

        Self { x, y, z, t }
    }

    /// `a − b` for an affine `b`.
    pub(crate) fn from_mixed_difference(a: &GeP3, b: &GePrecomp) -> Self {
        let mut x = a.y + a.x;
        let mut y = a.y - a.x;
        let mut z = x * b.yminusx;
        let mut t = b.xy2d * a.t;
        let sumz = a.z + a.z;

        y = y * b.yplusx;
        x = z - y;
        y = z + y;
        z = sumz - t;
        t = sumz + t;

        Self { x, y, z, t }
    }
}

/// Projective point.
pub(crate) struct GeP2 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
}

impl GeP2 {
    pub(crate) const ONE: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
    };

    pub(crate) fn from_gep1(g: &GeP1) -> Self {
        Self {
            x: g.x * g.t,
            y: g.y * g.z,
            z: g.z * g.t,
        }
    }

    pub(crate) fn from_gep3(g: &GeP3) -> Self {
        Self {
            x: g.x,
            y: g.y,
            z: g.z,
        }
    }

    pub(crate) fn double(&self) -> GeP1 {
        let mut x = self.x.square();
        let mut z = self.y.square();
        let mut t = self.z.double_square();
        let mut y = self.x + self.y;
        let ysquare = y.square();

        y = z + x;
        z = z - x;
        x = ysquare - y;
        t = t - z;

        GeP1 { x, y, z, t }
    }

    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        encode(&self.x, &self.y, &self.z)
    }
}

/// Extended point.
#[derive(Clone, Copy)]
pub(crate) struct GeP3 {
    pub(crate) x: FieldElement,
    pub(crate) y: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t: FieldElement,
}

impl GeP3 {
    /// The neutral element.
    pub(crate) const ONE: Self = Self {
        x: FieldElement::ZERO,
        y: FieldElement::ONE,
        z: FieldElement::ONE,
        t: FieldElement::ZERO,
    };

    pub(crate) fn from_gep1(g: &GeP1) -> Self {
        Self {
            x: g.x * g.t,
            y: g.y * g.z,
            z: g.z * g.t,
            t: g.x * g.y,
        }
    }

    pub(crate) fn double(&self) -> GeP1 {
        GeP2::from_gep3(self).double()
    }

    pub(crate) fn neg(&self) -> Self {
        Self {
            x: -self.x,
            y: self.y,
            z: self.z,
            t: -self.t,
        }
    }

    pub(crate) fn to_bytes(&self) -> [u8; 32] {
        encode(&self.x, &self.y, &self.z)
    }

    /// Decodes a compressed point, recovering `x` from `y` and the sign bit.
    ///
    /// Returns `None` when `(y² − 1) / (d·y² + 1)` has no square root, i.e.
    /// the encoding is not on the curve. Encodings with `y ≥ p` or a set
    /// sign bit on `x = 0` decode without error; callers that need a
    /// canonical encoding compare against [`GeP3::to_bytes`].
    ///
    /// Variable time; only for public points.
    pub(crate) fn decompress(s: &[u8; 32]) -> Option<Self> {
        let y = FieldElement::from_bytes(s);
        let z = FieldElement::ONE;

        // u = y² − 1, v = d·y² + 1
        let y2 = y.square();
        let u = y2 - z;
        let v = y2 * D + z;

        // x = u·v³ · (u·v⁷)^((p−5)/8)
        let v3 = v.square() * v;
        let mut x = (v3.square() * v * u).pow22523() * v3 * u;

        let vxx = x.square() * v;
        if (vxx - u).is_non_zero() == 1 {
            if (vxx + u).is_non_zero() == 1 {
                return None;
            }

            x = x * SQRTM1;
        }

        if x.is_negative() != (s[31] >> 7) as u32 {
            x = -x;
        }

        Some(Self { x, y, z, t: x * y })
    }

    /// `a · B` for a secret scalar `a` with `a[31] <= 127`.
    ///
    /// The scalar is recoded into 64 signed radix-16 digits in `[−8, 8]`;
    /// odd positions are accumulated, multiplied by 16, then even
    /// positions are added.
    pub(crate) fn from_scalar_mul(a: &Scalar) -> Self {
        let mut e = [0i8; 64];
        for (i, &byte) in a.0.iter().enumerate() {
            e[2 * i] = (byte & 0x0f) as i8;
            e[2 * i + 1] = (byte >> 4) as i8;
        }

        let mut carry = 0i8;
        for v in e.iter_mut().take(63) {
            *v += carry;
            carry = (*v + 8) >> 4;
            *v -= carry << 4;
        }
        e[63] += carry;

        let mut h = Self::ONE;
        for i in (1..64).step_by(2) {
            let t = GePrecomp::select(i / 2, e[i]);
            h = GeP3::from_gep1(&GeP1::from_mixed_sum(&h, &t));
        }

        for _ in 0..4 {
            h = GeP3::from_gep1(&h.double());
        }

        for i in (0..64).step_by(2) {
            let t = GePrecomp::select(i / 2, e[i]);
            h = GeP3::from_gep1(&GeP1::from_mixed_sum(&h, &t));
        }

        e.fill(0);
        h
    }

    /// `a · self + b · B`, variable time.
    pub(crate) fn double_scalar_mul(&self, a: &Scalar, b: &Scalar) -> GeP2 {
        let aslide = a.slide();
        let bslide = b.slide();

        // ai[j] = (2j + 1) · self
        let mut ai = [GeCached::from_p3(self); 8];
        let a2 = GeP3::from_gep1(&self.double());
        for j in 1..8 {
            let t = GeP1::from_sum(&a2, &ai[j - 1]);
            ai[j] = GeCached::from_p3(&GeP3::from_gep1(&t));
        }

        let bi = &*BI;
        let mut r = GeP2::ONE;

        let Some(top) = (0..256).rev().find(|&i| aslide[i] != 0 || bslide[i] != 0) else {
            return r;
        };

        for i in (0..=top).rev() {
            let mut t = r.double();

            let asi = aslide[i];
            if asi > 0 {
                t = GeP1::from_sum(&GeP3::from_gep1(&t), &ai[(asi / 2) as usize]);
            } else if asi < 0 {
                t = GeP1::from_difference(&GeP3::from_gep1(&t), &ai[(-asi / 2) as usize]);
            }

            let bsi = bslide[i];
            if bsi > 0 {
                t = GeP1::from_mixed_sum(&GeP3::from_gep1(&t), &bi[(bsi / 2) as usize]);
            } else if bsi < 0 {
                t = GeP1::from_mixed_difference(&GeP3::from_gep1(&t), &bi[(-bsi / 2) as usize]);
            }

            r = GeP2::from_gep1(&t);
        }

        r
    }
}

/// Addition operand derived from an extended point.
#[derive(Clone, Copy)]
pub(crate) struct GeCached {
    pub(crate) yplusx: FieldElement,
    pub(crate) yminusx: FieldElement,
    pub(crate) z: FieldElement,
    pub(crate) t2d: FieldElement,
}

impl GeCached {
    pub(crate) fn from_p3(g: &GeP3) -> Self {
        Self {
            yplusx: g.y + g.x,
            yminusx: g.y - g.x,
            z: g.z,
            t2d: g.t * D2,
        }
    }
}

/// Affine table entry.
#[derive(Clone, Copy)]
pub(crate) struct GePrecomp {
    pub(crate) yplusx: FieldElement,
    pub(crate) yminusx: FieldElement,
    pub(crate) xy2d: FieldElement,
}

impl GePrecomp {
    /// The neutral element.
    pub(crate) const ONE: Self = Self {
        yplusx: FieldElement::ONE,
        yminusx: FieldElement::ONE,
        xy2d: FieldElement::ZERO,
    };

    fn from_p3(g: &GeP3) -> Self {
        let recip = g.z.invert();
        let x = g.x * recip;
        let y = g.y * recip;

        Self {
            yplusx: y + x,
            yminusx: y - x,
            xy2d: x * y * D2,
        }
    }

    fn conditional_move(&mut self, rhs: &Self, b: u8) {
        self.yplusx.conditional_move(&rhs.yplusx, b as u32);
        self.yminusx.conditional_move(&rhs.yminusx, b as u32);
        self.xy2d.conditional_move(&rhs.xy2d, b as u32);
    }

    /// `b · 256^pos · B` for a digit `b` in `[−8, 8]`, in constant time.
    fn select(pos: usize, b: i8) -> Self {
        let bnegative = ct_negative(b);
        let babs = (b as i16 - (((-(bnegative as i16)) & (b as i16)) << 1)) as i8;

        let mut t = GePrecomp::ONE;
        for (i, entry) in BASE[pos].iter().enumerate() {
            t.conditional_move(entry, babs.ct_eq(&((i + 1) as i8)));
        }

        let minust = GePrecomp {
            yplusx: t.yminusx,
            yminusx: t.yplusx,
            xy2d: -t.xy2d,
        };
        t.conditional_move(&minust, bnegative);

        t
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(v: u64) -> Scalar {
        let mut bytes = [0u8; 32];
        bytes[..8].copy_from_slice(&v.to_le_bytes());
        Scalar(bytes)
    }

    #[test]
    fn test_curve_constants() {
        let d = FieldElement([121_666, 0, 0, 0, 0, 0, 0, 0, 0, 0]) * D;
        let minus = -FieldElement([121_665, 0, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(d.to_bytes(), minus.to_bytes());
        assert_eq!((D + D).to_bytes(), D2.to_bytes());
        assert_eq!(SQRTM1.square().to_bytes(), (-FieldElement::ONE).to_bytes());
    }

    #[test]
    fn test_base_point_round_trip() {
        assert_eq!(base_point().to_bytes(), BASE_POINT);
    }

    #[test]
    fn test_scalar_mul_matches_repeated_addition() {
        let b = GeCached::from_p3(&base_point());
        let mut acc = GeP3::ONE;

        for k in 0..20u64 {
            assert_eq!(GeP3::from_scalar_mul(&scalar(k)).to_bytes(), acc.to_bytes());
            acc = GeP3::from_gep1(&GeP1::from_sum(&acc, &b));
        }
    }

    #[test]
    fn test_double_scalar_mul() {
        let p = GeP3::from_scalar_mul(&scalar(7));
        let expected = GeP3::from_scalar_mul(&scalar(3 * 7 + 11));

        let r = p.double_scalar_mul(&scalar(3), &scalar(11));
        assert_eq!(r.to_bytes(), expected.to_bytes());
    }

    #[test]
    fn test_decompress_rejects_off_curve() {
        // y = 2 gives (y² − 1) / (d·y² + 1) with no square root.
        let mut bytes = [0u8; 32];
        bytes[0] = 2;
        assert!(GeP3::decompress(&bytes).is_none());
    }

    #[test]
    fn test_negation() {
        let p = GeP3::from_scalar_mul(&scalar(5));
        let sum = GeP1::from_sum(&p, &GeCached::from_p3(&p.neg()));

        assert_eq!(GeP3::from_gep1(&sum).to_bytes(), GeP3::ONE.to_bytes());
    }
}
