#![doc = r#"Four-vector algebra and dipole splitting kinematics.

Provides:
- `Scalar` alias and the `approx_eq` tolerance helper.
- `FourVector`: a `Copy` Minkowski four-vector with (+,-,-,-) metric.
- `lorentz`: boosts, rotations and the combined dipole-frame transform.
- `kinematics`: deterministic 2 -> 3 splitting kinematics. No randomness
  lives in this crate; the azimuthal angle is always a parameter.
"#]

use std::ops::{Add, Mul, Neg, Sub};

pub mod kinematics;
pub mod lorentz;

pub use lorentz::{Boost, BoostAndRotate, End, LorentzError, Rotation};

pub type Scalar = f64;

/// Default comparison tolerance for conservation checks (GeV-scale).
pub const DEFAULT_TOLERANCE: Scalar = 1e-7;

/// Relative-above-one, absolute-below-one closeness check:
/// |a - b| <= tol * max(1, |a|).
#[inline]
pub fn approx_eq(a: Scalar, b: Scalar, tol: Scalar) -> bool {
    (a - b).abs() <= tol * 1.0_f64.max(a.abs())
}

/// A Minkowski four-vector (E, px, py, pz), metric (+,-,-,-).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FourVector {
    pub e: Scalar,
    pub px: Scalar,
    pub py: Scalar,
    pub pz: Scalar,
}

impl FourVector {
    pub const ZERO: FourVector = FourVector { e: 0.0, px: 0.0, py: 0.0, pz: 0.0 };

    #[inline]
    pub fn new(e: Scalar, px: Scalar, py: Scalar, pz: Scalar) -> Self {
        Self { e, px, py, pz }
    }

    /// Minkowski product a.b = E_a E_b - p_a . p_b.
    #[inline]
    pub fn dot(&self, other: &FourVector) -> Scalar {
        self.e * other.e - self.px * other.px - self.py * other.py - self.pz * other.pz
    }

    /// Invariant mass squared, p.p.
    #[inline]
    pub fn mass2(&self) -> Scalar {
        self.dot(self)
    }

    /// |p|^2, the squared length of the spatial part.
    #[inline]
    pub fn spatial_mag2(&self) -> Scalar {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    #[inline]
    pub fn spatial_mag(&self) -> Scalar {
        self.spatial_mag2().sqrt()
    }

    /// Same energy, spatial part negated.
    #[inline]
    pub fn space_reversed(&self) -> FourVector {
        FourVector::new(self.e, -self.px, -self.py, -self.pz)
    }

    #[inline]
    pub fn is_timelike(&self, tol: Scalar) -> bool {
        self.mass2() > tol
    }

    #[inline]
    pub fn is_lightlike(&self, tol: Scalar) -> bool {
        self.mass2().abs() <= tol
    }
}

impl Add for FourVector {
    type Output = FourVector;
    #[inline]
    fn add(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.e + rhs.e, self.px + rhs.px, self.py + rhs.py, self.pz + rhs.pz)
    }
}

impl Sub for FourVector {
    type Output = FourVector;
    #[inline]
    fn sub(self, rhs: FourVector) -> FourVector {
        FourVector::new(self.e - rhs.e, self.px - rhs.px, self.py - rhs.py, self.pz - rhs.pz)
    }
}

impl Mul<Scalar> for FourVector {
    type Output = FourVector;
    #[inline]
    fn mul(self, s: Scalar) -> FourVector {
        FourVector::new(self.e * s, self.px * s, self.py * s, self.pz * s)
    }
}

impl Neg for FourVector {
    type Output = FourVector;
    #[inline]
    fn neg(self) -> FourVector {
        self * -1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minkowski_signature() {
        let p = FourVector::new(5.0, 1.0, 2.0, 3.0);
        assert!((p.mass2() - (25.0 - 14.0)).abs() < 1e-12);
    }

    #[test]
    fn approx_eq_scales_with_magnitude() {
        assert!(approx_eq(1e6, 1e6 + 0.05, 1e-7));
        assert!(!approx_eq(1.0, 1.0 + 1e-6, 1e-7));
    }
}
