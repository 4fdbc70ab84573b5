//! Lorentz boosts and rotations for moving between the lab frame and a
//! dipole's centre-of-mass frame with the non-recoiling end on +z.

use std::f64::consts::TAU;

use thiserror::Error;

use crate::{FourVector, Scalar, DEFAULT_TOLERANCE};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum LorentzError {
    /// Boosting is undefined for spacelike frame vectors.
    #[error("cannot boost into the frame of a spacelike four-vector (m^2 = {m2})")]
    SpacelikeFrame { m2: Scalar },
    /// A massless frame vector has no rest frame.
    #[error("cannot boost into the frame of a (near-)lightlike four-vector (m^2 = {m2})")]
    NullFrame { m2: Scalar },
    /// A rotation axis cannot be built from a vector with no spatial part.
    #[error("four-vector has no spatial direction to rotate onto the z axis")]
    NoDirection,
}

/// Which member of an ordered pair recoils.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum End {
    First,
    Second,
}

impl End {
    #[inline]
    pub fn other(self) -> End {
        match self {
            End::First => End::Second,
            End::Second => End::First,
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        match self {
            End::First => 0,
            End::Second => 1,
        }
    }
}

/// A pure boost into the rest frame of a timelike four-vector.
#[derive(Clone, Copy, Debug)]
pub struct Boost {
    frame: FourVector,
    mass: Scalar,
}

impl Boost {
    pub fn new(frame: FourVector) -> Result<Boost, LorentzError> {
        let m2 = frame.mass2();
        if m2 < -DEFAULT_TOLERANCE {
            return Err(LorentzError::SpacelikeFrame { m2 });
        }
        if m2 <= DEFAULT_TOLERANCE {
            return Err(LorentzError::NullFrame { m2 });
        }
        Ok(Boost { frame, mass: m2.sqrt() })
    }

    #[inline]
    fn transform(frame: &FourVector, mass: Scalar, p: FourVector) -> FourVector {
        let e = frame.dot(&p) / mass;
        let alpha = (p.e + e) / (mass + frame.e);
        FourVector::new(
            e,
            p.px - alpha * frame.px,
            p.py - alpha * frame.py,
            p.pz - alpha * frame.pz,
        )
    }

    /// Boost `p` into the frame's rest frame.
    #[inline]
    pub fn apply(&self, p: FourVector) -> FourVector {
        Self::transform(&self.frame, self.mass, p)
    }

    /// Boost `p` back from the rest frame to the original frame.
    #[inline]
    pub fn inverse(&self, p: FourVector) -> FourVector {
        Self::transform(&self.frame.space_reversed(), self.mass, p)
    }
}

/// A rotation taking the spatial direction of a reference vector onto +z.
#[derive(Clone, Copy, Debug)]
pub struct Rotation {
    theta: Scalar,
    phi: Scalar,
}

impl Rotation {
    pub fn new(reference: &FourVector) -> Result<Rotation, LorentzError> {
        let r = reference.spatial_mag();
        if r <= DEFAULT_TOLERANCE {
            return Err(LorentzError::NoDirection);
        }
        let theta = -(reference.pz / r).clamp(-1.0, 1.0).acos();
        let mut phi = reference.py.atan2(reference.px);
        if phi < 0.0 {
            phi += TAU;
        }
        Ok(Rotation { theta, phi: -phi })
    }

    /// Rotate the spatial part; the energy is untouched.
    pub fn apply(&self, p: FourVector) -> FourVector {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        FourVector::new(
            p.e,
            ct * cp * p.px - ct * sp * p.py + st * p.pz,
            sp * p.px + cp * p.py,
            -st * cp * p.px + st * sp * p.py + ct * p.pz,
        )
    }

    /// The transposed (inverse) rotation.
    pub fn inverse(&self, p: FourVector) -> FourVector {
        let (st, ct) = self.theta.sin_cos();
        let (sp, cp) = self.phi.sin_cos();
        FourVector::new(
            p.e,
            ct * cp * p.px + sp * p.py - st * cp * p.pz,
            -ct * sp * p.px + cp * p.py + st * sp * p.pz,
            st * p.px + ct * p.pz,
        )
    }
}

/// Boost into the joint centre-of-mass frame of a pair, then rotate the
/// non-recoiling member onto the +z axis.
#[derive(Clone, Copy, Debug)]
pub struct BoostAndRotate {
    boost: Boost,
    rotation: Rotation,
}

impl BoostAndRotate {
    pub fn new(p1: FourVector, p2: FourVector, recoil: End) -> Result<BoostAndRotate, LorentzError> {
        let boost = Boost::new(p1 + p2)?;
        let reference = match recoil {
            End::First => boost.apply(p2),
            End::Second => boost.apply(p1),
        };
        let rotation = Rotation::new(&reference)?;
        Ok(BoostAndRotate { boost, rotation })
    }

    #[inline]
    pub fn forward(&self, p: FourVector) -> FourVector {
        self.rotation.apply(self.boost.apply(p))
    }

    #[inline]
    pub fn inverse(&self, p: FourVector) -> FourVector {
        self.boost.inverse(self.rotation.inverse(p))
    }
}
