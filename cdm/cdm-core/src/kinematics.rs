//! Deterministic 2 -> 3 splitting kinematics in the dipole
//! centre-of-mass frame, and the lab-frame reconstruction step.
//!
//! Conventions: the dipole has invariant mass squared `s123`, the
//! splitting is parameterized by the invariant transverse momentum
//! squared `pt2` and rapidity `y`, and all partons are massless. In
//! the dipole frame the emitter sits on +z and the recoiler on -z.

use thiserror::Error;

use crate::lorentz::{BoostAndRotate, End, LorentzError};
use crate::{approx_eq, FourVector, Scalar};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum KinematicsError {
    #[error(transparent)]
    Lorentz(#[from] LorentzError),
    /// (pt2, y) outside the physical region for this dipole mass.
    #[error("splitting energy came out non-positive (e = {e})")]
    NegativeEnergy { e: Scalar },
    /// k_perp^2 below zero by more than the tolerance.
    #[error("unphysical transverse momentum (k_perp^2 = {kperp2})")]
    UnphysicalKperp { kperp2: Scalar },
    /// No longitudinal sign assignment balances the dipole frame.
    #[error("no longitudinal momentum configuration balances (residual = {residual})")]
    NoLongitudinalSolution { residual: Scalar },
    #[error("energy not conserved across splitting ({expected} -> {actual})")]
    EnergyNotConserved { expected: Scalar, actual: Scalar },
    #[error("dipole invariant mass not conserved across splitting ({expected} -> {actual})")]
    ScaleNotConserved { expected: Scalar, actual: Scalar },
}

/// Invariant mass squared of a momentum sum.
#[inline]
pub fn s_ijk(momenta: &[FourVector]) -> Scalar {
    let total = momenta
        .iter()
        .fold(FourVector::ZERO, |acc, p| acc + *p);
    total.mass2()
}

/// Dipole-frame energies of emitter, emission and recoiler.
#[inline]
pub fn splitting_energies(s123: Scalar, pt2: Scalar, y: Scalar) -> (Scalar, Scalar, Scalar) {
    let root_s = s123.sqrt();
    let pt = pt2.sqrt();
    let e1 = 0.5 * (root_s - pt * y.exp());
    let e2 = pt * y.cosh();
    let e3 = 0.5 * (root_s - pt * (-y).exp());
    (e1, e2, e3)
}

/// Energy fractions x_i = 2 E_i / sqrt(s123); x1 + x2 + x3 = 2.
#[inline]
pub fn energy_fractions(s123: Scalar, pt2: Scalar, y: Scalar) -> (Scalar, Scalar, Scalar) {
    let root_s = s123.sqrt();
    let pt = pt2.sqrt();
    let x1 = 1.0 - pt * y.exp() / root_s;
    let x2 = 2.0 * pt * y.cosh() / root_s;
    let x3 = 1.0 - pt * (-y).exp() / root_s;
    (x1, x2, x3)
}

/// Literal transverse momentum squared of the emission in the dipole
/// frame. Values fractionally below zero (rapidity window boundary) are
/// clamped; anything worse is an error.
pub fn kperp2(s123: Scalar, pt2: Scalar, y: Scalar, tol: Scalar) -> Result<Scalar, KinematicsError> {
    let (e1, e2, e3) = splitting_energies(s123, pt2, y);
    if e1 <= 0.0 {
        return Err(KinematicsError::NegativeEnergy { e: e1 });
    }
    if e3 <= 0.0 {
        return Err(KinematicsError::NegativeEnergy { e: e3 });
    }
    let balance = (e1 * e1 - e2 * e2 + e3 * e3) / (2.0 * e3);
    let k2 = e1 * e1 - balance * balance;
    if k2 < 0.0 {
        if approx_eq(k2, 0.0, tol) {
            return Ok(0.0);
        }
        return Err(KinematicsError::UnphysicalKperp { kperp2: k2 });
    }
    Ok(k2)
}

#[inline]
fn sqrt_clamped(x: Scalar) -> Scalar {
    x.max(0.0).sqrt()
}

/// Build the three massless dipole-frame momenta for a splitting at
/// (pt2, y) with azimuth `phi`. The recoiler is placed on -z and the
/// longitudinal signs are chosen so the net momentum vanishes.
pub fn split_momenta(
    s123: Scalar,
    pt2: Scalar,
    y: Scalar,
    phi: Scalar,
    tol: Scalar,
) -> Result<(FourVector, FourVector, FourVector), KinematicsError> {
    let (e1, e2, e3) = splitting_energies(s123, pt2, y);
    if e1 <= 0.0 {
        return Err(KinematicsError::NegativeEnergy { e: e1 });
    }
    if e3 <= 0.0 {
        return Err(KinematicsError::NegativeEnergy { e: e3 });
    }
    let k2 = kperp2(s123, pt2, y, tol)?;
    let k = k2.sqrt();
    let (sin_phi, cos_phi) = phi.sin_cos();

    let p1z = sqrt_clamped(e1 * e1 - k2);
    let p2z = sqrt_clamped(e2 * e2 - k2);

    // The recoiler takes -z; one of three sign assignments balances.
    let mut chosen = None;
    let mut residual = Scalar::INFINITY;
    for (s1, s2) in [(1.0, 1.0), (1.0, -1.0), (-1.0, 1.0)] {
        let net = s1 * p1z + s2 * p2z - e3;
        if net.abs() <= tol * 1.0_f64.max(e3) {
            chosen = Some((s1 * p1z, s2 * p2z));
            break;
        }
        residual = residual.min(net.abs());
    }
    let (p1z, p2z) = chosen.ok_or(KinematicsError::NoLongitudinalSolution { residual })?;

    let p1 = FourVector::new(e1, -k * cos_phi, -k * sin_phi, p1z);
    let p2 = FourVector::new(e2, k * cos_phi, k * sin_phi, p2z);
    let p3 = FourVector::new(e3, 0.0, 0.0, -e3);
    Ok((p1, p2, p3))
}

/// Absorb an energy imbalance `diff` into a massless vector by rescaling
/// its spatial part, keeping it massless.
pub fn fix_energy_difference(diff: Scalar, v: FourVector) -> FourVector {
    let mag2 = v.spatial_mag2();
    let factor = (diff / mag2 + 1.0).sqrt();
    FourVector::new(
        (v.e * v.e + diff).sqrt(),
        v.px * factor,
        v.py * factor,
        v.pz * factor,
    )
}

/// Replace the pair (v1, v3) by three lab-frame momenta after a
/// splitting at (pt2, y, phi); `v3` is the recoiling end. Floating
/// residue in the total energy is absorbed into the new middle vector,
/// then energy and dipole invariant mass conservation are enforced.
pub fn reconstruct(
    v1: FourVector,
    v3: FourVector,
    pt2: Scalar,
    y: Scalar,
    phi: Scalar,
    tol: Scalar,
) -> Result<(FourVector, FourVector, FourVector), KinematicsError> {
    let energy_in = v1.e + v3.e;
    let s123 = s_ijk(&[v1, v3]);

    let frame = BoostAndRotate::new(v1, v3, End::Second)?;
    let (b1, b2, b3) = split_momenta(s123, pt2, y, phi, tol)?;

    let n1 = frame.inverse(b1);
    let n3 = frame.inverse(b3);
    let mut n2 = frame.inverse(b2);

    let diff = energy_in - (n1.e + n2.e + n3.e);
    n2 = fix_energy_difference(diff, n2);

    let energy_out = n1.e + n2.e + n3.e;
    if !approx_eq(energy_in, energy_out, tol) {
        return Err(KinematicsError::EnergyNotConserved {
            expected: energy_in,
            actual: energy_out,
        });
    }
    let s_out = s_ijk(&[n1, n2, n3]);
    if !approx_eq(s123, s_out, tol) {
        return Err(KinematicsError::ScaleNotConserved { expected: s123, actual: s_out });
    }
    Ok((n1, n2, n3))
}
