//! The Sudakov veto sampler.
//!
//! A dipole's next splitting scale is drawn from the analytically
//! invertible overestimate g(pt2) = 3 alpha_s_max / (2 pi pt2) with a
//! rapidity window wide enough to contain the physical phase space,
//! then thinned down to the true (summed-channel) density by rejection.

use cdm_core::Scalar;
use cdm_pdg::Species;
use rand::Rng;
use thiserror::Error;

use crate::config::ShowerConfig;
use crate::couplings::{OneLoopAlphaEM, OneLoopAlphaS};
use crate::cross_section::{self, SplitKind};

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum SudakovError {
    /// The veto loop failed to settle within its iteration budget.
    #[error("veto loop exceeded its iteration budget of {limit}")]
    VetoBudget { limit: usize },
    /// A dipole whose ends cannot radiate (e.g. one end is a photon).
    #[error("no splitting channels for dipole ends {a} and {b}")]
    UnsupportedDipole { a: i32, b: i32 },
    /// Gluon splitting requested with no splittable flavour enabled.
    #[error("no active quark flavour available for gluon splitting")]
    NoActiveFlavour,
}

/// An accepted splitting: the invariant transverse momentum squared,
/// the rapidity, and the channel that won the draw.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Splitting {
    pub pt2: Scalar,
    pub y: Scalar,
    pub kind: SplitKind,
}

/// Overestimate density in (pt2, y), constant in y.
#[inline]
pub fn overestimate(pt2: Scalar, alpha_s_max: Scalar) -> Scalar {
    3.0 * alpha_s_max / (2.0 * std::f64::consts::PI * pt2)
}

/// Primitive of the overestimate with the rapidity window integrated
/// out: G(pt2) = -(3 alpha_s_max / 4 pi) ln^2(s123 / pt2).
#[inline]
pub fn overestimate_primitive(pt2: Scalar, s123: Scalar, alpha_s_max: Scalar) -> Scalar {
    let log = (s123 / pt2).ln();
    -(3.0 * alpha_s_max) / (4.0 * std::f64::consts::PI) * log * log
}

/// Inverse of `overestimate_primitive` in pt2.
#[inline]
pub fn overestimate_primitive_inv(value: Scalar, s123: Scalar, alpha_s_max: Scalar) -> Scalar {
    let log = (-(4.0 * std::f64::consts::PI * value) / (3.0 * alpha_s_max)).sqrt();
    s123 / log.exp()
}

/// Draws the next splitting for a dipole, or decides it is done.
#[derive(Clone, Debug)]
pub struct SudakovSampler {
    alpha_s: OneLoopAlphaS,
    alpha_em: OneLoopAlphaEM,
    cutoff2: Scalar,
    gluon_splitting: bool,
    photon_emission: bool,
    max_iterations: usize,
}

impl SudakovSampler {
    pub fn new(cfg: &ShowerConfig) -> SudakovSampler {
        SudakovSampler {
            alpha_s: OneLoopAlphaS::new(cfg),
            alpha_em: OneLoopAlphaEM::new(cfg),
            cutoff2: cfg.cutoff2(),
            gluon_splitting: cfg.gluon_splitting,
            photon_emission: cfg.photon_emission,
            max_iterations: cfg.max_veto_iterations,
        }
    }

    #[inline]
    pub fn cutoff2(&self) -> Scalar {
        self.cutoff2
    }

    #[inline]
    pub fn alpha_s(&self) -> &OneLoopAlphaS {
        &self.alpha_s
    }

    #[inline]
    pub fn alpha_em(&self) -> &OneLoopAlphaEM {
        &self.alpha_em
    }

    /// The channels open to a dipole with ends `a`, `b`, honouring the
    /// configured toggles.
    pub fn candidates(&self, a: Species, b: Species) -> Result<Vec<SplitKind>, SudakovError> {
        let mut kinds = Vec::with_capacity(3);
        if a.is_quark() && b.is_quark() {
            kinds.push(SplitKind::QqbarEmitGluon);
            if self.photon_emission {
                kinds.push(SplitKind::QqbarEmitPhoton);
            }
        } else if (a.is_quark() && b.is_gluon()) || (a.is_gluon() && b.is_quark()) {
            kinds.push(SplitKind::QgEmitGluon);
            if self.gluon_splitting {
                kinds.push(SplitKind::QgSplitGluon);
            }
        } else if a.is_gluon() && b.is_gluon() {
            kinds.push(SplitKind::GgEmitGluon);
            if self.gluon_splitting {
                kinds.push(SplitKind::GgSplitGluonFirst);
                kinds.push(SplitKind::GgSplitGluonSecond);
            }
        } else {
            return Err(SudakovError::UnsupportedDipole { a: a.pdg_code(), b: b.pdg_code() });
        }
        Ok(kinds)
    }

    /// Sample the next splitting below `max_pt2` for a dipole of mass
    /// squared `s123`. `Ok(None)` means the dipole radiates nothing
    /// above the cutoff.
    pub fn next_splitting<R: Rng>(
        &self,
        rng: &mut R,
        max_pt2: Scalar,
        s123: Scalar,
        a: Species,
        b: Species,
    ) -> Result<Option<Splitting>, SudakovError> {
        if max_pt2 < self.cutoff2 {
            return Ok(None);
        }
        let kinds = self.candidates(a, b)?;
        let alpha_max = self.alpha_s.shower_max();

        let mut reference = max_pt2;
        for _ in 0..self.max_iterations {
            let u: Scalar = rng.gen();
            let pt2 = overestimate_primitive_inv(
                u.ln() + overestimate_primitive(reference, s123, alpha_max),
                s123,
                alpha_max,
            );
            if pt2 > 0.25 * s123 {
                // Above the kinematic ceiling; restart from the
                // rejected scale so the sequence stays ordered.
                reference = pt2;
                continue;
            }
            if pt2 < self.cutoff2 {
                return Ok(None);
            }

            let half_window = 0.5 * (s123 / pt2).ln();
            let y = rng.gen_range(-half_window..half_window);
            let y_max = ((s123 / pt2).sqrt() / 2.0).acosh();
            if y.abs() > y_max {
                reference = pt2;
                continue;
            }

            let total = cross_section::sum_over(
                &kinds, s123, pt2, y, a, b, &self.alpha_s, &self.alpha_em,
            );
            // The channel densities live in (x1, x3); dividing by s123
            // converts to the (pt2, y) density the overestimate bounds.
            let density = total / kinds.len() as Scalar / s123;
            let ratio = density / overestimate(pt2, alpha_max);
            if rng.gen::<Scalar>() >= ratio {
                reference = pt2;
                continue;
            }

            let draw = rng.gen::<Scalar>() * total;
            let mut cumulative = 0.0;
            let mut kind = kinds[kinds.len() - 1];
            for &k in &kinds {
                cumulative += cross_section::value(
                    k, s123, pt2, y, a, b, &self.alpha_s, &self.alpha_em,
                );
                if draw < cumulative {
                    kind = k;
                    break;
                }
            }
            return Ok(Some(Splitting { pt2, y, kind }));
        }
        Err(SudakovError::VetoBudget { limit: self.max_iterations })
    }
}
