//! An ordered pair of colour-connected particles with its cached
//! invariant mass and Sudakov candidate.

use cdm_core::kinematics::s_ijk;
use cdm_core::{End, Scalar};
use cdm_sudakov::{ProcessKind, Splitting};
use rand::Rng;

use crate::error::ShowerError;
use crate::particle::Particle;

/// State of a dipole's cached Sudakov proposal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Candidate {
    /// Needs (re)sampling: freshly built or an endpoint changed.
    Stale,
    /// Sampled; nothing above the cutoff.
    Quiet,
    /// Sampled; this splitting is on offer.
    Ready(Splitting),
}

#[derive(Clone, Debug)]
pub struct Dipole {
    first: Particle,
    second: Particle,
    mass2: Scalar,
    candidate: Candidate,
}

impl Dipole {
    pub fn new(first: Particle, second: Particle) -> Dipole {
        let mass2 = s_ijk(&[first.momentum(), second.momentum()]);
        Dipole { first, second, mass2, candidate: Candidate::Stale }
    }

    #[inline]
    pub fn first(&self) -> &Particle {
        &self.first
    }

    #[inline]
    pub fn second(&self) -> &Particle {
        &self.second
    }

    #[inline]
    pub fn end(&self, end: End) -> &Particle {
        match end {
            End::First => &self.first,
            End::Second => &self.second,
        }
    }

    /// Swap in a new endpoint; the cached mass and candidate go stale.
    pub fn replace_end(&mut self, end: End, particle: Particle) {
        match end {
            End::First => self.first = particle,
            End::Second => self.second = particle,
        }
        self.mass2 = s_ijk(&[self.first.momentum(), self.second.momentum()]);
        self.candidate = Candidate::Stale;
    }

    /// Invariant mass squared of the pair.
    #[inline]
    pub fn mass2(&self) -> Scalar {
        self.mass2
    }

    #[inline]
    pub fn candidate(&self) -> Candidate {
        self.candidate
    }

    #[inline]
    pub fn set_candidate(&mut self, candidate: Candidate) {
        self.candidate = candidate;
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.candidate = Candidate::Stale;
    }

    /// Which end recoils for a given process.
    ///
    /// Emission (gluon or photon): a gluon recoils against a quark; in
    /// g-g the more energetic end recoils (ties random); in q-qbar an
    /// end retains its direction with probability proportional to its
    /// energy squared.
    ///
    /// Gluon splitting: the gluon is the split member, so the other
    /// end recoils; in g-g the choice is random.
    pub fn recoil_end<R: Rng>(
        &self,
        process: ProcessKind,
        rng: &mut R,
    ) -> Result<End, ShowerError> {
        let first_gluon = self.first.species().is_gluon();
        let second_gluon = self.second.species().is_gluon();
        match process {
            ProcessKind::GluonEmission | ProcessKind::PhotonEmission => {
                match (first_gluon, second_gluon) {
                    (false, true) => Ok(End::Second),
                    (true, false) => Ok(End::First),
                    (true, true) => {
                        let e1 = self.first.energy();
                        let e2 = self.second.energy();
                        if e1 > e2 {
                            Ok(End::First)
                        } else if e2 > e1 {
                            Ok(End::Second)
                        } else if rng.gen_bool(0.5) {
                            Ok(End::First)
                        } else {
                            Ok(End::Second)
                        }
                    }
                    (false, false) => {
                        let w1 = self.first.energy() * self.first.energy();
                        let w2 = self.second.energy() * self.second.energy();
                        let draw = rng.gen_range(0.0..w1 + w2);
                        if draw <= w1 {
                            Ok(End::Second)
                        } else {
                            Ok(End::First)
                        }
                    }
                }
            }
            ProcessKind::GluonSplitting => match (first_gluon, second_gluon) {
                (false, true) => Ok(End::First),
                (true, false) => Ok(End::Second),
                (true, true) => {
                    if rng.gen_bool(0.5) {
                        Ok(End::First)
                    } else {
                        Ok(End::Second)
                    }
                }
                (false, false) => Err(ShowerError::SplitOnNonGluon {
                    code: self.first.pdg_code(),
                }),
            },
        }
    }
}
