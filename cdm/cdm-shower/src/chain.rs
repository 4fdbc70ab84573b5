//! A chain of colour dipoles and its pt2-ordered evolution step.

use std::f64::consts::TAU;

use cdm_core::kinematics::reconstruct;
use cdm_core::{End, FourVector, Scalar};
use cdm_pdg::Species;
use cdm_sudakov::{quark_pairs, ProcessKind, ShowerConfig, SudakovSampler};
use rand::Rng;

use crate::colour;
use crate::dipole::{Candidate, Dipole};
use crate::engine::RunContext;
use crate::error::ShowerError;
use crate::particle::{Particle, Status};

/// Outcome of one evolution step.
#[derive(Clone, Debug)]
pub enum ChainEvent {
    /// Every dipole is below the cutoff; the chain is frozen.
    Completed,
    GluonEmitted { pt2: Scalar },
    /// A gluon became a q qbar pair; the owner must fission this chain
    /// at `split_before` (the dipole dropped between the two halves).
    GluonSplit { split_before: usize, pt2: Scalar },
    /// The photon leaves the chain and is handed back to the owner.
    PhotonEmitted { photon: Particle, pt2: Scalar },
}

/// A contiguous arena of dipoles. Open chains run quark to antiquark;
/// closed chains (pure gluon loops) wrap around.
#[derive(Clone, Debug)]
pub struct Chain {
    dipoles: Vec<Dipole>,
    is_loop: bool,
    max_pt2: Scalar,
    completed: bool,
}

impl Chain {
    /// Build a chain from an ordered particle list: dipole i connects
    /// particle i to particle i+1, plus the wrap-around pair for a
    /// loop. Without an explicit starting scale the largest dipole
    /// mass squared is used.
    pub fn new(
        particles: Vec<Particle>,
        is_loop: bool,
        max_pt2: Option<Scalar>,
    ) -> Result<Chain, ShowerError> {
        if particles.len() < 2 {
            return Err(ShowerError::ChainTooShort { particles: particles.len() });
        }
        let mut dipoles = Vec::with_capacity(particles.len());
        for pair in particles.windows(2) {
            dipoles.push(Dipole::new(pair[0].clone(), pair[1].clone()));
        }
        if is_loop {
            let last = particles[particles.len() - 1].clone();
            let first = particles[0].clone();
            dipoles.push(Dipole::new(last, first));
        }
        let max_pt2 = max_pt2.unwrap_or_else(|| {
            dipoles
                .iter()
                .map(Dipole::mass2)
                .fold(Scalar::MIN, Scalar::max)
        });
        Ok(Chain { dipoles, is_loop, max_pt2, completed: false })
    }

    #[inline]
    pub fn dipoles(&self) -> &[Dipole] {
        &self.dipoles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.dipoles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.dipoles.is_empty()
    }

    #[inline]
    pub fn is_loop(&self) -> bool {
        self.is_loop
    }

    /// Current evolution ceiling; never increases.
    #[inline]
    pub fn max_pt2(&self) -> Scalar {
        self.max_pt2
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        self.completed
    }

    /// Wrap a possibly out-of-range index into the arena.
    #[inline]
    pub fn wrap(&self, index: isize) -> usize {
        let n = self.dipoles.len() as isize;
        (((index % n) + n) % n) as usize
    }

    /// The chain's particles in colour order: each dipole's first end,
    /// plus the open-chain tail.
    pub fn particles(&self) -> Vec<Particle> {
        let mut out: Vec<Particle> =
            self.dipoles.iter().map(|d| d.first().clone()).collect();
        if !self.is_loop {
            if let Some(last) = self.dipoles.last() {
                out.push(last.second().clone());
            }
        }
        out
    }

    /// Run one evolution step: refresh stale Sudakov candidates, pick
    /// the winner, rebuild kinematics and apply the winning process.
    pub fn evolve<R: Rng>(
        &mut self,
        sampler: &SudakovSampler,
        cfg: &ShowerConfig,
        ctx: &mut RunContext,
        rng: &mut R,
    ) -> Result<ChainEvent, ShowerError> {
        if self.completed {
            return Ok(ChainEvent::Completed);
        }
        // A loop has no ends to slice at, so fission is unsupported;
        // refuse before any splitting channel can win.
        if self.is_loop && cfg.gluon_splitting {
            return Err(ShowerError::ClosedChainSplit);
        }
        if self.max_pt2 < sampler.cutoff2() {
            self.max_pt2 = sampler.cutoff2();
            self.completed = true;
            return Ok(ChainEvent::Completed);
        }

        for dipole in &mut self.dipoles {
            if dipole.candidate() == Candidate::Stale {
                let proposal = sampler.next_splitting(
                    rng,
                    self.max_pt2,
                    dipole.mass2(),
                    dipole.first().species(),
                    dipole.second().species(),
                )?;
                dipole.set_candidate(match proposal {
                    Some(splitting) => Candidate::Ready(splitting),
                    None => Candidate::Quiet,
                });
            }
        }

        // Largest pt2 wins; equal maxima resolve to the lowest index.
        let mut winner: Option<(usize, cdm_sudakov::Splitting)> = None;
        for (index, dipole) in self.dipoles.iter().enumerate() {
            if let Candidate::Ready(splitting) = dipole.candidate() {
                if winner.map_or(true, |(_, best)| splitting.pt2 > best.pt2) {
                    winner = Some((index, splitting));
                }
            }
        }
        let Some((index, splitting)) = winner else {
            self.max_pt2 = sampler.cutoff2();
            self.completed = true;
            return Ok(ChainEvent::Completed);
        };
        self.max_pt2 = splitting.pt2;

        let process = splitting.kind.process();
        let recoil = self.dipoles[index].recoil_end(process, rng)?;
        let keep = recoil.other();
        let v1 = self.dipoles[index].end(keep).momentum();
        let v3 = self.dipoles[index].end(recoil).momentum();
        let phi = rng.gen_range(0.0..TAU);
        let (n1, n2, n3) = reconstruct(v1, v3, splitting.pt2, splitting.y, phi, cfg.tolerance)?;

        match process {
            ProcessKind::GluonEmission => {
                self.apply_gluon_emission(index, recoil, splitting.pt2, n1, n2, n3, ctx, rng)?;
                Ok(ChainEvent::GluonEmitted { pt2: splitting.pt2 })
            }
            ProcessKind::GluonSplitting => {
                let split_before = self.apply_gluon_split(
                    index,
                    recoil,
                    splitting.pt2,
                    n1,
                    n2,
                    n3,
                    cfg,
                    ctx,
                    rng,
                )?;
                Ok(ChainEvent::GluonSplit { split_before, pt2: splitting.pt2 })
            }
            ProcessKind::PhotonEmission => {
                let photon =
                    self.apply_photon_emission(index, recoil, splitting.pt2, n1, n2, n3, ctx)?;
                Ok(ChainEvent::PhotonEmitted { photon, pt2: splitting.pt2 })
            }
        }
    }

    /// Update the dipoles sharing an endpoint with the winner; their
    /// caches go stale through `replace_end`.
    fn patch_neighbours(&mut self, index: usize, left: &Particle, right: &Particle) {
        let n = self.dipoles.len();
        if self.is_loop || index > 0 {
            let li = self.wrap(index as isize - 1);
            self.dipoles[li].replace_end(End::Second, left.clone());
        }
        if self.is_loop || index + 1 < n {
            let ri = self.wrap(index as isize + 1);
            self.dipoles[ri].replace_end(End::First, right.clone());
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_gluon_emission<R: Rng>(
        &mut self,
        index: usize,
        recoil: End,
        pt2: Scalar,
        n1: FourVector,
        n2: FourVector,
        n3: FourVector,
        ctx: &mut RunContext,
        rng: &mut R,
    ) -> Result<(), ShowerError> {
        let keep = recoil.other();
        let mut kept = self.dipoles[index].end(keep).clone();
        kept.set_momentum(n1);
        let mut recoiled = self.dipoles[index].end(recoil).clone();
        recoiled.set_momentum(n3);

        let mut gluon = Particle::new(Species::gluon(), n2, Status::Final);
        gluon.set_id(ctx.particle_ids.next())?;
        gluon.set_produced_at(pt2)?;
        gluon.set_mother(0, kept.id());
        gluon.set_mother(1, recoiled.id());
        match recoil {
            End::First => {
                kept.set_child_if_unset(0, gluon.id());
                recoiled.set_child_if_unset(1, gluon.id());
            }
            End::Second => {
                kept.set_child_if_unset(1, gluon.id());
                recoiled.set_child_if_unset(0, gluon.id());
            }
        }

        colour::assign_emission(rng, &mut ctx.colour_lines, &mut kept, &mut gluon, &mut recoiled, recoil)?;

        let (left, right) = match recoil {
            End::First => (recoiled, kept),
            End::Second => (kept, recoiled),
        };
        let left_dipole = Dipole::new(left.clone(), gluon.clone());
        let right_dipole = Dipole::new(gluon, right.clone());
        self.patch_neighbours(index, &left, &right);
        self.dipoles[index] = right_dipole;
        self.dipoles.insert(index, left_dipole);
        Ok(())
    }

    /// Returns the fission point: the index of the dropped dipole
    /// joining the two halves.
    #[allow(clippy::too_many_arguments)]
    fn apply_gluon_split<R: Rng>(
        &mut self,
        index: usize,
        recoil: End,
        pt2: Scalar,
        n1: FourVector,
        n2: FourVector,
        n3: FourVector,
        cfg: &ShowerConfig,
        ctx: &mut RunContext,
        rng: &mut R,
    ) -> Result<usize, ShowerError> {
        let keep = recoil.other();
        let gluon = self.dipoles[index].end(keep).clone();
        if !gluon.species().is_gluon() {
            return Err(ShowerError::SplitOnNonGluon { code: gluon.pdg_code() });
        }
        let flavour = quark_pairs::choose_flavour(rng, &cfg.active_quarks)?;
        let mut recoiled = self.dipoles[index].end(recoil).clone();
        recoiled.set_momentum(n3);

        // The quark end of the pair inherits the gluon's place in the
        // record; both halves remember the winning scale.
        match recoil {
            End::First => {
                let mut quark = Particle::new(Species::quark(flavour), n1, Status::Final);
                quark.inherit_history(&gluon);
                quark.set_id(ctx.particle_ids.next())?;
                quark.set_produced_at(pt2)?;
                quark.set_mother(0, recoiled.id());

                let mut antiquark =
                    Particle::new(Species::antiquark(flavour), n2, Status::Final);
                antiquark.set_id(ctx.particle_ids.next())?;
                antiquark.set_produced_at(pt2)?;
                antiquark.set_mother(1, recoiled.id());
                recoiled.set_child_if_unset(1, antiquark.id());

                colour::assign_split(gluon.colours(), &mut quark, &mut antiquark);

                let left_dipole = Dipole::new(recoiled.clone(), antiquark.clone());
                let right_dipole = Dipole::new(antiquark, quark.clone());
                self.patch_neighbours(index, &recoiled, &quark);
                self.dipoles[index] = right_dipole;
                self.dipoles.insert(index, left_dipole);
                Ok(index + 1)
            }
            End::Second => {
                let mut antiquark =
                    Particle::new(Species::antiquark(flavour), n1, Status::Final);
                antiquark.inherit_history(&gluon);
                antiquark.set_id(ctx.particle_ids.next())?;
                antiquark.set_produced_at(pt2)?;
                antiquark.set_mother(0, recoiled.id());

                let mut quark = Particle::new(Species::quark(flavour), n2, Status::Final);
                quark.set_id(ctx.particle_ids.next())?;
                quark.set_produced_at(pt2)?;
                quark.set_mother(1, recoiled.id());
                recoiled.set_child_if_unset(0, quark.id());

                colour::assign_split(gluon.colours(), &mut quark, &mut antiquark);

                let left_dipole = Dipole::new(antiquark.clone(), quark.clone());
                let right_dipole = Dipole::new(quark, recoiled.clone());
                self.patch_neighbours(index, &antiquark, &recoiled);
                self.dipoles[index] = right_dipole;
                self.dipoles.insert(index, left_dipole);
                Ok(index)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn apply_photon_emission(
        &mut self,
        index: usize,
        recoil: End,
        pt2: Scalar,
        n1: FourVector,
        n2: FourVector,
        n3: FourVector,
        ctx: &mut RunContext,
    ) -> Result<Particle, ShowerError> {
        let keep = recoil.other();
        let mut kept = self.dipoles[index].end(keep).clone();
        kept.set_momentum(n1);
        let mut recoiled = self.dipoles[index].end(recoil).clone();
        recoiled.set_momentum(n3);

        let mut photon = Particle::new(Species::photon(), n2, Status::Final);
        photon.set_id(ctx.particle_ids.next())?;
        photon.set_produced_at(pt2)?;
        photon.set_mother(0, kept.id());
        photon.set_mother(1, recoiled.id());
        match recoil {
            End::First => {
                kept.set_child_if_unset(0, photon.id());
                recoiled.set_child_if_unset(1, photon.id());
            }
            End::Second => {
                kept.set_child_if_unset(1, photon.id());
                recoiled.set_child_if_unset(0, photon.id());
            }
        }

        // The colour chain is untouched; the dipole just contracts
        // around the photon.
        let (left, right) = match recoil {
            End::First => (recoiled, kept),
            End::Second => (kept, recoiled),
        };
        let contracted = Dipole::new(left.clone(), right.clone());
        self.patch_neighbours(index, &left, &right);
        self.dipoles[index] = contracted;
        Ok(photon)
    }

    /// Slice the arena into two open chains at a fission point,
    /// dropping the dipole at `split_before`. Both halves start from
    /// the winning scale.
    pub fn fission(self, split_before: usize, max_pt2: Scalar) -> Result<(Chain, Chain), ShowerError> {
        if self.is_loop {
            return Err(ShowerError::ClosedChainSplit);
        }
        if split_before == 0 || split_before + 1 >= self.dipoles.len() {
            return Err(ShowerError::SplitAtChainEnd { index: split_before });
        }
        let head = Chain {
            dipoles: self.dipoles[..split_before].to_vec(),
            is_loop: false,
            max_pt2,
            completed: false,
        };
        let tail = Chain {
            dipoles: self.dipoles[split_before + 1..].to_vec(),
            is_loop: false,
            max_pt2,
            completed: false,
        };
        Ok((head, tail))
    }
}
