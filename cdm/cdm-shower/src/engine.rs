//! The shower engine: owns the RNG, the counters, the chains and the
//! photons of one event.

use cdm_core::approx_eq;
use cdm_sudakov::{ShowerConfig, SudakovSampler};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::chain::{Chain, ChainEvent};
use crate::error::ShowerError;
use crate::particle::Particle;

/// First unique ID handed to shower products; the hard-process records
/// (beams and seed pair) occupy the lower IDs.
const FIRST_SHOWER_ID: u32 = 5;
/// Colour line of the seed q qbar pair.
const SEED_COLOUR_LINE: u32 = 501;
/// First fresh colour line available to emissions.
const FIRST_SHOWER_LINE: u32 = 502;
const SEED_QUARK_ID: u32 = 3;
const SEED_ANTIQUARK_ID: u32 = 4;

/// A monotonically increasing ID source.
#[derive(Clone, Copy, Debug)]
pub struct Counter {
    next_value: u32,
}

impl Counter {
    #[inline]
    pub fn starting_at(first: u32) -> Counter {
        Counter { next_value: first }
    }

    #[inline]
    pub fn next(&mut self) -> u32 {
        let value = self.next_value;
        self.next_value += 1;
        value
    }

    /// The value the next call to `next` will hand out.
    #[inline]
    pub fn peek(&self) -> u32 {
        self.next_value
    }
}

/// Mutable per-event state threaded through every chain step.
#[derive(Clone, Copy, Debug)]
pub struct RunContext {
    pub particle_ids: Counter,
    pub colour_lines: Counter,
}

impl RunContext {
    pub fn new() -> RunContext {
        RunContext {
            particle_ids: Counter::starting_at(FIRST_SHOWER_ID),
            colour_lines: Counter::starting_at(FIRST_SHOWER_LINE),
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new()
    }
}

/// What the shower did, by process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ShowerStats {
    pub gluons_emitted: u64,
    pub gluons_split: u64,
    pub photons_emitted: u64,
}

/// One event's shower. Self-contained: seeded RNG, ID and colour
/// counters, chains and photons all live on the instance, so
/// independent engines can run concurrently.
pub struct ShowerEngine {
    config: ShowerConfig,
    sampler: SudakovSampler,
    rng: StdRng,
    ctx: RunContext,
    chains: Vec<Chain>,
    photons: Vec<Particle>,
    stats: ShowerStats,
    ran: bool,
    failed: bool,
}

impl ShowerEngine {
    /// Seed the shower with a massless quark/antiquark pair (quark
    /// first, matching the colour-chain direction). IDs and the seed
    /// colour line are assigned when the caller left them unset.
    pub fn new(
        quark: Particle,
        antiquark: Particle,
        config: ShowerConfig,
        rng_seed: u64,
    ) -> Result<ShowerEngine, ShowerError> {
        let sq = quark.species();
        let sa = antiquark.species();
        let valid_pair = sq.is_quark() && !sq.anti && sa == sq.conjugate();
        if !valid_pair {
            return Err(ShowerError::InvalidSeedPair {
                first: quark.pdg_code(),
                second: antiquark.pdg_code(),
            });
        }
        for seed in [&quark, &antiquark] {
            let m2 = seed.momentum().mass2();
            if !approx_eq(m2, 0.0, config.tolerance) {
                return Err(ShowerError::SeedNotMassless { code: seed.pdg_code(), mass2: m2 });
            }
        }

        let mut quark = quark;
        let mut antiquark = antiquark;
        if quark.id() == 0 {
            quark.set_id(SEED_QUARK_ID)?;
        }
        if antiquark.id() == 0 {
            antiquark.set_id(SEED_ANTIQUARK_ID)?;
        }
        if quark.colour() == 0 && antiquark.anti_colour() == 0 {
            quark.set_colour(SEED_COLOUR_LINE);
            antiquark.set_anti_colour(SEED_COLOUR_LINE);
        }

        let sampler = SudakovSampler::new(&config);
        let chain = Chain::new(vec![quark, antiquark], false, None)?;
        Ok(ShowerEngine {
            config,
            sampler,
            rng: StdRng::seed_from_u64(rng_seed),
            ctx: RunContext::new(),
            chains: vec![chain],
            photons: Vec::new(),
            stats: ShowerStats::default(),
            ran: false,
            failed: false,
        })
    }

    /// Evolve every chain down to the cutoff. Runs once per engine; a
    /// failed run leaves the record withheld from export.
    pub fn run(&mut self) -> Result<ShowerStats, ShowerError> {
        if self.ran {
            return Err(ShowerError::AlreadyRun);
        }
        self.ran = true;
        match self.run_chains() {
            Ok(()) => Ok(self.stats),
            Err(err) => {
                self.failed = true;
                Err(err)
            }
        }
    }

    fn run_chains(&mut self) -> Result<(), ShowerError> {
        'passes: loop {
            if self.chains.iter().all(Chain::is_complete) {
                break;
            }
            for index in 0..self.chains.len() {
                loop {
                    let event = self.chains[index].evolve(
                        &self.sampler,
                        &self.config,
                        &mut self.ctx,
                        &mut self.rng,
                    )?;
                    match event {
                        ChainEvent::Completed => break,
                        ChainEvent::GluonEmitted { .. } => {
                            self.stats.gluons_emitted += 1;
                        }
                        ChainEvent::PhotonEmitted { photon, .. } => {
                            self.stats.photons_emitted += 1;
                            self.photons.push(photon);
                        }
                        ChainEvent::GluonSplit { split_before, pt2 } => {
                            self.stats.gluons_split += 1;
                            let chain = self.chains.remove(index);
                            let (head, tail) = chain.fission(split_before, pt2)?;
                            self.chains.insert(index, tail);
                            self.chains.insert(index, head);
                            // The chain list shifted; start a new pass.
                            continue 'passes;
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Final-state particles: every chain in colour order, then the
    /// photons in production order. Empty after a failed run; the
    /// half-evolved record is not handed out.
    pub fn export_results(&self) -> Vec<Particle> {
        if self.failed {
            return Vec::new();
        }
        let mut out = Vec::new();
        for chain in &self.chains {
            out.extend(chain.particles());
        }
        out.extend(self.photons.iter().cloned());
        out
    }

    /// PDG codes of the exported final state.
    pub fn codes_produced(&self) -> Vec<i32> {
        self.export_results().iter().map(Particle::pdg_code).collect()
    }

    pub fn count_code(&self, code: i32) -> usize {
        self.codes_produced().iter().filter(|&&c| c == code).count()
    }

    #[inline]
    pub fn stats(&self) -> ShowerStats {
        self.stats
    }

    #[inline]
    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    #[inline]
    pub fn photons(&self) -> &[Particle] {
        &self.photons
    }

    #[inline]
    pub fn config(&self) -> &ShowerConfig {
        &self.config
    }

    #[inline]
    pub fn context(&self) -> &RunContext {
        &self.ctx
    }
}
