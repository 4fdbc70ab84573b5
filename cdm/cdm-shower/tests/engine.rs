#![allow(unused_doc_comments)]
use std::collections::HashMap;

use cdm_core::{approx_eq, FourVector};
use cdm_pdg::{Flavour, Species};
use cdm_shower::{Particle, ShowerConfig, ShowerEngine, ShowerError, Status};
use proptest::prelude::*;

const ROOT_S: f64 = 91.2;

fn seed_pair() -> (Particle, Particle) {
    let quark = Particle::new(
        Species::quark(Flavour::Down),
        FourVector::new(ROOT_S / 2.0, 0.0, 0.0, ROOT_S / 2.0),
        Status::Final,
    );
    let antiquark = Particle::new(
        Species::antiquark(Flavour::Down),
        FourVector::new(ROOT_S / 2.0, 0.0, 0.0, -ROOT_S / 2.0),
        Status::Final,
    );
    (quark, antiquark)
}

fn run_engine(cfg: ShowerConfig, seed: u64) -> ShowerEngine {
    let (q, qbar) = seed_pair();
    let mut engine = ShowerEngine::new(q, qbar, cfg, seed).unwrap();
    engine.run().unwrap();
    engine
}

fn bare_config() -> ShowerConfig {
    let mut cfg = ShowerConfig::default();
    cfg.gluon_splitting = false;
    cfg.photon_emission = false;
    cfg
}

/// Every nonzero colour line must close: exactly two slots share it.
fn assert_colour_lines_pair(particles: &[Particle]) {
    let mut counts: HashMap<u32, usize> = HashMap::new();
    for p in particles {
        for line in p.colours() {
            if line != 0 {
                *counts.entry(line).or_insert(0) += 1;
            }
        }
    }
    for (line, count) in counts {
        assert_eq!(count, 2, "colour line {line} appears {count} times");
    }
}

// Golden: with splitting and photons off, a d dbar event is exactly
// the seed pair plus gluons.
#[test]
fn golden_bare_shower_final_state() {
    let engine = run_engine(bare_config(), 12345);
    let codes = engine.codes_produced();
    assert!(codes.iter().all(|c| [1, -1, 21].contains(c)), "codes: {codes:?}");
    assert_eq!(engine.count_code(1), 1);
    assert_eq!(engine.count_code(-1), 1);
    assert_eq!(engine.count_code(21) as u64, engine.stats().gluons_emitted);
    assert_eq!(engine.stats().gluons_split, 0);
    assert_eq!(engine.stats().photons_emitted, 0);
    // Multiplicity sanity: the emission count scales with the log of
    // the evolution span, not with the span itself.
    let log_span = (ROOT_S * ROOT_S / bare_config().cutoff2()).ln();
    assert!(
        (engine.stats().gluons_emitted as f64) < log_span * log_span,
        "implausible multiplicity: {}",
        engine.stats().gluons_emitted
    );
}

// Golden: the shower conserves four-momentum and keeps everything
// massless.
#[test]
fn golden_conservation_laws() {
    let engine = run_engine(ShowerConfig::default(), 777);
    let particles = engine.export_results();
    let total = particles
        .iter()
        .fold(FourVector::ZERO, |acc, p| acc + p.momentum());
    assert!(approx_eq(total.e, ROOT_S, 1e-6), "energy {} != {ROOT_S}", total.e);
    assert!(total.px.abs() < 1e-6 && total.py.abs() < 1e-6 && total.pz.abs() < 1e-6,
        "momentum drift: {total:?}");
    for p in &particles {
        assert!(p.momentum().is_lightlike(1e-6), "{} massive: {}", p.pdg_code(), p.momentum().mass2());
    }
}

// Golden: colour flow closes over the whole event.
#[test]
fn golden_colour_flow_closes() {
    let engine = run_engine(ShowerConfig::default(), 2024);
    assert_colour_lines_pair(&engine.export_results());
}

// Golden: the diagnostics agree with the exported record.
#[test]
fn golden_stats_match_export() {
    let engine = run_engine(ShowerConfig::default(), 31);
    let stats = engine.stats();
    let codes = engine.codes_produced();
    let gluons = codes.iter().filter(|&&c| c == 21).count() as u64;
    let photons = codes.iter().filter(|&&c| c == 22).count() as u64;
    let quarks = codes.iter().filter(|&&c| (1..=6).contains(&c.abs())).count() as u64;
    // A split consumes one emitted gluon and adds a quark pair.
    assert_eq!(gluons, stats.gluons_emitted - stats.gluons_split);
    assert_eq!(photons, stats.photons_emitted);
    assert_eq!(quarks, 2 + 2 * stats.gluons_split);
    assert_eq!(engine.photons().len() as u64, stats.photons_emitted);
    // Chain count grows by one per fission.
    assert_eq!(engine.chains().len() as u64, 1 + stats.gluons_split);
}

// Golden: unique IDs are unique and shower products carry their
// production scale, at or above the cutoff.
#[test]
fn golden_record_bookkeeping() {
    let cfg = ShowerConfig::default();
    let cutoff2 = cfg.cutoff2();
    let engine = run_engine(cfg, 9000);
    let particles = engine.export_results();
    let mut ids: Vec<u32> = particles.iter().map(Particle::id).collect();
    ids.sort_unstable();
    let before = ids.len();
    ids.dedup();
    assert_eq!(ids.len(), before, "duplicate unique IDs");
    assert!(ids.iter().all(|&id| id >= 3));
    for p in &particles {
        if p.id() >= 5 {
            let scale = p.produced_at().expect("shower product without production scale");
            assert!(scale >= cutoff2, "produced below cutoff: {scale}");
        }
    }
}

// Golden: the same seed gives the same event, different seeds differ.
#[test]
fn golden_seeded_reproducibility() {
    let fingerprint = |engine: &ShowerEngine| -> Vec<(i32, Option<f64>)> {
        engine
            .export_results()
            .iter()
            .map(|p| (p.pdg_code(), p.produced_at()))
            .collect()
    };
    let a = run_engine(ShowerConfig::default(), 64);
    let b = run_engine(ShowerConfig::default(), 64);
    assert_eq!(fingerprint(&a), fingerprint(&b));
    assert_eq!(a.stats(), b.stats());
    let c = run_engine(ShowerConfig::default(), 65);
    assert_ne!(
        fingerprint(&a),
        fingerprint(&c),
        "independent seeds produced identical events"
    );
}

// Golden: engines are self-contained, so events shower concurrently.
#[test]
fn golden_engines_run_concurrently() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let engine = run_engine(ShowerConfig::default(), 64 + (i % 2));
                engine.codes_produced()
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(results[0], results[2]);
    assert_eq!(results[1], results[3]);
}

// Golden: seed validation and the one-shot run contract.
#[test]
fn golden_engine_preconditions() {
    let (q, qbar) = seed_pair();
    // Reversed pair breaks the colour-chain direction.
    assert!(matches!(
        ShowerEngine::new(qbar.clone(), q.clone(), ShowerConfig::default(), 1),
        Err(ShowerError::InvalidSeedPair { .. })
    ));
    // Mismatched flavours are not a pair.
    let sbar = Particle::new(
        Species::antiquark(Flavour::Strange),
        qbar.momentum(),
        Status::Final,
    );
    assert!(matches!(
        ShowerEngine::new(q.clone(), sbar, ShowerConfig::default(), 1),
        Err(ShowerError::InvalidSeedPair { .. })
    ));
    // Massive seeds are rejected.
    let heavy = Particle::new(
        Species::quark(Flavour::Down),
        FourVector::new(50.0, 0.0, 0.0, 30.0),
        Status::Final,
    );
    assert!(matches!(
        ShowerEngine::new(heavy, qbar, ShowerConfig::default(), 1),
        Err(ShowerError::SeedNotMassless { .. })
    ));
    // A second run is refused.
    let (q, qbar) = seed_pair();
    let mut engine = ShowerEngine::new(q, qbar, ShowerConfig::default(), 1).unwrap();
    engine.run().unwrap();
    assert!(matches!(engine.run(), Err(ShowerError::AlreadyRun)));
}

// Golden: photons end up outside the colour chains.
#[test]
fn golden_photons_leave_the_chain() {
    // The stock electromagnetic coupling radiates a photon only a few
    // times per thousand events; strengthen it so the channel fires
    // within a handful of seeds.
    let mut cfg = ShowerConfig::default();
    cfg.alpha_em_mz = 0.3;
    for seed in 0..200 {
        let engine = run_engine(cfg.clone(), seed);
        if engine.stats().photons_emitted > 0 {
            assert_eq!(engine.photons().len() as u64, engine.stats().photons_emitted);
            for photon in engine.photons() {
                assert!(photon.species().is_photon());
                assert_eq!(photon.colours(), [0, 0]);
                assert!(photon.produced_at().is_some());
            }
            for chain in engine.chains() {
                for p in chain.particles() {
                    assert!(!p.species().is_photon(), "photon left inside a chain");
                }
            }
            return;
        }
    }
    panic!("no photon over 200 strengthened-coupling events");
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 8, .. ProptestConfig::default() })]

    /// Conservation and colour closure hold for arbitrary seeds.
    #[test]
    fn prop_shower_invariants(seed in any::<u64>()) {
        let engine = run_engine(ShowerConfig::default(), seed);
        let particles = engine.export_results();
        let total = particles.iter().fold(FourVector::ZERO, |acc, p| acc + p.momentum());
        prop_assert!(approx_eq(total.e, ROOT_S, 1e-6), "energy {}", total.e);
        prop_assert!(total.px.abs() < 1e-6 && total.py.abs() < 1e-6 && total.pz.abs() < 1e-6);
        for p in &particles {
            prop_assert!(p.momentum().is_lightlike(1e-6));
        }
        let mut counts: HashMap<u32, usize> = HashMap::new();
        for p in &particles {
            for line in p.colours() {
                if line != 0 {
                    *counts.entry(line).or_insert(0) += 1;
                }
            }
        }
        for (line, count) in counts {
            prop_assert_eq!(count, 2, "colour line {} appears {} times", line, count);
        }
        let log_span = (ROOT_S * ROOT_S / ShowerConfig::default().cutoff2()).ln();
        prop_assert!(
            (engine.stats().gluons_emitted as f64) < log_span * log_span,
            "implausible multiplicity: {}", engine.stats().gluons_emitted
        );
    }
}
