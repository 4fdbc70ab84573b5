//! Colour-flow threading for splittings.
//!
//! Convention: within a dipole, the first particle's colour line pairs
//! the second particle's anti-colour line. Every gluon emission
//! consumes exactly one fresh line; a gluon splitting hands the
//! gluon's two lines to the new quark pair unchanged.

use cdm_core::End;
use rand::Rng;

use crate::engine::Counter;
use crate::error::ShowerError;
use crate::particle::Particle;

#[derive(Clone, Copy, PartialEq, Eq)]
enum EndClass {
    Quark,
    AntiQuark,
    Gluon,
}

fn classify(p: &Particle) -> Option<EndClass> {
    let species = p.species();
    if species.is_gluon() {
        Some(EndClass::Gluon)
    } else if species.is_quark() {
        if species.anti {
            Some(EndClass::AntiQuark)
        } else {
            Some(EndClass::Quark)
        }
    } else {
        None
    }
}

/// Thread colour through a gluon emission. `kept` is the end that
/// retained its direction, `recoiled` the end that took the recoil,
/// `gluon` the emission between them. For a g-g dipole two threadings
/// are legal and one is picked at random.
pub(crate) fn assign_emission<R: Rng>(
    rng: &mut R,
    lines: &mut Counter,
    kept: &mut Particle,
    gluon: &mut Particle,
    recoiled: &mut Particle,
    recoil: End,
) -> Result<(), ShowerError> {
    let pair = (classify(kept), classify(recoiled));
    let (Some(kc), Some(rc)) = pair else {
        return Err(ShowerError::UnsupportedColourFlow {
            first: kept.pdg_code(),
            second: recoiled.pdg_code(),
        });
    };
    match (kc, rc) {
        (EndClass::Quark, EndClass::AntiQuark) => {
            let line = lines.next();
            gluon.set_colour(line);
            gluon.set_anti_colour(kept.colour());
            recoiled.set_anti_colour(line);
        }
        (EndClass::AntiQuark, EndClass::Quark) => {
            let line = lines.next();
            kept.set_anti_colour(line);
            gluon.set_colour(line);
            gluon.set_anti_colour(recoiled.colour());
        }
        (EndClass::Quark, EndClass::Gluon) => {
            let line = lines.next();
            gluon.set_colour(line);
            gluon.set_anti_colour(kept.colour());
            recoiled.set_anti_colour(line);
        }
        (EndClass::AntiQuark, EndClass::Gluon) => {
            let line = lines.next();
            gluon.set_colour(kept.anti_colour());
            gluon.set_anti_colour(line);
            recoiled.set_colour(line);
        }
        (EndClass::Gluon, EndClass::Quark) => {
            let line = lines.next();
            kept.set_anti_colour(line);
            gluon.set_colour(line);
            gluon.set_anti_colour(recoiled.colour());
        }
        (EndClass::Gluon, EndClass::AntiQuark) => {
            let line = lines.next();
            kept.set_colour(line);
            gluon.set_colour(recoiled.anti_colour());
            gluon.set_anti_colour(line);
        }
        (EndClass::Gluon, EndClass::Gluon) => {
            let line = lines.next();
            match recoil {
                End::First => {
                    if rng.gen_bool(0.5) {
                        kept.set_anti_colour(line);
                        gluon.set_colour(line);
                        gluon.set_anti_colour(recoiled.colour());
                    } else {
                        gluon.set_colour(kept.anti_colour());
                        gluon.set_anti_colour(line);
                        recoiled.set_colour(line);
                    }
                }
                End::Second => {
                    if rng.gen_bool(0.5) {
                        gluon.set_colour(line);
                        gluon.set_anti_colour(kept.colour());
                        recoiled.set_anti_colour(line);
                    } else {
                        kept.set_colour(line);
                        gluon.set_colour(recoiled.anti_colour());
                        gluon.set_anti_colour(line);
                    }
                }
            }
        }
        _ => {
            return Err(ShowerError::UnsupportedColourFlow {
                first: kept.pdg_code(),
                second: recoiled.pdg_code(),
            })
        }
    }
    Ok(())
}

/// Hand a split gluon's colour lines to the quark pair replacing it:
/// the quark takes the colour line, the antiquark the anti-colour line.
pub(crate) fn assign_split(
    gluon_colours: [u32; 2],
    quark: &mut Particle,
    antiquark: &mut Particle,
) {
    quark.set_colour(gluon_colours[0]);
    antiquark.set_anti_colour(gluon_colours[1]);
}
