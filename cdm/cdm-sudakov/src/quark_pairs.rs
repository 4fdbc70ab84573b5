//! Flavour choice for g -> q qbar.
//!
//! The weights are the relative q qbar production rates on the Z
//! resonance; top is above threshold and carries no weight.

use cdm_core::Scalar;
use cdm_pdg::Flavour;
use rand::Rng;

use crate::veto::SudakovError;

/// Relative q qbar weight for one flavour, if it can be produced.
#[inline]
pub fn pair_weight(flavour: Flavour) -> Option<Scalar> {
    match flavour {
        Flavour::Down => Some(16.057_642_82),
        Flavour::Up => Some(11.940_298_51),
        Flavour::Strange => Some(16.057_642_82),
        Flavour::Charm => Some(24.323_211_53),
        Flavour::Bottom => Some(31.621_204_32),
        _ => None,
    }
}

/// Draw a quark flavour for a gluon splitting, weighted over the active
/// set (weights renormalized to the flavours actually enabled).
pub fn choose_flavour<R: Rng>(rng: &mut R, active: &[Flavour]) -> Result<Flavour, SudakovError> {
    let weighted: Vec<(Flavour, Scalar)> = active
        .iter()
        .filter_map(|&f| pair_weight(f).map(|w| (f, w)))
        .collect();
    let total: Scalar = weighted.iter().map(|(_, w)| w).sum();
    if weighted.is_empty() || total <= 0.0 {
        return Err(SudakovError::NoActiveFlavour);
    }
    let draw = rng.gen::<Scalar>() * total;
    let mut cumulative = 0.0;
    for (flavour, weight) in &weighted {
        cumulative += weight;
        if draw < cumulative {
            return Ok(*flavour);
        }
    }
    // Floating round-off can leave the draw a hair above the last edge.
    Ok(weighted[weighted.len() - 1].0)
}
