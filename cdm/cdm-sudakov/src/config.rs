//! Run configuration for a shower.

use cdm_core::{Scalar, DEFAULT_TOLERANCE};
use cdm_pdg::Flavour;

/// All the knobs a shower run depends on. `Default` gives the standard
/// Z-pole setup: 1 GeV cutoff, three light flavours, gluon splitting
/// and photon emission enabled.
#[derive(Clone, Debug)]
pub struct ShowerConfig {
    /// Infrared cutoff in GeV; evolution in pt stops below it.
    pub cutoff: Scalar,
    /// Tolerance for conservation and masslessness checks.
    pub tolerance: Scalar,
    /// Strong coupling at the Z pole.
    pub alpha_s_mz: Scalar,
    /// Electromagnetic coupling at the Z pole.
    pub alpha_em_mz: Scalar,
    /// Number of colours.
    pub n_colours: Scalar,
    /// Trace normalization of the fundamental representation.
    pub t_r: Scalar,
    /// Quark flavours a gluon may split into.
    pub active_quarks: Vec<Flavour>,
    /// Allow g -> q qbar.
    pub gluon_splitting: bool,
    /// Allow q qbar -> q gamma qbar.
    pub photon_emission: bool,
    /// Hard bound on veto-loop iterations per dipole sample.
    pub max_veto_iterations: usize,
}

impl Default for ShowerConfig {
    fn default() -> Self {
        ShowerConfig {
            cutoff: 1.0,
            tolerance: DEFAULT_TOLERANCE,
            alpha_s_mz: 0.118,
            alpha_em_mz: 1.0 / 128.886,
            n_colours: 3.0,
            t_r: 0.5,
            active_quarks: vec![Flavour::Down, Flavour::Up, Flavour::Strange],
            gluon_splitting: true,
            photon_emission: true,
            max_veto_iterations: 100_000,
        }
    }
}

impl ShowerConfig {
    #[inline]
    pub fn cutoff2(&self) -> Scalar {
        self.cutoff * self.cutoff
    }

    /// Adjoint Casimir, Ca = 2 Tr Nc.
    #[inline]
    pub fn ca(&self) -> Scalar {
        2.0 * self.t_r * self.n_colours
    }

    /// Fundamental Casimir, Cf = (Nc^2 - 1) / 2 Nc.
    #[inline]
    pub fn cf(&self) -> Scalar {
        (self.n_colours * self.n_colours - 1.0) / (2.0 * self.n_colours)
    }
}
