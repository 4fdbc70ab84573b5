//! One-loop running couplings anchored at the Z pole.

use cdm_core::Scalar;
use cdm_pdg::{KNOWN_QUARKS, Z_MASS};

use crate::config::ShowerConfig;

/// Number of quark flavours light enough to pair-produce at scale q2.
#[inline]
pub fn active_flavours(q2: Scalar) -> Scalar {
    let q = q2.sqrt();
    KNOWN_QUARKS.iter().filter(|f| 2.0 * f.mass() < q).count() as Scalar
}

/// One-loop running strong coupling.
#[derive(Clone, Copy, Debug)]
pub struct OneLoopAlphaS {
    alpha_mz: Scalar,
    ca: Scalar,
    tr: Scalar,
    shower_max: Scalar,
}

impl OneLoopAlphaS {
    pub fn new(cfg: &ShowerConfig) -> OneLoopAlphaS {
        let mut coupling = OneLoopAlphaS {
            alpha_mz: cfg.alpha_s_mz,
            ca: cfg.ca(),
            tr: cfg.t_r,
            shower_max: 0.0,
        };
        // The coupling grows towards the infrared, so its largest value
        // over the shower's reach is at the cutoff scale.
        coupling.shower_max = coupling.at(cfg.cutoff2());
        coupling
    }

    #[inline]
    fn beta0(&self, nf: Scalar) -> Scalar {
        (11.0 / 3.0) * self.ca - (4.0 / 3.0) * self.tr * nf
    }

    /// alpha_s(q2), run from the Z pole with the threshold-dependent
    /// flavour count.
    pub fn at(&self, q2: Scalar) -> Scalar {
        let nf = active_flavours(q2);
        let t = (q2 / (Z_MASS * Z_MASS)).ln();
        self.alpha_mz / (1.0 + self.alpha_mz * self.beta0(nf) / (4.0 * std::f64::consts::PI) * t)
    }

    #[inline]
    pub fn shower_max(&self) -> Scalar {
        self.shower_max
    }
}

/// One-loop running electromagnetic coupling.
#[derive(Clone, Copy, Debug)]
pub struct OneLoopAlphaEM {
    alpha_mz: Scalar,
}

impl OneLoopAlphaEM {
    pub fn new(cfg: &ShowerConfig) -> OneLoopAlphaEM {
        OneLoopAlphaEM { alpha_mz: cfg.alpha_em_mz }
    }

    pub fn at(&self, q2: Scalar) -> Scalar {
        let t = (q2 / (Z_MASS * Z_MASS)).ln();
        self.alpha_mz / (1.0 - self.alpha_mz * t / (3.0 * std::f64::consts::PI))
    }

    /// alpha_em shrinks towards the infrared; over the shower's reach
    /// the anchor value itself is the maximum.
    #[inline]
    pub fn shower_max(&self) -> Scalar {
        self.alpha_mz
    }
}
