//! Differential cross sections for the elementary dipole splittings,
//! written as densities in the energy fractions (x1, x3) of the dipole
//! ends (Ariadne conventions; all partons massless).

use cdm_core::kinematics::energy_fractions;
use cdm_core::Scalar;
use cdm_pdg::Species;

use crate::couplings::{OneLoopAlphaEM, OneLoopAlphaS};

/// Coarse classification of what a splitting does to the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ProcessKind {
    /// A new gluon joins the chain between the dipole ends.
    GluonEmission,
    /// A gluon end becomes a q qbar pair; the chain fissions.
    GluonSplitting,
    /// A photon leaves the chain; the dipole contracts.
    PhotonEmission,
}

/// The elementary splitting channels a dipole can undergo, by the
/// species of its two ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SplitKind {
    /// q qbar -> q g qbar (also q q, qbar qbar colour chains).
    QqbarEmitGluon,
    /// q g -> q g g (either ordering of quark and gluon).
    QgEmitGluon,
    /// g g -> g g g.
    GgEmitGluon,
    /// q g -> q Q Qbar.
    QgSplitGluon,
    /// g g -> g Q Qbar, first gluon splitting.
    GgSplitGluonFirst,
    /// g g -> g Q Qbar, second gluon splitting.
    GgSplitGluonSecond,
    /// q qbar -> q gamma qbar.
    QqbarEmitPhoton,
}

impl SplitKind {
    #[inline]
    pub fn process(self) -> ProcessKind {
        match self {
            SplitKind::QqbarEmitGluon | SplitKind::QgEmitGluon | SplitKind::GgEmitGluon => {
                ProcessKind::GluonEmission
            }
            SplitKind::QgSplitGluon
            | SplitKind::GgSplitGluonFirst
            | SplitKind::GgSplitGluonSecond => ProcessKind::GluonSplitting,
            SplitKind::QqbarEmitPhoton => ProcessKind::PhotonEmission,
        }
    }
}

/// Evaluate one channel's differential cross section at (pt2, y) for a
/// dipole of mass squared `s123` with ends `a`, `b`. The strong
/// channels run alpha_s at pt2; the photon channel runs alpha_em at pt2
/// and carries the product of the end charges.
pub fn value(
    kind: SplitKind,
    s123: Scalar,
    pt2: Scalar,
    y: Scalar,
    a: Species,
    b: Species,
    alpha_s: &OneLoopAlphaS,
    alpha_em: &OneLoopAlphaEM,
) -> Scalar {
    let (x1, x2, x3) = energy_fractions(s123, pt2, y);
    match kind {
        SplitKind::QqbarEmitGluon => {
            let pre = 2.0 * alpha_s.at(pt2) / (3.0 * std::f64::consts::PI);
            pre * (x1 * x1 + x3 * x3) / ((1.0 - x1) * (1.0 - x3))
        }
        SplitKind::QgEmitGluon => {
            let pre = 3.0 * alpha_s.at(pt2) / (4.0 * std::f64::consts::PI);
            pre * (x1 * x1 + x3 * x3 * x3) / ((1.0 - x1) * (1.0 - x3))
        }
        SplitKind::GgEmitGluon => {
            let pre = 3.0 * alpha_s.at(pt2) / (4.0 * std::f64::consts::PI);
            pre * (x1 * x1 * x1 + x3 * x3 * x3) / ((1.0 - x1) * (1.0 - x3))
        }
        SplitKind::QgSplitGluon
        | SplitKind::GgSplitGluonFirst
        | SplitKind::GgSplitGluonSecond => {
            let pre = 3.0 * alpha_s.at(pt2) / (8.0 * std::f64::consts::PI);
            let one_m_x1 = 1.0 - x1;
            let one_m_x2 = 1.0 - x2;
            pre * (one_m_x1 * one_m_x1 + one_m_x2 * one_m_x2) / (1.0 - x3)
        }
        SplitKind::QqbarEmitPhoton => {
            let pre = alpha_em.at(pt2) * a.charge().abs() * b.charge().abs()
                / (2.0 * std::f64::consts::PI);
            pre * (x1 * x1 + x3 * x3) / ((1.0 - x1) * (1.0 - x3))
        }
    }
}

/// Sum of `value` over a candidate set.
pub fn sum_over(
    kinds: &[SplitKind],
    s123: Scalar,
    pt2: Scalar,
    y: Scalar,
    a: Species,
    b: Species,
    alpha_s: &OneLoopAlphaS,
    alpha_em: &OneLoopAlphaEM,
) -> Scalar {
    kinds
        .iter()
        .map(|&k| value(k, s123, pt2, y, a, b, alpha_s, alpha_em))
        .sum()
}
