#![doc = r#"Particle species and static particle data.

A `Species` is a `Flavour` plus an explicit particle/antiparticle flag,
so no sign arithmetic on PDG codes leaks into the shower logic. Masses
and charges are the PDG values the shower thresholds depend on.
"#]

use thiserror::Error;

pub type Scalar = f64;

/// Z pole mass in GeV, the anchor scale for the running couplings.
pub const Z_MASS: Scalar = 91.188;
/// Z decay width in GeV.
pub const Z_WIDTH: Scalar = 2.49;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("unknown PDG code {0}")]
pub struct UnknownCode(pub i32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Flavour {
    Down,
    Up,
    Strange,
    Charm,
    Bottom,
    Top,
    Gluon,
    Photon,
    ZBoson,
}

/// Quark flavours in PDG code order, lightest code first.
pub const KNOWN_QUARKS: [Flavour; 6] = [
    Flavour::Down,
    Flavour::Up,
    Flavour::Strange,
    Flavour::Charm,
    Flavour::Bottom,
    Flavour::Top,
];

impl Flavour {
    /// Mass in GeV (current quark masses; bosons treated as massless
    /// except the Z).
    #[inline]
    pub fn mass(self) -> Scalar {
        match self {
            Flavour::Down => 0.0048,
            Flavour::Up => 0.0023,
            Flavour::Strange => 0.095,
            Flavour::Charm => 1.275,
            Flavour::Bottom => 4.66,
            Flavour::Top => 173.21,
            Flavour::Gluon | Flavour::Photon => 0.0,
            Flavour::ZBoson => Z_MASS,
        }
    }

    /// Electric charge of the particle (not the antiparticle), in units
    /// of the positron charge.
    #[inline]
    pub fn charge(self) -> Scalar {
        match self {
            Flavour::Down | Flavour::Strange | Flavour::Bottom => -1.0 / 3.0,
            Flavour::Up | Flavour::Charm | Flavour::Top => 2.0 / 3.0,
            Flavour::Gluon | Flavour::Photon | Flavour::ZBoson => 0.0,
        }
    }

    #[inline]
    pub fn is_quark(self) -> bool {
        matches!(
            self,
            Flavour::Down
                | Flavour::Up
                | Flavour::Strange
                | Flavour::Charm
                | Flavour::Bottom
                | Flavour::Top
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Flavour::Down => "down",
            Flavour::Up => "up",
            Flavour::Strange => "strange",
            Flavour::Charm => "charm",
            Flavour::Bottom => "bottom",
            Flavour::Top => "top",
            Flavour::Gluon => "gluon",
            Flavour::Photon => "photon",
            Flavour::ZBoson => "Z",
        }
    }
}

/// A concrete particle species: flavour plus antiparticle flag.
///
/// The flag is meaningful only for quarks; it is always `false` for the
/// self-conjugate bosons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Species {
    pub flavour: Flavour,
    pub anti: bool,
}

impl Species {
    #[inline]
    pub fn quark(flavour: Flavour) -> Species {
        Species { flavour, anti: false }
    }

    #[inline]
    pub fn antiquark(flavour: Flavour) -> Species {
        Species { flavour, anti: true }
    }

    #[inline]
    pub fn gluon() -> Species {
        Species { flavour: Flavour::Gluon, anti: false }
    }

    #[inline]
    pub fn photon() -> Species {
        Species { flavour: Flavour::Photon, anti: false }
    }

    /// Signed PDG Monte Carlo code.
    pub fn pdg_code(&self) -> i32 {
        let base = match self.flavour {
            Flavour::Down => 1,
            Flavour::Up => 2,
            Flavour::Strange => 3,
            Flavour::Charm => 4,
            Flavour::Bottom => 5,
            Flavour::Top => 6,
            Flavour::Gluon => 21,
            Flavour::Photon => 22,
            Flavour::ZBoson => 23,
        };
        if self.anti {
            -base
        } else {
            base
        }
    }

    pub fn from_pdg(code: i32) -> Result<Species, UnknownCode> {
        let flavour = match code.abs() {
            1 => Flavour::Down,
            2 => Flavour::Up,
            3 => Flavour::Strange,
            4 => Flavour::Charm,
            5 => Flavour::Bottom,
            6 => Flavour::Top,
            21 => Flavour::Gluon,
            22 => Flavour::Photon,
            23 => Flavour::ZBoson,
            _ => return Err(UnknownCode(code)),
        };
        if code < 0 && !flavour.is_quark() {
            return Err(UnknownCode(code));
        }
        Ok(Species { flavour, anti: code < 0 })
    }

    #[inline]
    pub fn mass(&self) -> Scalar {
        self.flavour.mass()
    }

    /// Signed electric charge in units of the positron charge.
    #[inline]
    pub fn charge(&self) -> Scalar {
        if self.anti {
            -self.flavour.charge()
        } else {
            self.flavour.charge()
        }
    }

    #[inline]
    pub fn is_quark(&self) -> bool {
        self.flavour.is_quark()
    }

    #[inline]
    pub fn is_gluon(&self) -> bool {
        self.flavour == Flavour::Gluon
    }

    #[inline]
    pub fn is_photon(&self) -> bool {
        self.flavour == Flavour::Photon
    }

    /// The charge-conjugate species.
    #[inline]
    pub fn conjugate(&self) -> Species {
        if self.flavour.is_quark() {
            Species { flavour: self.flavour, anti: !self.anti }
        } else {
            *self
        }
    }
}
