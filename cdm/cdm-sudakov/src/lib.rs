#![doc = r#"Running couplings, dipole cross sections and the Sudakov veto sampler.

Provides:
- `ShowerConfig`: the knobs a shower run depends on.
- `OneLoopAlphaS` / `OneLoopAlphaEM`: one-loop running couplings anchored
  at the Z pole.
- `SplitKind` / `ProcessKind`: the elementary dipole splitting channels
  and their coarse classification.
- `SudakovSampler`: draws the next (pt2, y, channel) for a dipole by the
  veto algorithm, or reports that the dipole is done radiating.
- `quark_pairs`: weighted flavour choice for g -> q qbar.

Randomness always enters through a caller-supplied `rand::Rng`, so a
seeded generator gives reproducible showers.
"#]

pub mod config;
pub mod couplings;
pub mod cross_section;
pub mod quark_pairs;
pub mod veto;

pub use cdm_core::Scalar;
pub use config::ShowerConfig;
pub use couplings::{OneLoopAlphaEM, OneLoopAlphaS};
pub use cross_section::{ProcessKind, SplitKind};
pub use veto::{Splitting, SudakovError, SudakovSampler};
