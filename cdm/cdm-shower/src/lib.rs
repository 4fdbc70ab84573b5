#![doc = r#"Final-state colour-dipole shower.

A hard q qbar pair seeds a chain of colour dipoles. The chain evolves
downwards in invariant transverse momentum: each step the Sudakov
sampler proposes a splitting per dipole, the largest-pt2 proposal wins,
kinematics are rebuilt in the winning dipole's frame and colour flow is
threaded through the event.

- Gluon emission stretches the chain by one dipole.
- Gluon splitting (g -> q qbar) fissions the chain into two.
- Photon emission contracts the dipole and parks the photon outside the
  colour chain.

Evolution stops when every dipole falls below the infrared cutoff.
`ShowerEngine` instances are fully self-contained (own RNG, counters
and chains), so independent events can shower on independent threads.
"#]

pub mod chain;
pub mod colour;
pub mod dipole;
pub mod engine;
pub mod error;
pub mod particle;

pub use cdm_core::Scalar;
pub use cdm_sudakov::{ProcessKind, ShowerConfig, SplitKind, Splitting};
pub use chain::{Chain, ChainEvent};
pub use dipole::{Candidate, Dipole};
pub use engine::{Counter, RunContext, ShowerEngine, ShowerStats};
pub use error::ShowerError;
pub use particle::{Particle, Status};
