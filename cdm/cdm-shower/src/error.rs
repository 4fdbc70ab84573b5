use cdm_core::kinematics::KinematicsError;
use cdm_core::Scalar;
use cdm_sudakov::SudakovError;
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum ShowerError {
    #[error(transparent)]
    Kinematics(#[from] KinematicsError),
    #[error(transparent)]
    Sudakov(#[from] SudakovError),
    /// Unique IDs are write-once; use `overwrite_id` to rewrite.
    #[error("particle {id} already has a unique ID")]
    IdAlreadySet { id: u32 },
    /// Production scales are write-once.
    #[error("particle {id} already has a production scale")]
    ProducedAtAlreadySet { id: u32 },
    #[error("seed pair must be a quark followed by its antiquark (got {first}, {second})")]
    InvalidSeedPair { first: i32, second: i32 },
    #[error("seed particle {code} is not massless (m^2 = {mass2})")]
    SeedNotMassless { code: i32, mass2: Scalar },
    #[error("a chain needs at least two particles (got {particles})")]
    ChainTooShort { particles: usize },
    /// Fissioning a closed gluon loop has no open ends to slice at.
    #[error("gluon splitting is unsupported on a closed chain")]
    ClosedChainSplit,
    #[error("chain fission point {index} falls on a chain end")]
    SplitAtChainEnd { index: usize },
    #[error("gluon splitting selected for a non-gluon end ({code})")]
    SplitOnNonGluon { code: i32 },
    #[error("no colour-flow rule for dipole ends {first} and {second}")]
    UnsupportedColourFlow { first: i32, second: i32 },
    #[error("shower engine has already run")]
    AlreadyRun,
}
