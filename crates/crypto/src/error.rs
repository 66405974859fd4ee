//! Error types for threshold operations.

use thiserror::Error;

/// Errors that can occur during threshold BLS operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ThresholdError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("Degenerate interpolation: identifiers must hash to distinct non-zero scalars")]
    DegenerateInterpolation,

    #[error("Arithmetic failure: {0}")]
    ArithmeticFailure(&'static str),

    #[error("Invalid length: expected {expected} bytes, got {got}")]
    InvalidLength { expected: usize, got: usize },

    #[error("Invalid scalar encoding")]
    InvalidScalar,

    #[error("Private key must not be zero")]
    ZeroPrivateKey,

    #[error("Invalid G1 point encoding")]
    InvalidG1Point,

    #[error("Invalid G2 point encoding")]
    InvalidG2Point,

    #[error("Seed too short: need at least {min} bytes, got {got}")]
    SeedTooShort { min: usize, got: usize },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
}

pub type Result<T> = std::result::Result<T, ThresholdError>;
