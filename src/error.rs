/*
 * Error Module
 *
 * Construction-time failures for the slime mold simulation. Nothing inside a
 * tick produces an error: a missing sensing target is a normal outcome.
 */

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("agent count must be positive")]
    NoAgents,

    #[error("{got} centres supplied for {expected} agents")]
    CentreCountMismatch { expected: usize, got: usize },

    #[error("expected 2 coordinates, got {got}")]
    Dimension { got: usize },

    #[error("coordinate {value} is not finite")]
    NonFinite { value: f64 },

    #[error("world shape {width}x{height} must be positive and finite")]
    InvalidShape { width: f64, height: f64 },

    #[error("cell size must be positive, got {0}")]
    InvalidCellSize(f64),

    #[error("sensing period must be at least 1")]
    InvalidSensingPeriod,

    #[error("render backend error: {0}")]
    Backend(String),
}

pub type SimResult<T> = Result<T, SimError>;
