//! Errors raised while configuring a ring.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RingError {
    #[error("value range is empty or inverted: min {min} must be below max {max}")]
    DegenerateRange { min: f64, max: f64 },
    #[error("sweep is empty: start and end angle are both {0}°")]
    DegenerateSweep(f64),
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),
    #[error("lower bound {lower} would pass upper bound {upper}")]
    BoundsCrossed { lower: f64, upper: f64 },
    #[error("bound {value} lies outside [{min}, {max}]")]
    BoundOutOfRange { value: f64, min: f64, max: f64 },
    #[error("invalid color: {0}")]
    InvalidColor(String),
}

pub type Result<T, E = RingError> = std::result::Result<T, E>;
