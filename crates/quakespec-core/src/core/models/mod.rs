//! Data models shared by every layer of the crate.

pub mod measures;
pub mod periods;
pub mod record;
pub mod response;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ModelError {
    #[error("Sampling interval must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("Ground-motion record contains no samples")]
    EmptyRecord,
    #[error("Sample {index} is not finite ({value})")]
    NonFiniteSample { index: usize, value: f64 },
    #[error("Period at index {index} is invalid ({value}); periods must be finite and non-negative")]
    InvalidPeriod { index: usize, value: f64 },
    #[error("Periods must be strictly increasing, but {previous} is followed by {next}")]
    UnorderedPeriods { previous: f64, next: f64 },
    #[error("Period grid contains no positive periods")]
    EmptyPeriodGrid,
}
