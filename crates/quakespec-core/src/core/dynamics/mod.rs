//! # Structural Dynamics
//!
//! Linear elastic single-degree-of-freedom oscillators under base excitation, integrated with
//! the Newmark-beta family of implicit schemes.
//!
//! - [`newmark`] - Scheme selection, integration constants and the single-period recurrence
//! - [`solver`] - Evaluation over a whole period grid

pub mod newmark;
pub mod solver;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolverError {
    #[error("Sampling interval must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("Excitation contains no samples")]
    EmptyExcitation,
    #[error("Period at index {index} must be positive and finite, got {value}")]
    InvalidPeriod { index: usize, value: f64 },
    #[error("Damping ratio must lie in [0, 1), got {0}")]
    InvalidDamping(f64),
    #[error("Oscillator mass must be positive and finite, got {0}")]
    InvalidMass(f64),
}

/// Properties shared by every oscillator in a grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Oscillator {
    pub damping_ratio: f64,
    pub mass: f64,
}

impl Oscillator {
    pub fn new(damping_ratio: f64, mass: f64) -> Result<Self, SolverError> {
        if !(damping_ratio.is_finite() && (0.0..1.0).contains(&damping_ratio)) {
            return Err(SolverError::InvalidDamping(damping_ratio));
        }
        if !(mass.is_finite() && mass > 0.0) {
            return Err(SolverError::InvalidMass(mass));
        }
        Ok(Self {
            damping_ratio,
            mass,
        })
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self {
            damping_ratio: 0.05,
            mass: 1.0,
        }
    }
}
