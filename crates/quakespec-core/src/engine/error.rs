use super::config::ConfigError;
use crate::core::dynamics::SolverError;
use crate::core::models::ModelError;
use crate::core::models::measures::MeasureName;
use crate::core::signal::SignalError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error("Invalid configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Invalid input data: {source}")]
    Model {
        #[from]
        source: ModelError,
    },

    #[error("Signal conditioning failed: {source}")]
    Signal {
        #[from]
        source: SignalError,
    },

    #[error("Response computation failed: {source}")]
    Solver {
        #[from]
        source: SolverError,
    },

    #[error("Numerical failure while computing '{measure}': {reason}")]
    Numerical {
        measure: MeasureName,
        reason: String,
    },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
