//! # Core Module
//!
//! Stateless building blocks: the data models exchanged with callers, signal conditioning,
//! the linear SDOF integrator and small numeric helpers.
//!
//! - **Data Models** ([`models`]) - Records, period grids, response histories and measures
//! - **Signal Conditioning** ([`signal`]) - Baseline correction, Butterworth filtering, FFT spectra
//! - **Structural Dynamics** ([`dynamics`]) - Newmark-beta time stepping for linear oscillators
//! - **Utilities** ([`utils`]) - Trapezoidal integration, percentiles and rounding

pub mod dynamics;
pub mod models;
pub mod signal;
pub mod utils;
