//! # Signal Conditioning
//!
//! Pre-processing of raw acceleration series before they reach the oscillator solver, and the
//! frequency-domain transforms used by the intensity measures.
//!
//! - [`baseline`] - Least-squares polynomial detrending (degree 0 to 3)
//! - [`butterworth`] - Digital Butterworth design as cascaded second-order sections
//! - [`filter`] - Zero-phase filtering with optional constant-value edge padding
//! - [`fourier`] - One-sided Fourier amplitude spectra of zero-padded records

pub mod baseline;
pub mod butterworth;
pub mod filter;
pub mod fourier;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SignalError {
    #[error("Sampling interval must be positive and finite, got {0}")]
    InvalidTimeStep(f64),
    #[error("Signal contains no samples")]
    EmptySignal,
    #[error("Cutoff frequency {cutoff} Hz must lie strictly between 0 and the Nyquist frequency {nyquist} Hz")]
    CutoffOutOfRange { cutoff: f64, nyquist: f64 },
    #[error("Band edges must satisfy low < high, got low = {low} Hz, high = {high} Hz")]
    InvertedBand { low: f64, high: f64 },
    #[error("Filter order must be at least 1")]
    InvalidOrder,
    #[error("A degree-{degree} baseline needs at least {needed} samples, got {got}")]
    TooFewSamples {
        degree: usize,
        needed: usize,
        got: usize,
    },
    #[error("Least-squares baseline fit failed: {0}")]
    LeastSquares(String),
}

pub(crate) fn check_time_step(dt: f64) -> Result<(), SignalError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(SignalError::InvalidTimeStep(dt))
    }
}
