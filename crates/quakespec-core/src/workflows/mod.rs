//! # Workflows Module
//!
//! High-level entry points that take a raw ground-motion record through conditioning, SDOF
//! response and measure extraction.
//!
//! - **Conditioning** ([`condition`]) - Baseline correction and zero-phase Butterworth filtering
//! - **Intensity Measures** ([`intensity`]) - Response histories plus the full intensity measure set
//! - **RotDxx Spectra** ([`rotd`]) - Orientation-independent percentile spectra from two
//!   horizontal components
//!
//! Every workflow validates its inputs up front, reports progress through an optional
//! [`ProgressReporter`](crate::engine::progress::ProgressReporter), and returns an
//! [`EngineError`](crate::engine::error::EngineError) on failure.

pub mod condition;
pub mod intensity;
pub mod rotd;
