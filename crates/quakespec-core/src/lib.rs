//! # quakespec
//!
//! Elastic single-degree-of-freedom (SDOF) response, ground-motion intensity measures and
//! orientation-independent (RotDxx) response spectra for recorded earthquake accelerograms.
//!
//! ## Architecture
//!
//! The crate follows a three-layer layout:
//!
//! - **[`core`]: The Foundation.** Immutable data models (`GroundMotionRecord`, `PeriodGrid`,
//!   `ResponseHistory`, `IntensityMeasureSet`), signal conditioning (baseline correction,
//!   zero-phase Butterworth filtering, Fourier spectra) and the Newmark-beta integrator.
//!
//! - **[`engine`]: The Computational Core.** Validated configuration records, error types,
//!   progress reporting and the individual measure-extraction tasks, including the
//!   180-angle rotation sweep.
//!
//! - **[`workflows`]: The Public API.** End-to-end procedures that condition a record,
//!   compute its response across a period grid and assemble the resulting measures or
//!   RotDxx spectrum.
//!
//! All computations are pure functions over in-memory buffers. File formats, plotting and
//! command-line surfaces are left to the caller.

pub mod core;
pub mod engine;
pub mod workflows;
