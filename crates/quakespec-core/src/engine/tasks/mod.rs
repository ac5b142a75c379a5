//! Computational tasks that derive intensity measures and rotated spectra.
//!
//! Each task consumes a record, its integrated ground motion, or a batch of response histories
//! and returns a partial [`IntensityMeasureSet`](crate::core::models::measures::IntensityMeasureSet)
//! (or a matrix, for the rotation sweep). Workflows stitch the partial results together.

pub mod durations;
pub mod frequency;
pub mod ground_motion;
pub mod rotation;
pub mod spectral;

/// Standard gravity in m/s², used for Arias intensity and the 0.05 g duration threshold.
pub const GRAVITY: f64 = 9.81;
