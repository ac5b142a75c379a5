use crate::core::models::response::ResponseHistory;
use crate::core::utils::statistics::percentile;
use crate::engine::progress::{Progress, ProgressReporter};
use nalgebra::DMatrix;
use tracing::{info, instrument};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of integer rotation angles swept, covering `[0°, 180°)`.
pub const ROTATION_ANGLES: usize = 180;

/// Peak rotated pseudo-acceleration for every angle (rows) and period (columns).
///
/// Row `θ` holds `(2π/T)² · max_t |u1·cos θ + u2·sin θ|`. Both history slices must be in the
/// same period order and have equal lengths.
#[instrument(skip_all, name = "rotation_sweep_task", fields(periods = first.len()))]
pub fn sweep(
    first: &[ResponseHistory],
    second: &[ResponseHistory],
    reporter: &ProgressReporter,
) -> DMatrix<f64> {
    info!("Sweeping {} rotation angles.", ROTATION_ANGLES);
    reporter.report(Progress::TaskStart {
        total_steps: first.len() as u64,
    });

    let angles: Vec<(f64, f64)> = (0..ROTATION_ANGLES)
        .map(|deg| {
            let theta = (deg as f64).to_radians();
            (theta.cos(), theta.sin())
        })
        .collect();

    let pairs: Vec<(&ResponseHistory, &ResponseHistory)> = first.iter().zip(second).collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = pairs.iter();

    #[cfg(feature = "parallel")]
    let iterator = pairs.par_iter();

    let columns: Vec<Vec<f64>> = iterator
        .map(|(h1, h2)| {
            let scale = h1.circular_frequency().powi(2);
            let column = angles
                .iter()
                .map(|&(cos, sin)| {
                    let peak = h1
                        .displacement
                        .iter()
                        .zip(&h2.displacement)
                        .fold(0.0_f64, |acc, (u1, u2)| acc.max((u1 * cos + u2 * sin).abs()));
                    scale * peak
                })
                .collect();
            reporter.report(Progress::TaskIncrement);
            column
        })
        .collect();

    reporter.report(Progress::TaskFinish);
    DMatrix::from_fn(ROTATION_ANGLES, columns.len(), |row, col| columns[col][row])
}

/// Column-wise percentile of a rotation matrix, one value per period.
pub fn percentile_spectrum(matrix: &DMatrix<f64>, p: f64) -> Vec<f64> {
    matrix
        .column_iter()
        .map(|column| {
            let values: Vec<f64> = column.iter().copied().collect();
            // Every column holds one entry per rotation angle, so it is never empty.
            percentile(&values, p).unwrap_or_default()
        })
        .collect()
}
