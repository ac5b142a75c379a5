use super::condition;
use super::intensity::response_histories;
use crate::core::dynamics::Oscillator;
use crate::core::models::periods::PeriodGrid;
use crate::core::models::record::GroundMotionRecord;
use crate::engine::config::{ResponseConfig, RotDConfig, validate_percentile};
use crate::engine::error::EngineError;
use crate::engine::progress::{Phase, ProgressReporter};
use crate::engine::tasks::rotation;
use nalgebra::DMatrix;
use tracing::{info, instrument, warn};

#[derive(Debug, Clone, PartialEq)]
pub struct RotDResult {
    pub periods: Vec<f64>,
    pub percentile: f64,
    /// RotDxx pseudo-acceleration, one value per period.
    pub spectrum: Vec<f64>,
    /// Peak rotated pseudo-acceleration, 180 angles by period.
    pub matrix: DMatrix<f64>,
}

/// Conditions both horizontal components and computes their RotDxx spectrum.
///
/// The components must share `dt`. A shorter component is zero-padded to the length of the
/// longer one before integration.
#[instrument(skip_all, name = "rotd_workflow", fields(percentile = config.percentile))]
pub fn run(
    first: &GroundMotionRecord,
    second: &GroundMotionRecord,
    config: &RotDConfig,
    reporter: &ProgressReporter,
) -> Result<RotDResult, EngineError> {
    check_time_steps(first.dt(), second.dt())?;

    let (first, second) = reporter.phase(Phase::Conditioning, || {
        Ok::<_, EngineError>((
            condition::run(first, &config.conditioning)?,
            condition::run(second, &config.conditioning)?,
        ))
    })?;

    compute(&first, &second, &config.response, config.percentile, reporter)
}

/// RotDxx spectrum of two raw acceleration series without any conditioning.
pub fn rotd_spectrum(
    first: &[f64],
    second: &[f64],
    dt: f64,
    periods: &PeriodGrid,
    oscillator: &Oscillator,
    percentile: f64,
) -> Result<RotDResult, EngineError> {
    let first = GroundMotionRecord::new(first.to_vec(), dt)?;
    let second = GroundMotionRecord::new(second.to_vec(), dt)?;
    let response = ResponseConfig {
        periods: periods.clone(),
        oscillator: *oscillator,
    };
    compute(&first, &second, &response, percentile, &ProgressReporter::new())
}

fn compute(
    first: &GroundMotionRecord,
    second: &GroundMotionRecord,
    response: &ResponseConfig,
    percentile: f64,
    reporter: &ProgressReporter,
) -> Result<RotDResult, EngineError> {
    validate_percentile(percentile)?;
    let (first, second) = align(first, second);
    info!(
        samples = first.len(),
        periods = response.periods.len(),
        percentile,
        "Computing RotDxx spectrum."
    );

    let (histories_1, histories_2) = reporter.phase(Phase::Response, || {
        Ok::<_, EngineError>((
            response_histories(&first, response)?,
            response_histories(&second, response)?,
        ))
    })?;

    let (matrix, spectrum) = reporter.phase(Phase::RotationSweep, || {
        let matrix = rotation::sweep(&histories_1, &histories_2, reporter);
        let spectrum = rotation::percentile_spectrum(&matrix, percentile);
        Ok::<_, EngineError>((matrix, spectrum))
    })?;

    Ok(RotDResult {
        periods: response.periods.as_slice().to_vec(),
        percentile,
        spectrum,
        matrix,
    })
}

fn check_time_steps(first: f64, second: f64) -> Result<(), EngineError> {
    if (first - second).abs() > 1e-12 * first.abs().max(second.abs()) {
        return Err(EngineError::InvalidInput(format!(
            "components must share the sampling interval, got {first} and {second}"
        )));
    }
    Ok(())
}

/// Zero-pads the shorter component so both have the same length.
fn align(
    first: &GroundMotionRecord,
    second: &GroundMotionRecord,
) -> (GroundMotionRecord, GroundMotionRecord) {
    let len = first.len().max(second.len());
    if first.len() != second.len() {
        warn!(
            first = first.len(),
            second = second.len(),
            "Component lengths differ; zero-padding the shorter one."
        );
    }
    (first.zero_padded(len), second.zero_padded(len))
}
