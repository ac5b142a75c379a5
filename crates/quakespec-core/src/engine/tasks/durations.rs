use super::GRAVITY;
use crate::core::models::measures::{IntensityMeasureSet, Measure, MeasureName};
use crate::core::models::record::GroundMotionRecord;
use crate::core::utils::statistics::round_to;
use crate::engine::error::EngineError;
use itertools::Itertools;
use tracing::{instrument, warn};

/// Acceleration threshold for bracketed and uniform durations (0.05 g).
pub const DURATION_THRESHOLD: f64 = 0.05 * GRAVITY;

const DECIMALS: i32 = 3;

/// Significant, bracketed and uniform durations with their time windows.
///
/// `arias` is the running Arias intensity of `record`. Threshold-based durations are
/// `NotApplicable` when no sample reaches [`DURATION_THRESHOLD`].
#[instrument(skip_all, name = "durations_task")]
pub fn run(record: &GroundMotionRecord, arias: &[f64]) -> Result<IntensityMeasureSet, EngineError> {
    let time = record.time_base();
    let mut measures = IntensityMeasureSet::new();

    let (window, duration) = significant(&time, arias, 0.75, MeasureName::D5_75)?;
    measures.insert(MeasureName::T5_75, window);
    measures.insert(MeasureName::D5_75, duration);

    let (window, duration) = significant(&time, arias, 0.95, MeasureName::D5_95)?;
    measures.insert(MeasureName::T5_95, window);
    measures.insert(MeasureName::D5_95, duration);

    let exceedances: Vec<usize> = record
        .samples()
        .iter()
        .enumerate()
        .filter(|(_, a)| a.abs() >= DURATION_THRESHOLD)
        .map(|(i, _)| i)
        .collect();

    match (exceedances.first(), exceedances.last()) {
        (Some(&first), Some(&last)) => {
            let t1 = round_to(time[first], DECIMALS);
            let t2 = round_to(time[last], DECIMALS);
            measures.insert(MeasureName::TBracketed, Measure::vector(vec![t1, t2]));
            measures.insert(
                MeasureName::DBracketed,
                Measure::scalar(round_to(t2 - t1, DECIMALS)),
            );

            // Only gaps of exactly one step count towards the uniform duration.
            let contiguous = exceedances
                .iter()
                .tuple_windows()
                .filter(|(a, b)| *b - *a == 1)
                .count();
            measures.insert(
                MeasureName::TUniform,
                Measure::vector(exceedances.iter().map(|&i| time[i]).collect()),
            );
            measures.insert(
                MeasureName::DUniform,
                Measure::scalar(round_to(contiguous as f64 * record.dt(), DECIMALS)),
            );
        }
        _ => {
            warn!(
                threshold = DURATION_THRESHOLD,
                "No sample reaches the duration threshold; bracketed and uniform durations are not applicable."
            );
            for name in [
                MeasureName::TBracketed,
                MeasureName::DBracketed,
                MeasureName::TUniform,
                MeasureName::DUniform,
            ] {
                measures.insert(name, Measure::NotApplicable);
            }
        }
    }

    Ok(measures)
}

/// Window between the first and last samples whose Arias intensity lies in `[5%, upper]` of
/// the total.
fn significant(
    time: &[f64],
    arias: &[f64],
    upper: f64,
    measure: MeasureName,
) -> Result<(Measure, Measure), EngineError> {
    let total = arias.last().copied().unwrap_or(0.0);
    let (low, high) = (0.05 * total, upper * total);
    let mut inside = time
        .iter()
        .zip(arias)
        .filter(|(_, ia)| **ia >= low && **ia <= high)
        .map(|(t, _)| *t);

    let first = inside.next().ok_or_else(|| EngineError::Numerical {
        measure,
        reason: "no sample falls inside the Arias intensity window".to_string(),
    })?;
    let last = inside.last().unwrap_or(first);

    let t1 = round_to(first, DECIMALS);
    let t2 = round_to(last, DECIMALS);
    Ok((
        Measure::vector(vec![t1, t2]),
        Measure::scalar(round_to(t2 - t1, DECIMALS)),
    ))
}
