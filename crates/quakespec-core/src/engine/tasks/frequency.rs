use super::ground_motion::root_mean_square;
use crate::core::models::measures::{IntensityMeasureSet, Measure, MeasureName};
use crate::core::models::record::GroundMotionRecord;
use crate::core::signal::fourier::amplitude_spectrum;
use crate::engine::error::EngineError;
use std::f64::consts::PI;
use tracing::{debug, instrument};

/// Frequency band, in Hz, over which the mean period is averaged (bounds excluded).
pub const MEAN_PERIOD_BAND: (f64, f64) = (0.25, 20.0);

/// Fourier and power amplitude spectra and the mean period `Tm`.
#[instrument(skip_all, name = "frequency_task", fields(samples = record.len()))]
pub fn run(record: &GroundMotionRecord) -> Result<IntensityMeasureSet, EngineError> {
    let duration = record.duration();
    let a_rms = root_mean_square(record.samples(), record.dt(), duration, MeasureName::Pas)?;
    if a_rms == 0.0 {
        return Err(EngineError::Numerical {
            measure: MeasureName::Pas,
            reason: "root mean square acceleration is zero".to_string(),
        });
    }

    let spectrum = amplitude_spectrum(record.samples(), record.dt());
    debug!(bins = spectrum.frequencies.len(), "Fourier amplitude spectrum computed.");

    let norm = PI * duration * a_rms * a_rms;
    let power: Vec<f64> = spectrum.amplitudes.iter().map(|c| c * c / norm).collect();

    let (low, high) = MEAN_PERIOD_BAND;
    let (weighted, total) = spectrum
        .frequencies
        .iter()
        .zip(&spectrum.amplitudes)
        .filter(|(f, _)| **f > low && **f < high)
        .fold((0.0, 0.0), |(w, t), (f, c)| (w + c * c / f, t + c * c));
    if total == 0.0 {
        return Err(EngineError::Numerical {
            measure: MeasureName::Tm,
            reason: format!("no spectral content between {low} Hz and {high} Hz"),
        });
    }

    let mut measures = IntensityMeasureSet::new();
    measures.insert(MeasureName::Tm, Measure::scalar(weighted / total));
    measures.insert(
        MeasureName::Pas,
        Measure::series(spectrum.frequencies.clone(), power),
    );
    measures.insert(
        MeasureName::Fas,
        Measure::series(spectrum.frequencies, spectrum.amplitudes),
    );
    Ok(measures)
}
