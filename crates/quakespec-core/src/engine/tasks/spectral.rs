use super::ground_motion::GroundKinematics;
use crate::core::models::measures::{IntensityMeasureSet, Measure, MeasureName};
use crate::core::models::periods::PeriodGrid;
use crate::core::models::record::GroundMotionRecord;
use crate::core::models::response::ResponseHistory;
use crate::core::utils::integration::trapezoid_xy;
use crate::core::utils::statistics::argmax;
use crate::engine::error::EngineError;
use itertools::Itertools;
use tracing::{debug, instrument, warn};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Landmark periods bounding the spectrum-intensity integrals.
pub const SI_LOWER_PERIOD: f64 = 0.1;
pub const ASI_UPPER_PERIOD: f64 = 0.5;
pub const SI_UPPER_PERIOD: f64 = 2.5;

/// Elastic, pseudo and input-energy spectra plus the spectrum-intensity measures and `Tp`.
///
/// `histories` must hold one history per grid period, in grid order, each as long as `record`.
#[instrument(skip_all, name = "spectral_task", fields(periods = grid.len()))]
pub fn run(
    record: &GroundMotionRecord,
    kinematics: &GroundKinematics,
    grid: &PeriodGrid,
    histories: &[ResponseHistory],
    mass: f64,
) -> Result<IntensityMeasureSet, EngineError> {
    check_histories(record, grid, histories)?;
    let periods = grid.as_slice();

    let (sd, sv, sa): (Vec<f64>, Vec<f64>, Vec<f64>) = histories
        .iter()
        .map(|h| {
            (
                h.peak_displacement(),
                h.peak_velocity(),
                h.peak_total_acceleration(),
            )
        })
        .multiunzip();
    let psv: Vec<f64> = histories
        .iter()
        .zip(&sd)
        .map(|(h, d)| h.circular_frequency() * d)
        .collect();
    let psa: Vec<f64> = histories
        .iter()
        .zip(&sd)
        .map(|(h, d)| h.circular_frequency().powi(2) * d)
        .collect();

    #[cfg(not(feature = "parallel"))]
    let iterator = histories.iter();

    #[cfg(feature = "parallel")]
    let iterator = histories.par_iter();

    let (ei_r, ei_a): (Vec<f64>, Vec<f64>) = iterator
        .map(|h| {
            (
                input_energy(record.samples(), &h.displacement) * mass,
                input_energy(&kinematics.displacement, &h.total_acceleration) * mass,
            )
        })
        .unzip();

    let mut measures = IntensityMeasureSet::new();
    measures.insert(MeasureName::Periods, Measure::vector(periods.to_vec()));

    let hi = spectrum_intensity(grid, &psv, SI_LOWER_PERIOD, SI_UPPER_PERIOD);
    let asi = spectrum_intensity(grid, &sa, SI_LOWER_PERIOD, ASI_UPPER_PERIOD);
    let masi = spectrum_intensity(grid, &sa, SI_LOWER_PERIOD, SI_UPPER_PERIOD);
    let vsi = spectrum_intensity(grid, &sv, SI_LOWER_PERIOD, SI_UPPER_PERIOD);
    for (name, value) in [
        (MeasureName::Hi, hi),
        (MeasureName::Asi, asi),
        (MeasureName::Masi, masi),
        (MeasureName::Vsi, vsi),
    ] {
        let measure = match value {
            Some(v) => Measure::scalar(v),
            None => {
                warn!(measure = %name, "Landmark periods missing from the grid; measure is not applicable.");
                Measure::NotApplicable
            }
        };
        measures.insert(name, measure);
    }

    let tp = argmax(&sa)
        .map(|i| periods[i])
        .ok_or_else(|| EngineError::Numerical {
            measure: MeasureName::Tp,
            reason: "spectral acceleration is empty".to_string(),
        })?;
    measures.insert(MeasureName::Tp, Measure::scalar(tp));
    debug!(tp, "Predominant period found.");

    measures.insert(MeasureName::Sd, Measure::vector(sd));
    measures.insert(MeasureName::Sv, Measure::vector(sv));
    measures.insert(MeasureName::Sa, Measure::vector(sa));
    measures.insert(MeasureName::PSv, Measure::vector(psv));
    measures.insert(MeasureName::PSa, Measure::vector(psa));
    measures.insert(MeasureName::EiRelative, Measure::vector(ei_r));
    measures.insert(MeasureName::EiAbsolute, Measure::vector(ei_a));

    Ok(measures)
}

fn check_histories(
    record: &GroundMotionRecord,
    grid: &PeriodGrid,
    histories: &[ResponseHistory],
) -> Result<(), EngineError> {
    if histories.len() != grid.len() {
        return Err(EngineError::InvalidInput(format!(
            "expected {} response histories, got {}",
            grid.len(),
            histories.len()
        )));
    }
    if let Some(h) = histories.iter().find(|h| h.len() != record.len()) {
        return Err(EngineError::InvalidInput(format!(
            "response history for T = {} has {} samples, record has {}",
            h.period,
            h.len(),
            record.len()
        )));
    }
    Ok(())
}

/// Terminal value of `∫ -force d(response)` by the trapezoidal rule.
fn input_energy(force: &[f64], response: &[f64]) -> f64 {
    let negated: Vec<f64> = force.iter().map(|f| -f).collect();
    trapezoid_xy(&negated, response)
}

/// Trapezoidal integral of `values` over the grid points from `lower` to `upper` inclusive.
///
/// Both bounds must be present in the grid exactly; otherwise there is nothing to integrate.
/// The last trapezoid ends at `upper` itself, so on a coarse grid the result is larger than an
/// integral that stops at the grid point before `upper`.
fn spectrum_intensity(grid: &PeriodGrid, values: &[f64], lower: f64, upper: f64) -> Option<f64> {
    let start = grid.position_exact(lower)?;
    let end = grid.position_exact(upper)?;
    let periods = grid.as_slice();
    Some(trapezoid_xy(&values[start..=end], &periods[start..=end]))
}
