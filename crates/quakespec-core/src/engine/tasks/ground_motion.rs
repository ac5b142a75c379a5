use super::GRAVITY;
use crate::core::models::measures::{IntensityMeasureSet, Measure, MeasureName};
use crate::core::models::record::GroundMotionRecord;
use crate::core::utils::integration::{cumulative_trapezoid, trapezoid};
use crate::core::utils::statistics::peak_abs;
use crate::engine::error::EngineError;
use std::f64::consts::PI;
use tracing::{debug, instrument};

/// Ground velocity and displacement obtained by integrating the acceleration record twice.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundKinematics {
    pub velocity: Vec<f64>,
    pub displacement: Vec<f64>,
}

impl GroundKinematics {
    pub fn integrate(record: &GroundMotionRecord) -> Self {
        let velocity = cumulative_trapezoid(record.samples(), record.dt());
        let displacement = cumulative_trapezoid(&velocity, record.dt());
        Self {
            velocity,
            displacement,
        }
    }
}

/// Running Arias intensity, `π/(2g) · Σ a² · dt`.
pub fn arias_curve(samples: &[f64], dt: f64) -> Vec<f64> {
    let scale = PI * dt / (2.0 * GRAVITY);
    samples
        .iter()
        .scan(0.0, |acc, &a| {
            *acc += a * a;
            Some(*acc * scale)
        })
        .collect()
}

/// Root mean square of `values` over `duration`, integrating with the trapezoidal rule.
pub fn root_mean_square(
    values: &[f64],
    dt: f64,
    duration: f64,
    measure: MeasureName,
) -> Result<f64, EngineError> {
    if duration <= 0.0 {
        return Err(EngineError::Numerical {
            measure,
            reason: "record duration is zero".to_string(),
        });
    }
    let squares: Vec<f64> = values.iter().map(|v| v * v).collect();
    Ok((trapezoid(&squares, dt) / duration).sqrt())
}

/// Peak ground motion, Arias intensity, CAV, RMS values and characteristic intensity.
#[instrument(skip_all, name = "ground_motion_task")]
pub fn run(
    record: &GroundMotionRecord,
    kinematics: &GroundKinematics,
) -> Result<IntensityMeasureSet, EngineError> {
    let accel = record.samples();
    let dt = record.dt();
    let mut measures = IntensityMeasureSet::new();

    measures.insert(MeasureName::Pga, Measure::scalar(peak_abs(accel)));
    measures.insert(MeasureName::Pgv, Measure::scalar(peak_abs(&kinematics.velocity)));
    measures.insert(
        MeasureName::Pgd,
        Measure::scalar(peak_abs(&kinematics.displacement)),
    );

    let arias = arias_curve(accel, dt);
    let total = arias.last().copied().unwrap_or(0.0);
    measures.insert(MeasureName::Arias, Measure::scalar(total));
    measures.insert(
        MeasureName::AriasCurve,
        Measure::series(record.time_base(), arias),
    );

    let absolute: Vec<f64> = accel.iter().map(|a| a.abs()).collect();
    measures.insert(MeasureName::Cav, Measure::scalar(trapezoid(&absolute, dt)));

    let duration = record.duration();
    let a_rms = root_mean_square(accel, dt, duration, MeasureName::ARms)?;
    let v_rms = root_mean_square(&kinematics.velocity, dt, duration, MeasureName::VRms)?;
    let d_rms = root_mean_square(&kinematics.displacement, dt, duration, MeasureName::DRms)?;
    measures.insert(MeasureName::ARms, Measure::scalar(a_rms));
    measures.insert(MeasureName::VRms, Measure::scalar(v_rms));
    measures.insert(MeasureName::DRms, Measure::scalar(d_rms));
    measures.insert(
        MeasureName::Ic,
        Measure::scalar(a_rms.powf(1.5) * duration.sqrt()),
    );

    debug!(arias = total, a_rms, "Ground motion measures computed.");
    Ok(measures)
}
