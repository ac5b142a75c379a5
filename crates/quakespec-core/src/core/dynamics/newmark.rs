use super::{Oscillator, SolverError};
use crate::core::models::response::ResponseHistory;
use std::f64::consts::TAU;

/// Largest `dt / T` for which the linear-acceleration method is used.
pub const LINEAR_ACCELERATION_LIMIT: f64 = 0.55;

const GAMMA: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewmarkScheme {
    /// `β = 1/6`; conditionally stable, more accurate.
    LinearAcceleration,
    /// `β = 1/4`; unconditionally stable.
    AverageAcceleration,
}

impl NewmarkScheme {
    /// Picks the scheme for one period: linear acceleration while `dt / T <= 0.55`.
    pub fn select(dt: f64, period: f64) -> Self {
        if dt / period <= LINEAR_ACCELERATION_LIMIT {
            Self::LinearAcceleration
        } else {
            Self::AverageAcceleration
        }
    }

    pub fn beta(self) -> f64 {
        match self {
            Self::LinearAcceleration => 1.0 / 6.0,
            Self::AverageAcceleration => 0.25,
        }
    }
}

/// Incremental-form constants for one (period, dt, scheme) combination.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Constants {
    a1: f64,
    a2: f64,
    a3: f64,
    a4: f64,
    a5: f64,
    a6: f64,
    stiffness: f64,
    damping: f64,
    effective_stiffness: f64,
    velocity_factor: f64,
    acceleration_factor: f64,
}

impl Constants {
    fn new(period: f64, dt: f64, oscillator: &Oscillator, scheme: NewmarkScheme) -> Self {
        let m = oscillator.mass;
        let omega = TAU / period;
        let stiffness = m * omega * omega;
        let damping = 2.0 * m * omega * oscillator.damping_ratio;

        let beta = scheme.beta();
        let a1 = GAMMA / (beta * dt);
        let a2 = 1.0 / (beta * dt * dt);
        let a3 = 1.0 / (beta * dt);
        let a4 = GAMMA / beta;
        let a5 = 1.0 / (2.0 * beta);
        let a6 = (GAMMA / (2.0 * beta) - 1.0) * dt;

        Self {
            a1,
            a2,
            a3,
            a4,
            a5,
            a6,
            stiffness,
            damping,
            effective_stiffness: stiffness + a1 * damping + a2 * m,
            velocity_factor: a3 * m + a4 * damping,
            acceleration_factor: a5 * m + a6 * damping,
        }
    }
}

/// Integrates one oscillator with the scheme chosen by [`NewmarkScheme::select`].
pub fn integrate(
    accel: &[f64],
    dt: f64,
    period: f64,
    oscillator: &Oscillator,
) -> Result<ResponseHistory, SolverError> {
    integrate_with_scheme(accel, dt, period, oscillator, NewmarkScheme::select(dt, period))
}

/// Integrates one oscillator from rest under ground acceleration `accel` with a fixed scheme.
///
/// The external force is `p = -m * accel`; the initial relative acceleration follows from
/// equilibrium at `t = 0`.
pub fn integrate_with_scheme(
    accel: &[f64],
    dt: f64,
    period: f64,
    oscillator: &Oscillator,
    scheme: NewmarkScheme,
) -> Result<ResponseHistory, SolverError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SolverError::InvalidTimeStep(dt));
    }
    if !(period.is_finite() && period > 0.0) {
        return Err(SolverError::InvalidPeriod {
            index: 0,
            value: period,
        });
    }
    if accel.is_empty() {
        return Err(SolverError::EmptyExcitation);
    }

    let m = oscillator.mass;
    let c = Constants::new(period, dt, oscillator, scheme);
    let mut history = ResponseHistory::zeros(period, accel.len());
    let ResponseHistory {
        displacement: u,
        velocity: v,
        acceleration: a,
        total_acceleration: a_tot,
        ..
    } = &mut history;

    let force = |i: usize| -m * accel[i];

    a[0] = (force(0) - c.damping * v[0] - c.stiffness * u[0]) / m;
    a_tot[0] = a[0] + accel[0];

    for i in 0..accel.len() - 1 {
        let dp = (force(i + 1) - force(i))
            + c.velocity_factor * v[i]
            + c.acceleration_factor * a[i];
        let du = dp / c.effective_stiffness;
        let dv = c.a1 * du - c.a4 * v[i] - c.a6 * a[i];
        let da = c.a2 * du - c.a3 * v[i] - c.a5 * a[i];

        u[i + 1] = u[i] + du;
        v[i + 1] = v[i] + dv;
        a[i + 1] = a[i] + da;
        a_tot[i + 1] = a[i + 1] + accel[i + 1];
    }

    Ok(history)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::utils::statistics::peak_abs;

    const RELATIVE_TOLERANCE: f64 = 1e-12;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            let scale = e.abs().max(1e-300);
            assert!(
                (a - e).abs() <= RELATIVE_TOLERANCE * scale,
                "index {i}: {a} != {e}"
            );
        }
    }

    #[test]
    fn scheme_switches_at_stability_limit() {
        assert_eq!(
            NewmarkScheme::select(0.01, 0.5),
            NewmarkScheme::LinearAcceleration
        );
        assert_eq!(
            NewmarkScheme::select(0.55, 1.0),
            NewmarkScheme::LinearAcceleration
        );
        assert_eq!(
            NewmarkScheme::select(0.56, 1.0),
            NewmarkScheme::AverageAcceleration
        );
    }

    #[test]
    fn pulse_response_matches_pinned_baseline() {
        let accel = [0.0, 9.81, 0.0, -9.81, 0.0];
        let history = integrate(&accel, 0.01, 0.5, &Oscillator::new(0.05, 1.0).unwrap()).unwrap();

        assert_close(
            &history.displacement,
            &[
                0.0,
                -0.00016205526438371813,
                -0.000967776673044366,
                -0.001748315079686336,
                -0.0018435462351452637,
            ],
        );
        assert_close(
            &history.velocity,
            &[
                0.0,
                -0.04861657931511544,
                -0.09586668465284803,
                -0.04379462666427775,
                0.0083143226796897,
            ],
        );
        assert_close(
            &history.acceleration,
            &[
                0.0,
                -9.723315863023087,
                0.27329479547656454,
                10.141116802237494,
                0.28067306655599467,
            ],
        );
        assert_close(
            &history.total_acceleration,
            &[
                0.0,
                0.08668413697691335,
                0.27329479547656454,
                0.33111680223749396,
                0.28067306655599467,
            ],
        );
    }

    #[test]
    fn repeated_integration_is_bitwise_identical() {
        let accel: Vec<f64> = (0..300).map(|i| ((i * 37 % 101) as f64 - 50.0) * 0.01).collect();
        let oscillator = Oscillator::default();
        let first = integrate(&accel, 0.01, 0.3, &oscillator).unwrap();
        let second = integrate(&accel, 0.01, 0.3, &oscillator).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn forcing_linear_acceleration_beyond_limit_diverges() {
        let mut accel = vec![0.0; 400];
        accel[1] = 1.0;
        let (dt, period) = (0.02, 0.01);
        let oscillator = Oscillator::default();

        assert_eq!(
            NewmarkScheme::select(dt, period),
            NewmarkScheme::AverageAcceleration
        );
        let forced = integrate_with_scheme(
            &accel,
            dt,
            period,
            &oscillator,
            NewmarkScheme::LinearAcceleration,
        )
        .unwrap();
        let selected = integrate(&accel, dt, period, &oscillator).unwrap();

        let selected_peak = peak_abs(&selected.displacement);
        assert!(selected_peak.is_finite() && selected_peak < 1e-3);
        let forced_peak = peak_abs(&forced.displacement);
        assert!(!forced_peak.is_finite() || forced_peak > 1e100);
    }

    #[test]
    fn undamped_free_vibration_conserves_amplitude() {
        // A single-step velocity kick followed by free vibration.
        let mut accel = vec![0.0; 2000];
        accel[1] = -1.0;
        let oscillator = Oscillator::new(0.0, 1.0).unwrap();
        let history = integrate(&accel, 0.005, 1.0, &oscillator).unwrap();
        let early = peak_abs(&history.displacement[..1000]);
        let late = peak_abs(&history.displacement[1000..]);
        assert!((early - late).abs() / early < 1e-2);
    }

    #[test]
    fn total_acceleration_is_relative_plus_ground() {
        let accel = [0.3, -0.2, 0.5, 0.1];
        let history = integrate(&accel, 0.01, 0.2, &Oscillator::default()).unwrap();
        for i in 0..accel.len() {
            assert_eq!(
                history.total_acceleration[i],
                history.acceleration[i] + accel[i]
            );
        }
    }

    #[test]
    fn rejects_invalid_arguments() {
        let oscillator = Oscillator::default();
        assert_eq!(
            integrate(&[0.0], 0.0, 1.0, &oscillator),
            Err(SolverError::InvalidTimeStep(0.0))
        );
        assert!(matches!(
            integrate(&[0.0], 0.01, 0.0, &oscillator),
            Err(SolverError::InvalidPeriod { .. })
        ));
        assert_eq!(
            integrate(&[], 0.01, 1.0, &oscillator),
            Err(SolverError::EmptyExcitation)
        );
        assert_eq!(Oscillator::new(1.0, 1.0), Err(SolverError::InvalidDamping(1.0)));
        assert_eq!(Oscillator::new(0.05, 0.0), Err(SolverError::InvalidMass(0.0)));
    }
}
