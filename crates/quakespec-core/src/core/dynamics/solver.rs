use super::newmark::{NewmarkScheme, integrate_with_scheme};
use super::{Oscillator, SolverError};
use crate::core::models::response::ResponseHistory;
use tracing::{instrument, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Integrates one oscillator per entry of `periods` against the same ground acceleration.
///
/// The integration scheme is chosen per period. Histories are returned in period order and are
/// identical whether or not the `parallel` feature is enabled.
#[instrument(skip_all, name = "sdof_solver", fields(samples = accel.len(), periods = periods.len()))]
pub fn solve(
    accel: &[f64],
    dt: f64,
    periods: &[f64],
    oscillator: &Oscillator,
) -> Result<Vec<ResponseHistory>, SolverError> {
    if !(dt.is_finite() && dt > 0.0) {
        return Err(SolverError::InvalidTimeStep(dt));
    }
    if let Some((index, &value)) = periods
        .iter()
        .enumerate()
        .find(|(_, t)| !(t.is_finite() && **t > 0.0))
    {
        return Err(SolverError::InvalidPeriod { index, value });
    }

    #[cfg(not(feature = "parallel"))]
    let iterator = periods.iter();

    #[cfg(feature = "parallel")]
    let iterator = periods.par_iter();

    iterator
        .map(|&period| {
            let scheme = NewmarkScheme::select(dt, period);
            trace!(period, ?scheme, "Integrating oscillator.");
            integrate_with_scheme(accel, dt, period, oscillator, scheme)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::dynamics::newmark::integrate;

    #[test]
    fn solve_matches_single_period_integration() {
        let accel: Vec<f64> = (0..500)
            .map(|i| (i as f64 * 0.07).sin() * (-(i as f64) * 0.005).exp())
            .collect();
        let periods = [0.01, 0.05, 0.2, 1.0, 3.0];
        let oscillator = Oscillator::default();

        let histories = solve(&accel, 0.01, &periods, &oscillator).unwrap();
        assert_eq!(histories.len(), periods.len());
        for (history, &period) in histories.iter().zip(&periods) {
            assert_eq!(history.period, period);
            assert_eq!(history.len(), accel.len());
            assert_eq!(*history, integrate(&accel, 0.01, period, &oscillator).unwrap());
        }
    }

    #[test]
    fn mixed_grid_selects_scheme_per_period_and_stays_bounded() {
        let mut accel = vec![0.0; 400];
        accel[1] = 1.0;
        let histories = solve(&accel, 0.02, &[0.01, 1.0], &Oscillator::default()).unwrap();
        for history in &histories {
            assert!(history.peak_displacement().is_finite());
            assert!(history.peak_displacement() < 1.0);
        }
    }

    #[test]
    fn zero_period_reaching_solver_is_an_error() {
        assert_eq!(
            solve(&[0.0, 1.0], 0.01, &[0.1, 0.0], &Oscillator::default()),
            Err(SolverError::InvalidPeriod {
                index: 1,
                value: 0.0
            })
        );
    }

    #[test]
    fn empty_grid_yields_no_histories() {
        let histories = solve(&[0.0, 1.0], 0.01, &[], &Oscillator::default()).unwrap();
        assert!(histories.is_empty());
    }
}
