use super::ModelError;
use serde::Deserialize;
use tracing::warn;

/// Strictly increasing, strictly positive natural periods in seconds.
///
/// A period of exactly zero is accepted on construction but removed from the grid; it has no
/// oscillator behind it and callers conventionally use it to mean "report PGA at T = 0".
/// [`PeriodGrid::had_zero_period`] tells whether that happened.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Vec<f64>")]
pub struct PeriodGrid {
    periods: Vec<f64>,
    had_zero_period: bool,
}

impl PeriodGrid {
    pub fn new(values: Vec<f64>) -> Result<Self, ModelError> {
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() || value < 0.0 {
                return Err(ModelError::InvalidPeriod { index, value });
            }
        }

        let original_len = values.len();
        let periods: Vec<f64> = values.into_iter().filter(|&t| t != 0.0).collect();
        let had_zero_period = periods.len() != original_len;
        if had_zero_period {
            warn!(
                dropped = original_len - periods.len(),
                "Zero period(s) removed from the period grid; spectral values are undefined at T = 0."
            );
        }

        if periods.is_empty() {
            return Err(ModelError::EmptyPeriodGrid);
        }
        if let Some(pair) = periods.windows(2).find(|w| w[1] <= w[0]) {
            return Err(ModelError::UnorderedPeriods {
                previous: pair[0],
                next: pair[1],
            });
        }

        Ok(Self {
            periods,
            had_zero_period,
        })
    }

    /// Evenly spaced grid from `start` to `stop` inclusive with spacing `step`.
    pub fn linspace_step(start: f64, stop: f64, step: f64) -> Result<Self, ModelError> {
        if !(step.is_finite() && step > 0.0) || stop < start {
            return Err(ModelError::EmptyPeriodGrid);
        }
        let count = ((stop - start) / step + 1e-9).floor() as usize + 1;
        Self::new((0..count).map(|i| start + i as f64 * step).collect())
    }

    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.periods
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn had_zero_period(&self) -> bool {
        self.had_zero_period
    }

    /// Index of a period equal to `target` bit for bit. No tolerance is applied.
    pub fn position_exact(&self, target: f64) -> Option<usize> {
        self.periods.iter().position(|&t| t == target)
    }

    pub fn iter(&self) -> impl Iterator<Item = &f64> {
        self.periods.iter()
    }
}

impl TryFrom<Vec<f64>> for PeriodGrid {
    type Error = ModelError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::new(values)
    }
}
