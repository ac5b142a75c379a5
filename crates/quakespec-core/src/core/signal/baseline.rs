use super::{SignalError, check_time_step};
use nalgebra::{DMatrix, DVector};
use serde::Deserialize;

/// Degree of the polynomial trend removed from a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaselineOrder {
    Constant,
    Linear,
    Quadratic,
    Cubic,
}

impl BaselineOrder {
    pub fn degree(self) -> usize {
        match self {
            Self::Constant => 0,
            Self::Linear => 1,
            Self::Quadratic => 2,
            Self::Cubic => 3,
        }
    }

    pub fn from_degree(degree: usize) -> Option<Self> {
        match degree {
            0 => Some(Self::Constant),
            1 => Some(Self::Linear),
            2 => Some(Self::Quadratic),
            3 => Some(Self::Cubic),
            _ => None,
        }
    }
}

/// Subtracts the least-squares polynomial of the given order fitted over `t_i = i * dt`.
///
/// A polynomial of degree `d` needs at least `d + 1` samples to be determined.
pub fn baseline_correct(
    values: &[f64],
    dt: f64,
    order: BaselineOrder,
) -> Result<Vec<f64>, SignalError> {
    check_time_step(dt)?;
    if values.is_empty() {
        return Err(SignalError::EmptySignal);
    }

    let n = values.len();
    let degree = order.degree();
    if n <= degree {
        return Err(SignalError::TooFewSamples {
            degree,
            needed: degree + 1,
            got: n,
        });
    }
    // Time is normalised to [0, 1] for conditioning; the fitted curve is unchanged.
    let span = ((n - 1) as f64 * dt).max(dt);
    let tau: Vec<f64> = (0..n).map(|i| i as f64 * dt / span).collect();

    let vandermonde = DMatrix::from_fn(n, degree + 1, |row, col| tau[row].powi(col as i32));
    let rhs = DVector::from_column_slice(values);
    let coefficients = vandermonde
        .clone()
        .svd(true, true)
        .solve(&rhs, 1e-12)
        .map_err(|e| SignalError::LeastSquares(e.to_string()))?;

    let fitted = vandermonde * coefficients;
    Ok(values
        .iter()
        .zip(fitted.iter())
        .map(|(v, f)| v - f)
        .collect())
}
