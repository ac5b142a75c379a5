/// Running trapezoidal integral of uniformly sampled `values`, starting at zero.
pub fn cumulative_trapezoid(values: &[f64], dt: f64) -> Vec<f64> {
    let mut out = Vec::with_capacity(values.len());
    if values.is_empty() {
        return out;
    }
    let mut acc = 0.0;
    out.push(acc);
    for w in values.windows(2) {
        acc += 0.5 * (w[0] + w[1]) * dt;
        out.push(acc);
    }
    out
}

/// Trapezoidal integral of uniformly sampled `values`.
pub fn trapezoid(values: &[f64], dt: f64) -> f64 {
    values
        .windows(2)
        .map(|w| 0.5 * (w[0] + w[1]) * dt)
        .sum()
}

/// Trapezoidal integral of `y` against an arbitrary abscissa `x` (`∫ y dx`).
///
/// Both slices must have the same length; extra elements of the longer one are ignored.
pub fn trapezoid_xy(y: &[f64], x: &[f64]) -> f64 {
    y.windows(2)
        .zip(x.windows(2))
        .map(|(yw, xw)| 0.5 * (yw[0] + yw[1]) * (xw[1] - xw[0]))
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    #[test]
    fn cumulative_trapezoid_of_constant_is_linear() {
        let out = cumulative_trapezoid(&[2.0; 4], 0.5);
        assert_eq!(out.len(), 4);
        for (i, v) in out.iter().enumerate() {
            assert!((v - i as f64).abs() < TOLERANCE);
        }
    }

    #[test]
    fn trapezoid_matches_terminal_cumulative_value() {
        let values = [0.0, 1.0, 4.0, 9.0, 16.0];
        let total = trapezoid(&values, 0.1);
        let running = cumulative_trapezoid(&values, 0.1);
        assert!((total - running[4]).abs() < TOLERANCE);
        assert!((total - 2.2).abs() < TOLERANCE);
    }

    #[test]
    fn trapezoid_xy_handles_non_uniform_abscissa() {
        let x = [0.0, 1.0, 3.0];
        let y = [1.0, 1.0, 1.0];
        assert!((trapezoid_xy(&y, &x) - 3.0).abs() < TOLERANCE);
        assert!((trapezoid_xy(&[1.0, 3.0], &[2.0, 1.0]) + 2.0).abs() < TOLERANCE);
    }

    #[test]
    fn single_sample_integrates_to_zero() {
        assert_eq!(cumulative_trapezoid(&[5.0], 0.1), vec![0.0]);
        assert_eq!(trapezoid(&[5.0], 0.1), 0.0);
    }
}
