use std::cmp::Ordering;

/// Largest absolute value, or zero for an empty slice.
#[inline]
pub fn peak_abs(values: &[f64]) -> f64 {
    values.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()))
}

/// Index of the first maximum.
pub fn argmax(values: &[f64]) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}

/// Percentile with linear interpolation between order statistics.
///
/// `percentile` is in `[0, 100]`; `0` yields the minimum and `100` the maximum.
pub fn percentile(values: &[f64], percentile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));

    let rank = percentile.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let fraction = rank - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * fraction)
}

/// Rounds half away from zero to `decimals` places.
#[inline]
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Smallest power of two that is `>= n` (one for `n <= 1`).
#[inline]
pub fn next_power_of_two(n: usize) -> usize {
    n.max(1).next_power_of_two()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_abs_ignores_sign() {
        assert_eq!(peak_abs(&[1.0, -3.5, 2.0]), 3.5);
        assert_eq!(peak_abs(&[]), 0.0);
    }

    #[test]
    fn argmax_returns_first_of_ties() {
        assert_eq!(argmax(&[1.0, 4.0, 4.0, 2.0]), Some(1));
        assert_eq!(argmax(&[]), None);
    }

    #[test]
    fn percentile_interpolates_linearly() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(percentile(&values, 0.0), Some(1.0));
        assert_eq!(percentile(&values, 100.0), Some(4.0));
        assert_eq!(percentile(&values, 50.0), Some(2.5));
        assert!((percentile(&values, 25.0).unwrap() - 1.75).abs() < 1e-12);
        assert_eq!(percentile(&[], 50.0), None);
    }

    #[test]
    fn round_to_milliseconds() {
        assert_eq!(round_to(1.23449, 3), 1.234);
        assert_eq!(round_to(1.2345, 1), 1.2);
    }

    #[test]
    fn next_power_of_two_rounds_up() {
        assert_eq!(next_power_of_two(0), 1);
        assert_eq!(next_power_of_two(1), 1);
        assert_eq!(next_power_of_two(5), 8);
        assert_eq!(next_power_of_two(1024), 1024);
    }
}
