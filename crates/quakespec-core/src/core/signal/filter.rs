use super::butterworth::{self, Band};
use super::{SignalError, check_time_step};
use serde::Deserialize;
use tracing::debug;

/// Where constant-value padding is placed around the record before filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PadMode {
    #[default]
    None,
    /// Padding before the first sample.
    Start,
    /// Padding after the last sample.
    End,
    /// Padding split evenly before and after.
    Mid,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Padding {
    pub mode: PadMode,
    /// Each increment doubles the padded length beyond the next power of two.
    pub doublings: u32,
    /// Number of samples averaged at each end to obtain the padding value.
    pub tail_samples: usize,
}

impl Default for Padding {
    fn default() -> Self {
        Self {
            mode: PadMode::None,
            doublings: 1,
            tail_samples: 50,
        }
    }
}

/// Zero-phase Butterworth filtering of a uniformly sampled signal.
///
/// With padding enabled the signal is embedded in a buffer of length
/// `2^(ceil(log2 n) + doublings)`, the pad regions holding the mean of the first or last
/// `tail_samples` samples, and the original span is cut back out after filtering.
pub fn butterworth_filter(
    values: &[f64],
    dt: f64,
    band: Band,
    order: usize,
    padding: &Padding,
) -> Result<Vec<f64>, SignalError> {
    check_time_step(dt)?;
    if values.is_empty() {
        return Err(SignalError::EmptySignal);
    }
    let cascade = butterworth::design(band, order, 1.0 / dt)?;

    let (padded, offset) = pad(values, padding);
    debug!(
        samples = values.len(),
        padded = padded.len(),
        offset,
        sections = cascade.len(),
        "Applying zero-phase Butterworth filter."
    );
    let filtered = butterworth::filtfilt(&cascade, &padded);
    Ok(filtered[offset..offset + values.len()].to_vec())
}

/// Returns the padded buffer and the index of the first original sample inside it.
fn pad(values: &[f64], padding: &Padding) -> (Vec<f64>, usize) {
    if padding.mode == PadMode::None {
        return (values.to_vec(), 0);
    }

    let n = values.len();
    let exponent = n.next_power_of_two().trailing_zeros() + padding.doublings;
    let padded_len = 1usize << exponent;
    let extra = padded_len - n;
    let offset = match padding.mode {
        PadMode::Start => extra,
        PadMode::End | PadMode::None => 0,
        PadMode::Mid => extra / 2,
    };

    let tail = padding.tail_samples.clamp(1, n);
    let start_value = values[..tail].iter().sum::<f64>() / tail as f64;
    let end_value = values[n - tail..].iter().sum::<f64>() / tail as f64;

    let mut padded = vec![start_value; padded_len];
    padded[offset..offset + n].copy_from_slice(values);
    padded[offset + n..].fill(end_value);
    (padded, offset)
}
