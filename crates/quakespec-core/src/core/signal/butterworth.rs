//! Digital Butterworth filters as cascades of second-order sections.
//!
//! Analog prototype poles are scaled to the pre-warped cutoff and mapped to the z-plane with
//! the bilinear transform. Odd orders contribute one first-order section (stored as a biquad
//! with `b2 = a2 = 0`). A bandpass of order `N` applies the lowpass-to-bandpass substitution
//! `s -> (s² + Ω0²) / (s·B)` to each prototype pole, giving `N` biquads with unit gain at the
//! geometric centre `Ω0 = √(Ωl·Ωh)` and half power at both pre-warped edges.

use super::SignalError;
use num_complex::Complex64;
use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Band {
    Lowpass(f64),
    Highpass(f64),
    Bandpass { low: f64, high: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Response {
    Lowpass,
    Highpass,
}

/// One biquad in Direct Form II Transposed, normalised so that `a0 = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SecondOrderSection {
    pub b: [f64; 3],
    pub a: [f64; 2],
}

impl SecondOrderSection {
    /// DC gain `H(z = 1)`.
    pub fn dc_gain(&self) -> f64 {
        (self.b[0] + self.b[1] + self.b[2]) / (1.0 + self.a[0] + self.a[1])
    }

    /// Delay-line state that makes a constant input `x0` produce its steady-state output.
    fn steady_state(&self, x0: f64) -> [f64; 2] {
        let y0 = self.dc_gain() * x0;
        let d2 = self.b[2] * x0 - self.a[1] * y0;
        let d1 = y0 - self.b[0] * x0;
        [d1, d2]
    }

    fn run(&self, signal: &mut [f64], mut state: [f64; 2]) {
        let [b0, b1, b2] = self.b;
        let [a1, a2] = self.a;
        for x in signal.iter_mut() {
            let input = *x;
            let y = b0 * input + state[0];
            state[0] = b1 * input - a1 * y + state[1];
            state[1] = b2 * input - a2 * y;
            *x = y;
        }
    }
}

/// Designs the section cascade for `band` at the given sampling rate.
pub fn design(
    band: Band,
    order: usize,
    sample_rate: f64,
) -> Result<Vec<SecondOrderSection>, SignalError> {
    if order == 0 {
        return Err(SignalError::InvalidOrder);
    }
    let nyquist = 0.5 * sample_rate;
    let check = |cutoff: f64| {
        if cutoff.is_finite() && cutoff > 0.0 && cutoff < nyquist {
            Ok(cutoff)
        } else {
            Err(SignalError::CutoffOutOfRange { cutoff, nyquist })
        }
    };

    match band {
        Band::Lowpass(cutoff) => Ok(sections(
            order,
            check(cutoff)?,
            sample_rate,
            Response::Lowpass,
        )),
        Band::Highpass(cutoff) => Ok(sections(
            order,
            check(cutoff)?,
            sample_rate,
            Response::Highpass,
        )),
        Band::Bandpass { low, high } => {
            let (low, high) = (check(low)?, check(high)?);
            if low >= high {
                return Err(SignalError::InvertedBand { low, high });
            }
            Ok(bandpass_sections(order, low, high, sample_rate))
        }
    }
}

/// Filters forward then backward through the cascade so that no phase shift is introduced.
///
/// Each pass extends the signal by odd reflection at both ends and starts every section from
/// its steady state, which keeps the start-up transient out of the returned samples.
pub fn filtfilt(cascade: &[SecondOrderSection], values: &[f64]) -> Vec<f64> {
    let n = values.len();
    if n == 0 || cascade.is_empty() {
        return values.to_vec();
    }
    let pad = (3 * (2 * cascade.len() + 1)).min(n - 1);

    let mut extended = Vec::with_capacity(n + 2 * pad);
    let (first, last) = (values[0], values[n - 1]);
    extended.extend((1..=pad).rev().map(|i| 2.0 * first - values[i]));
    extended.extend_from_slice(values);
    extended.extend((1..=pad).map(|i| 2.0 * last - values[n - 1 - i]));

    run_cascade(cascade, &mut extended);
    extended.reverse();
    run_cascade(cascade, &mut extended);
    extended.reverse();

    extended.drain(..pad);
    extended.truncate(n);
    extended
}

fn run_cascade(cascade: &[SecondOrderSection], signal: &mut [f64]) {
    for section in cascade {
        let x0 = signal.first().copied().unwrap_or(0.0);
        let state = section.steady_state(x0);
        section.run(signal, state);
    }
}

fn prewarp(cutoff_hz: f64, sample_rate: f64) -> f64 {
    2.0 * sample_rate * (PI * cutoff_hz / sample_rate).tan()
}

/// Left-half-plane poles of the normalised prototype with non-negative imaginary part.
fn prototype_poles(order: usize) -> Vec<Complex64> {
    (0..order.div_ceil(2))
        .map(|k| {
            let theta = PI * (2 * k + order + 1) as f64 / (2 * order) as f64;
            Complex64::from_polar(1.0, theta)
        })
        .collect()
}

fn sections(
    order: usize,
    cutoff_hz: f64,
    sample_rate: f64,
    response: Response,
) -> Vec<SecondOrderSection> {
    let wc = prewarp(cutoff_hz, sample_rate);
    let k = 2.0 * sample_rate;
    prototype_poles(order)
        .into_iter()
        .map(|pole| {
            let p = pole * wc;
            if p.im.abs() < 1e-9 * wc {
                first_order(p.re, k, response)
            } else {
                second_order(p, k, response)
            }
        })
        .collect()
}

fn first_order(p: f64, k: f64, response: Response) -> SecondOrderSection {
    let alpha = k - p;
    let a1 = -(k + p) / alpha;
    let b = match response {
        Response::Lowpass => [-p / alpha, -p / alpha, 0.0],
        Response::Highpass => [k / alpha, -k / alpha, 0.0],
    };
    SecondOrderSection { b, a: [a1, 0.0] }
}

fn second_order(p: Complex64, k: f64, response: Response) -> SecondOrderSection {
    let mag_sq = p.norm_sqr();
    let k2 = k * k;
    let d = k2 - 2.0 * k * p.re + mag_sq;
    let a = [2.0 * (mag_sq - k2) / d, (k2 + 2.0 * k * p.re + mag_sq) / d];
    let b = match response {
        Response::Lowpass => [mag_sq / d, 2.0 * mag_sq / d, mag_sq / d],
        Response::Highpass => [k2 / d, -2.0 * k2 / d, k2 / d],
    };
    SecondOrderSection { b, a }
}

fn bandpass_sections(order: usize, low: f64, high: f64, sample_rate: f64) -> Vec<SecondOrderSection> {
    let (wl, wh) = (prewarp(low, sample_rate), prewarp(high, sample_rate));
    let bandwidth = wh - wl;
    let centre_sq = wl * wh;
    let k = 2.0 * sample_rate;

    let mut cascade = Vec::with_capacity(order);
    for pole in prototype_poles(order) {
        if pole.im.abs() < 1e-9 {
            // s² - pBs + Ω0² already has real coefficients.
            cascade.push(bilinear_bandpass(-pole.re * bandwidth, centre_sq, bandwidth, k));
        } else {
            let scaled = pole * bandwidth;
            let root = (scaled * scaled - 4.0 * centre_sq).sqrt();
            for q in [(scaled + root) * 0.5, (scaled - root) * 0.5] {
                cascade.push(bilinear_bandpass(-2.0 * q.re, q.norm_sqr(), bandwidth, k));
            }
        }
    }
    cascade
}

/// Bilinear transform of the analog section `B·s / (s² + β·s + γ)`.
fn bilinear_bandpass(beta: f64, gamma: f64, bandwidth: f64, k: f64) -> SecondOrderSection {
    let k2 = k * k;
    let d = k2 + beta * k + gamma;
    let gain = bandwidth * k / d;
    SecondOrderSection {
        b: [gain, 0.0, -gain],
        a: [2.0 * (gamma - k2) / d, (k2 - beta * k + gamma) / d],
    }
}
