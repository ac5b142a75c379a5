use crate::core::utils::statistics::next_power_of_two;
use rustfft::FftPlanner;
use rustfft::num_complex::Complex64;

/// One-sided Fourier amplitude spectrum over strictly positive frequencies.
#[derive(Debug, Clone, PartialEq)]
pub struct AmplitudeSpectrum {
    pub frequencies: Vec<f64>,
    pub amplitudes: Vec<f64>,
}

/// Zero-pads `values` to the next power of two and returns `|X(f)| * dt` for `0 < f < fs / 2`.
pub fn amplitude_spectrum(values: &[f64], dt: f64) -> AmplitudeSpectrum {
    let n = next_power_of_two(values.len());
    let mut buffer: Vec<Complex64> = values
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .chain(std::iter::repeat(Complex64::new(0.0, 0.0)))
        .take(n)
        .collect();

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    fft.process(&mut buffer);

    let df = 1.0 / (n as f64 * dt);
    // Bin n/2 is the negative Nyquist frequency in the usual FFT frequency convention.
    let positive = n.div_ceil(2);
    let (frequencies, amplitudes) = (1..positive)
        .map(|k| (k as f64 * df, buffer[k].norm() * dt))
        .unzip();

    AmplitudeSpectrum {
        frequencies,
        amplitudes,
    }
}
