use super::ModelError;

/// A uniformly sampled acceleration time series. Sample `i` occurs at `i * dt`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroundMotionRecord {
    samples: Vec<f64>,
    dt: f64,
}

impl GroundMotionRecord {
    pub fn new(samples: Vec<f64>, dt: f64) -> Result<Self, ModelError> {
        validate_time_step(dt)?;
        if samples.is_empty() {
            return Err(ModelError::EmptyRecord);
        }
        if let Some((index, &value)) = samples.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(ModelError::NonFiniteSample { index, value });
        }
        Ok(Self { samples, dt })
    }

    #[inline]
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Time of the last sample, `(n - 1) * dt`.
    pub fn duration(&self) -> f64 {
        (self.samples.len() - 1) as f64 * self.dt
    }

    pub fn time_base(&self) -> Vec<f64> {
        time_base(self.samples.len(), self.dt)
    }

    /// Returns a copy extended with trailing zeros up to `len` samples.
    pub fn zero_padded(&self, len: usize) -> Self {
        let mut samples = self.samples.clone();
        if len > samples.len() {
            samples.resize(len, 0.0);
        }
        Self {
            samples,
            dt: self.dt,
        }
    }

    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }
}

pub(crate) fn validate_time_step(dt: f64) -> Result<(), ModelError> {
    if dt.is_finite() && dt > 0.0 {
        Ok(())
    } else {
        Err(ModelError::InvalidTimeStep(dt))
    }
}

pub(crate) fn time_base(len: usize, dt: f64) -> Vec<f64> {
    (0..len).map(|i| i as f64 * dt).collect()
}
