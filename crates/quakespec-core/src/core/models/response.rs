use crate::core::utils::statistics::peak_abs;

/// Response of one linear oscillator to one record.
///
/// All four series have the same length as the input record.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseHistory {
    pub period: f64,
    /// Relative displacement.
    pub displacement: Vec<f64>,
    /// Relative velocity.
    pub velocity: Vec<f64>,
    /// Relative acceleration.
    pub acceleration: Vec<f64>,
    /// Relative acceleration plus ground acceleration.
    pub total_acceleration: Vec<f64>,
}

impl ResponseHistory {
    pub(crate) fn zeros(period: f64, len: usize) -> Self {
        Self {
            period,
            displacement: vec![0.0; len],
            velocity: vec![0.0; len],
            acceleration: vec![0.0; len],
            total_acceleration: vec![0.0; len],
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.displacement.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.displacement.is_empty()
    }

    pub fn peak_displacement(&self) -> f64 {
        peak_abs(&self.displacement)
    }

    pub fn peak_velocity(&self) -> f64 {
        peak_abs(&self.velocity)
    }

    pub fn peak_total_acceleration(&self) -> f64 {
        peak_abs(&self.total_acceleration)
    }

    /// Circular natural frequency `2π / T`.
    #[inline]
    pub fn circular_frequency(&self) -> f64 {
        std::f64::consts::TAU / self.period
    }
}
