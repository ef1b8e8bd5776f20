use std::f32::consts::PI;

/// Smoothing factor of a first order low-pass at `cutoff` Hz sampled at `rate` Hz
///
/// A non-positive rate disables smoothing (alpha = 1).
#[inline]
pub fn smoothing_factor(rate: f32, cutoff: f32) -> f32 {
    if rate <= 0.0 {
        return 1.0;
    }
    let tau = 1.0 / (2.0 * PI * cutoff);
    let te = 1.0 / rate;
    1.0 / (1.0 + tau / te)
}

/// Exponential low-pass stage
#[derive(Debug, Clone, Default)]
pub struct LowPassFilter {
    last: f32,
    initialized: bool,
}

impl LowPassFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blend `value` into the filter; the first value is taken as-is
    pub fn apply(&mut self, value: f32, alpha: f32) -> f32 {
        if !self.initialized {
            self.last = value;
            self.initialized = true;
            return value;
        }

        self.last += alpha * (value - self.last);
        self.last
    }

    /// Last output, zero before the first sample
    #[inline]
    pub fn last(&self) -> f32 {
        self.last
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}
