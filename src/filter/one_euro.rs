//! One Euro filter - adaptive low-pass for a single scalar channel
//!
//! Smooth when the signal is slow (less jitter), responsive when it moves
//! fast (less lag). The cutoff is `min_cutoff + beta * |velocity|`, with the
//! velocity itself low-passed at a fixed 1 Hz.

use super::low_pass::{smoothing_factor, LowPassFilter};
use super::params::{FilterParams, DERIVATIVE_CUTOFF_HZ};

/// Adaptive low-pass filter state for one channel
#[derive(Debug, Clone)]
pub struct OneEuroFilter {
    params: FilterParams,
    /// Fixed sample rate; when set, timestamps only order samples
    frequency: Option<f32>,
    value: LowPassFilter,
    derivative: LowPassFilter,
    last_timestamp: Option<f64>,
}

impl OneEuroFilter {
    pub fn new(params: FilterParams, frequency: Option<f32>) -> Self {
        Self {
            params,
            frequency: frequency.filter(|f| *f > 0.0),
            value: LowPassFilter::new(),
            derivative: LowPassFilter::new(),
            last_timestamp: None,
        }
    }

    /// Replace tuning without touching filter history
    #[inline]
    pub fn set_params(&mut self, params: FilterParams) {
        self.params = params;
    }

    #[inline]
    pub fn params(&self) -> FilterParams {
        self.params
    }

    /// Last filtered value, `None` before the first sample
    pub fn last_value(&self) -> Option<f32> {
        self.value.is_initialized().then(|| self.value.last())
    }

    /// Filter `value` observed at `timestamp` seconds
    pub fn filter(&mut self, value: f32, timestamp: f64) -> f32 {
        let Some(last_timestamp) = self.last_timestamp.replace(timestamp) else {
            return self.value.apply(value, 1.0);
        };

        let dt = (timestamp - last_timestamp) as f32;
        let (rate, interval) = match self.frequency {
            Some(frequency) => (frequency, 1.0 / frequency),
            None if dt > 0.0 => (1.0 / dt, dt),
            None => (0.0, 0.0),
        };

        if interval <= 0.0 {
            // No usable sample spacing: pass through, keep the velocity estimate
            return self.value.apply(value, 1.0);
        }

        let dx = (value - self.value.last()) / interval;
        let edx = self
            .derivative
            .apply(dx, smoothing_factor(rate, DERIVATIVE_CUTOFF_HZ));
        let cutoff = self.params.min_cutoff + self.params.beta * edx.abs();

        self.value.apply(value, smoothing_factor(rate, cutoff))
    }
}
