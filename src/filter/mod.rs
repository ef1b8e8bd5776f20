//! Adaptive hand joint filtering
//!
//! One Euro channels, the profile parameter tables and the per-joint
//! stabilizer built from them.

mod low_pass;
mod one_euro;
mod params;
mod stabilizer;

pub use low_pass::{smoothing_factor, LowPassFilter};
pub use one_euro::OneEuroFilter;
pub use params::{FilterParams, FilterProfile, DERIVATIVE_CUTOFF_HZ, NOMINAL_FREQUENCY_HZ};
pub use stabilizer::{normalize_or_identity, JointFilter, JointStabilizer, SharedStabilizer};
