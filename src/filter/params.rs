//! Filter profiles and their per-joint-class parameter tables

use serde::{Deserialize, Serialize};

use crate::joint::{JointId, JointLevel};

/// Nominal sampling frequency of the hand tracking runtime (Hz)
pub const NOMINAL_FREQUENCY_HZ: f32 = 75.0;

/// Cutoff of the derivative smoothing stage (Hz)
pub const DERIVATIVE_CUTOFF_HZ: f32 = 1.0;

/// Global filter aggressiveness
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterProfile {
    /// Raw tracking data is passed through untouched
    #[default]
    Disabled,
    /// Lower latency, more visible jitter
    Responsive,
    /// Smoother output, higher latency
    Stable,
}

impl FilterProfile {
    /// Whether joints are filtered at all under this profile
    #[inline]
    pub fn is_enabled(self) -> bool {
        self != FilterProfile::Disabled
    }
}

/// One-Euro tuning for a single channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterParams {
    /// Cutoff frequency at rest (Hz)
    pub min_cutoff: f32,
    /// How strongly speed raises the cutoff
    pub beta: f32,
}

impl FilterParams {
    /// Parameters that leave the signal effectively unfiltered
    pub const PASSTHROUGH: FilterParams = FilterParams::new(1000.0, 0.0);

    pub const fn new(min_cutoff: f32, beta: f32) -> Self {
        Self { min_cutoff, beta }
    }

    /// Table lookup for a profile and joint class
    pub const fn for_level(profile: FilterProfile, level: JointLevel) -> Self {
        match profile {
            FilterProfile::Responsive => match level {
                JointLevel::Wrist => Self::new(1.0, 1.2),
                JointLevel::Palm => Self::new(1.4, 1.6),
                JointLevel::Proximal => Self::new(1.8, 1.9),
                JointLevel::Intermediate => Self::new(1.9, 2.1),
                JointLevel::Distal => Self::new(2.0, 2.2),
                JointLevel::Tip => Self::new(2.3, 2.4),
            },
            FilterProfile::Stable => match level {
                JointLevel::Wrist => Self::new(0.5, 0.9),
                JointLevel::Palm => Self::new(0.8, 1.0),
                JointLevel::Proximal => Self::new(0.9, 1.1),
                JointLevel::Intermediate => Self::new(1.0, 1.2),
                JointLevel::Distal => Self::new(1.2, 1.3),
                JointLevel::Tip => Self::new(1.5, 1.4),
            },
            FilterProfile::Disabled => Self::PASSTHROUGH,
        }
    }

    /// Table lookup for a concrete joint
    #[inline]
    pub fn for_joint(profile: FilterProfile, joint: JointId) -> Self {
        Self::for_level(profile, joint.level())
    }
}
