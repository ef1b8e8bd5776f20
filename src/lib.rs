//! VITURE Hand Joint Stabilizer
//!
//! Adaptive One Euro filtering for VITURE hand tracking data, together with
//! native buffer decoding, interaction pose derivation, persisted settings,
//! sample replay and a Bevy plugin.

pub mod config;
pub mod error;
pub mod filter;
pub mod frame;
pub mod joint;
pub mod plugin;
pub mod replay;
pub mod tracker;

// Re-export commonly used types
pub use config::HandTrackingSettings;
pub use error::{Result, StabilizerError};
pub use filter::{FilterParams, FilterProfile, JointStabilizer, SharedStabilizer};
pub use frame::{HandFrame, HandInteraction, HeadTrackingCapability, RawHandData, TrackingSpace};
pub use joint::{HandSide, JointId, JointLevel};
pub use plugin::HandStabilizerPlugin;
pub use tracker::{HandTracker, HandsUpdate, TrackedHand};
