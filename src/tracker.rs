//! Per-frame hand tracking pipeline
//!
//! Decodes a native buffer, stabilizes every joint of each tracked hand and
//! derives the interaction poses consumers drive input devices with.

use bevy::math::{Quat, Vec3};

use tracing::info;

use crate::config::HandTrackingSettings;
use crate::filter::{FilterProfile, JointStabilizer};
use crate::frame::{HandFrame, HandInteraction, HeadTrackingCapability, RawHandData, TrackingSpace};
use crate::joint::{HandSide, JointId};

/// A tracked, stabilized hand
#[derive(Debug, Clone, PartialEq)]
pub struct TrackedHand {
    pub frame: HandFrame,
    pub interaction: HandInteraction,
}

/// Result of one tracking tick; `None` for hands the runtime lost
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HandsUpdate {
    pub left: Option<TrackedHand>,
    pub right: Option<TrackedHand>,
}

impl HandsUpdate {
    pub fn hand(&self, side: HandSide) -> Option<&TrackedHand> {
        match side {
            HandSide::Left => self.left.as_ref(),
            HandSide::Right => self.right.as_ref(),
        }
    }
}

/// Owns the stabilizer for one hand tracking session
///
/// A stopped tracker reports no hands and leaves filter state untouched.
#[derive(Debug)]
pub struct HandTracker {
    stabilizer: JointStabilizer,
    capability: HeadTrackingCapability,
    active: bool,
}

impl Default for HandTracker {
    fn default() -> Self {
        Self::new(FilterProfile::default())
    }
}

impl HandTracker {
    /// Running tracker for 6DoF glasses
    pub fn new(profile: FilterProfile) -> Self {
        Self {
            stabilizer: JointStabilizer::new(profile),
            capability: HeadTrackingCapability::SixDoF,
            active: true,
        }
    }

    /// Tracker configured from persisted settings
    ///
    /// Stays stopped until [`HandTracker::start`] unless the settings ask
    /// for activation on startup.
    pub fn from_settings(settings: &HandTrackingSettings) -> Self {
        Self {
            stabilizer: JointStabilizer::new(settings.filter_profile),
            capability: settings.head_tracking,
            active: settings.activate_on_startup,
        }
    }

    pub fn start(&mut self) {
        if !self.active {
            info!("Hand tracking started");
            self.active = true;
        }
    }

    pub fn stop(&mut self) {
        if self.active {
            info!("Hand tracking stopped");
            self.active = false;
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn capability(&self) -> HeadTrackingCapability {
        self.capability
    }

    /// Decoding space for the current head pose
    pub fn tracking_space(&self, head_position: Vec3, head_rotation: Quat) -> TrackingSpace {
        match self.capability {
            HeadTrackingCapability::SixDoF => TrackingSpace::SixDoF,
            HeadTrackingCapability::ThreeDoF => TrackingSpace::ThreeDoF {
                head_position,
                head_rotation,
            },
        }
    }

    pub fn set_profile(&mut self, profile: FilterProfile) {
        self.stabilizer.set_profile(profile);
    }

    pub fn profile(&self) -> FilterProfile {
        self.stabilizer.profile()
    }

    pub fn stabilizer(&self) -> &JointStabilizer {
        &self.stabilizer
    }

    /// Process one buffer sampled at `timestamp` seconds
    ///
    /// Lost hands keep their filter history, so re-acquisition continues
    /// from the last filtered pose.
    pub fn update(&mut self, raw: &RawHandData, timestamp: f64, space: TrackingSpace) -> HandsUpdate {
        let head = match space {
            TrackingSpace::ThreeDoF {
                head_position,
                head_rotation,
            } => Some((head_position, head_rotation)),
            TrackingSpace::SixDoF => None,
        };

        HandsUpdate {
            left: self.track(raw, HandSide::Left, timestamp, space, head),
            right: self.track(raw, HandSide::Right, timestamp, space, head),
        }
    }

    /// Process one buffer, picking the decoding space from the glasses'
    /// head tracking capability
    pub fn update_from_head(
        &mut self,
        raw: &RawHandData,
        timestamp: f64,
        head_position: Vec3,
        head_rotation: Quat,
    ) -> HandsUpdate {
        let space = self.tracking_space(head_position, head_rotation);
        self.update_with_head(raw, timestamp, space, (head_position, head_rotation))
    }

    /// Like [`HandTracker::update`], with a head pose for aim estimation in 6DoF
    pub fn update_with_head(
        &mut self,
        raw: &RawHandData,
        timestamp: f64,
        space: TrackingSpace,
        head: (Vec3, Quat),
    ) -> HandsUpdate {
        HandsUpdate {
            left: self.track(raw, HandSide::Left, timestamp, space, Some(head)),
            right: self.track(raw, HandSide::Right, timestamp, space, Some(head)),
        }
    }

    fn track(
        &mut self,
        raw: &RawHandData,
        side: HandSide,
        timestamp: f64,
        space: TrackingSpace,
        head: Option<(Vec3, Quat)>,
    ) -> Option<TrackedHand> {
        if !self.active {
            return None;
        }
        let mut frame = raw.decode(side, space)?;

        for joint in JointId::ALL {
            let pose = frame.joint_mut(joint);
            let (position, rotation) =
                self.stabilizer
                    .filter_joint(side, joint, pose.position, pose.rotation, timestamp);
            pose.position = position;
            pose.rotation = rotation;
        }

        let interaction = HandInteraction::from_frame(&frame, head);
        Some(TrackedHand { frame, interaction })
    }
}
