//! Bevy integration
//!
//! Entities carrying a [`TrackedJoint`] and a [`RawJointSample`] get their
//! [`FilteredJointPose`] rewritten every `Update` while [`HandTrackingActive`]
//! is set. The filter profile follows the [`HandTrackingSettings`] resource.

use bevy::prelude::*;
use tracing::info;

use crate::config::HandTrackingSettings;
use crate::filter::JointStabilizer;
use crate::joint::{HandSide, JointId};

/// Stabilizer shared by all joint entities
#[derive(Resource, Default, Debug)]
pub struct HandStabilizer(pub JointStabilizer);

/// Whether joint samples are being stabilized; seeded from
/// [`HandTrackingSettings::activate_on_startup`]
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandTrackingActive(pub bool);

/// Identity of the joint an entity represents
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedJoint {
    pub side: HandSide,
    pub joint: JointId,
}

/// Latest unfiltered sample, written by the tracking source
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RawJointSample {
    pub position: Vec3,
    pub rotation: Quat,
    /// Seconds
    pub timestamp: f64,
}

/// Stabilized pose read by renderers and input devices
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct FilteredJointPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for FilteredJointPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Plugin wiring the stabilizer into the `Update` schedule
#[derive(Default)]
pub struct HandStabilizerPlugin {
    /// Settings to start with
    pub settings: HandTrackingSettings,
}

impl Plugin for HandStabilizerPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(self.settings.clone())
            .insert_resource(HandTrackingActive(self.settings.activate_on_startup))
            .init_resource::<HandStabilizer>()
            .add_systems(
                Update,
                (
                    apply_filter_profile.run_if(resource_changed::<HandTrackingSettings>),
                    stabilize_joints.run_if(hand_tracking_active),
                )
                    .chain(),
            );
    }
}

fn hand_tracking_active(active: Res<HandTrackingActive>) -> bool {
    active.0
}

/// Push the configured profile into the stabilizer
pub fn apply_filter_profile(
    settings: Res<HandTrackingSettings>,
    mut stabilizer: ResMut<HandStabilizer>,
) {
    if stabilizer.0.profile() != settings.filter_profile {
        info!(profile = ?settings.filter_profile, "Applying hand filter profile");
        stabilizer.0.set_profile(settings.filter_profile);
    }
}

/// Filter every changed raw sample into its entity's filtered pose
pub fn stabilize_joints(
    mut stabilizer: ResMut<HandStabilizer>,
    mut joints: Query<(&TrackedJoint, &RawJointSample, &mut FilteredJointPose), Changed<RawJointSample>>,
) {
    for (tracked, sample, mut pose) in &mut joints {
        let (position, rotation) = stabilizer.0.filter_joint(
            tracked.side,
            tracked.joint,
            sample.position,
            sample.rotation,
            sample.timestamp,
        );
        pose.position = position;
        pose.rotation = rotation;
    }
}
