//! Per-joint pose stabilization
//!
//! A [`JointStabilizer`] keeps one [`JointFilter`] per (hand, joint) slot,
//! created on the first sample seen while a filtering profile is active.
//! Each joint filter runs seven independent One Euro channels: position
//! x/y/z and rotation x/y/z/w.

use std::sync::Arc;

use bevy::math::{Quat, Vec3};
use parking_lot::{Mutex, MutexGuard};
use tracing::{debug, info};

use super::one_euro::OneEuroFilter;
use super::params::{FilterParams, FilterProfile, NOMINAL_FREQUENCY_HZ};
use crate::joint::{HandSide, JointId};

/// Seven-channel filter for one joint pose
#[derive(Debug, Clone)]
pub struct JointFilter {
    position: [OneEuroFilter; 3],
    rotation: [OneEuroFilter; 4],
}

impl JointFilter {
    pub fn new(params: FilterParams) -> Self {
        let channel = || OneEuroFilter::new(params, Some(NOMINAL_FREQUENCY_HZ));
        Self {
            position: std::array::from_fn(|_| channel()),
            rotation: std::array::from_fn(|_| channel()),
        }
    }

    pub fn set_params(&mut self, params: FilterParams) {
        for channel in self.position.iter_mut().chain(self.rotation.iter_mut()) {
            channel.set_params(params);
        }
    }

    pub fn filter(&mut self, position: Vec3, rotation: Quat, timestamp: f64) -> (Vec3, Quat) {
        let [px, py, pz] = &mut self.position;
        let filtered_position = Vec3::new(
            px.filter(position.x, timestamp),
            py.filter(position.y, timestamp),
            pz.filter(position.z, timestamp),
        );

        let [rx, ry, rz, rw] = &mut self.rotation;
        let filtered_rotation = Quat::from_xyzw(
            rx.filter(rotation.x, timestamp),
            ry.filter(rotation.y, timestamp),
            rz.filter(rotation.z, timestamp),
            rw.filter(rotation.w, timestamp),
        );

        (filtered_position, normalize_or_identity(filtered_rotation))
    }

    /// Last filtered pose, `None` until the first sample
    pub fn last_pose(&self) -> Option<(Vec3, Quat)> {
        let [px, py, pz] = &self.position;
        let [rx, ry, rz, rw] = &self.rotation;
        let position = Vec3::new(px.last_value()?, py.last_value()?, pz.last_value()?);
        let rotation = Quat::from_xyzw(
            rx.last_value()?,
            ry.last_value()?,
            rz.last_value()?,
            rw.last_value()?,
        );
        Some((position, normalize_or_identity(rotation)))
    }
}

/// Unit quaternion in the direction of `q`, identity when `q` is degenerate
pub fn normalize_or_identity(q: Quat) -> Quat {
    if q.length_squared() <= f32::EPSILON {
        Quat::IDENTITY
    } else {
        q.normalize()
    }
}

type Registry = [[Option<JointFilter>; JointId::COUNT]; 2];

/// Adaptive stabilizer for every joint of both hands
#[derive(Debug, Clone)]
pub struct JointStabilizer {
    profile: FilterProfile,
    filters: Registry,
}

impl Default for JointStabilizer {
    fn default() -> Self {
        Self::new(FilterProfile::default())
    }
}

impl JointStabilizer {
    pub fn new(profile: FilterProfile) -> Self {
        Self {
            profile,
            filters: std::array::from_fn(|_| std::array::from_fn(|_| None)),
        }
    }

    /// Active profile
    #[inline]
    pub fn profile(&self) -> FilterProfile {
        self.profile
    }

    /// Switch profile, retuning existing filters in place
    ///
    /// Filter history is kept, so output stays continuous across the switch.
    pub fn set_profile(&mut self, profile: FilterProfile) {
        if self.profile == profile {
            return;
        }

        info!(from = ?self.profile, to = ?profile, "Hand filter profile changed");
        self.profile = profile;

        for side in HandSide::ALL {
            for joint in JointId::ALL {
                if let Some(filter) = &mut self.filters[side.index()][joint.index()] {
                    filter.set_params(FilterParams::for_joint(profile, joint));
                }
            }
        }
    }

    /// Stabilize one joint sample
    ///
    /// Under [`FilterProfile::Disabled`] the sample is returned unchanged and
    /// no filter state is created. Samples with non-finite components are not
    /// fed to the filters; the last filtered pose is returned instead (or the
    /// sample itself when the joint has no history yet).
    pub fn filter_joint(
        &mut self,
        side: HandSide,
        joint: JointId,
        position: Vec3,
        rotation: Quat,
        timestamp: f64,
    ) -> (Vec3, Quat) {
        if !self.profile.is_enabled() {
            return (position, rotation);
        }

        let slot = &mut self.filters[side.index()][joint.index()];

        if !(position.is_finite() && rotation.is_finite() && timestamp.is_finite()) {
            debug!(?side, ?joint, "Rejected non-finite joint sample");
            return slot
                .as_ref()
                .and_then(JointFilter::last_pose)
                .unwrap_or((position, rotation));
        }

        let profile = self.profile;
        let filter = slot.get_or_insert_with(|| {
            debug!(?side, ?joint, ?profile, "Created joint filter");
            JointFilter::new(FilterParams::for_joint(profile, joint))
        });

        filter.filter(position, rotation, timestamp)
    }

    /// Whether filter state exists for a joint
    pub fn is_tracking(&self, side: HandSide, joint: JointId) -> bool {
        self.filters[side.index()][joint.index()].is_some()
    }

    /// Number of joints with filter state
    pub fn tracked_joint_count(&self) -> usize {
        self.filters.iter().flatten().filter(|f| f.is_some()).count()
    }

    /// Drop the filter history of one hand
    pub fn reset_hand(&mut self, side: HandSide) {
        self.filters[side.index()] = std::array::from_fn(|_| None);
    }

    /// Drop all filter history, keeping the active profile
    pub fn reset(&mut self) {
        for side in HandSide::ALL {
            self.reset_hand(side);
        }
    }
}

/// Cloneable, lock-guarded handle to a stabilizer
///
/// For hosts that deliver joint samples from more than one thread.
#[derive(Debug, Clone, Default)]
pub struct SharedStabilizer {
    inner: Arc<Mutex<JointStabilizer>>,
}

impl SharedStabilizer {
    pub fn new(stabilizer: JointStabilizer) -> Self {
        Self {
            inner: Arc::new(Mutex::new(stabilizer)),
        }
    }

    pub fn profile(&self) -> FilterProfile {
        self.inner.lock().profile()
    }

    pub fn set_profile(&self, profile: FilterProfile) {
        self.inner.lock().set_profile(profile);
    }

    pub fn filter_joint(
        &self,
        side: HandSide,
        joint: JointId,
        position: Vec3,
        rotation: Quat,
        timestamp: f64,
    ) -> (Vec3, Quat) {
        self.inner
            .lock()
            .filter_joint(side, joint, position, rotation, timestamp)
    }

    /// Exclusive access for batch updates, e.g. a whole hand frame
    pub fn lock(&self) -> MutexGuard<'_, JointStabilizer> {
        self.inner.lock()
    }
}
