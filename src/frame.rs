//! Native hand tracking buffer decoding
//!
//! The tracking runtime reports both hands in one flat float buffer. Each
//! half starts with a tracked flag, followed by 26 joint slots of seven
//! floats (`px py pz rw rx ry rz`), then palm facing and gesture codes.
//! Decoding converts the runtime's coordinates into the application space
//! of the active head tracking mode.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::math::{EulerRot, Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StabilizerError};
use crate::joint::{HandSide, JointId};

/// Total floats in a native hand buffer
pub const HAND_DATA_LENGTH: usize = 374;
/// Joint slots per hand, including unnamed ones
pub const HAND_JOINT_COUNT: usize = 26;
/// Floats per joint slot
pub const JOINT_STRIDE: usize = 7;
/// Offset of the palm facing code within a hand half
pub const PALM_FACING_OFFSET: usize = 185;
/// Offset of the gesture code within a hand half
pub const GESTURE_OFFSET: usize = 186;

const HAND_HALF_LENGTH: usize = HAND_DATA_LENGTH / 2;

/// Relative tolerance for flag and code comparisons
const CODE_TOLERANCE: f32 = 1e-6;

const CENTER_EYE_TO_HEAD: Vec3 = Vec3::new(0.0, 0.0, -0.1);
const HEAD_TO_LEFT_SHOULDER: Vec3 = Vec3::new(-0.15, -0.3, 0.0);
const HEAD_TO_RIGHT_SHOULDER: Vec3 = Vec3::new(0.15, -0.3, 0.0);

/// Head tracking capability of the connected glasses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HeadTrackingCapability {
    /// Rotation only; hands are reported relative to the camera
    #[serde(rename = "3dof")]
    ThreeDoF,
    /// Rotation and position; hands are reported in world space
    #[default]
    #[serde(rename = "6dof")]
    SixDoF,
}

/// Coordinate space used to decode joint poses
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackingSpace {
    SixDoF,
    /// Camera-relative samples, placed using the current head pose
    ThreeDoF { head_position: Vec3, head_rotation: Quat },
}

impl TrackingSpace {
    pub fn capability(&self) -> HeadTrackingCapability {
        match self {
            TrackingSpace::SixDoF => HeadTrackingCapability::SixDoF,
            TrackingSpace::ThreeDoF { .. } => HeadTrackingCapability::ThreeDoF,
        }
    }
}

/// Equality within a relative tolerance, for codes the runtime writes as floats
fn approximately(a: f32, b: f32) -> bool {
    (a - b).abs() <= (CODE_TOLERANCE * a.abs().max(b.abs())).max(f32::EPSILON * 8.0)
}

/// Recognized hand gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gesture {
    #[default]
    None,
    Pinch,
    Fist,
}

impl Gesture {
    /// Decode a gesture code; unknown codes map to `None`
    pub fn from_raw(code: f32) -> Self {
        if approximately(code, 1.0) {
            Gesture::Pinch
        } else if approximately(code, 2.0) {
            Gesture::Fist
        } else {
            Gesture::None
        }
    }
}

/// Direction the palm faces relative to gravity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PalmFacing {
    #[default]
    Down,
    Up,
}

impl PalmFacing {
    pub fn from_raw(code: f32) -> Self {
        if approximately(code, 1.0) {
            PalmFacing::Up
        } else {
            PalmFacing::Down
        }
    }
}

/// Position and orientation of one joint
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JointPose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for JointPose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// All named joints of one tracked hand
#[derive(Debug, Clone, PartialEq)]
pub struct HandFrame {
    pub side: HandSide,
    pub joints: [JointPose; JointId::COUNT],
    pub gesture: Gesture,
    pub palm_facing: PalmFacing,
}

impl HandFrame {
    #[inline]
    pub fn joint(&self, joint: JointId) -> &JointPose {
        &self.joints[joint.index()]
    }

    #[inline]
    pub fn joint_mut(&mut self, joint: JointId) -> &mut JointPose {
        &mut self.joints[joint.index()]
    }

    /// Wrist pose, used as the hand root
    pub fn root(&self) -> JointPose {
        *self.joint(JointId::Wrist)
    }
}

/// One native hand tracking buffer
#[derive(Debug, Clone, PartialEq)]
pub struct RawHandData {
    values: Vec<f32>,
}

impl Default for RawHandData {
    fn default() -> Self {
        Self {
            values: vec![0.0; HAND_DATA_LENGTH],
        }
    }
}

impl RawHandData {
    /// Copy a buffer, which must hold exactly [`HAND_DATA_LENGTH`] floats
    pub fn from_slice(values: &[f32]) -> Result<Self> {
        if values.len() != HAND_DATA_LENGTH {
            return Err(StabilizerError::FrameLength {
                expected: HAND_DATA_LENGTH,
                found: values.len(),
            });
        }
        Ok(Self {
            values: values.to_vec(),
        })
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    /// Mutable access for the producer filling the buffer
    pub fn as_mut_slice(&mut self) -> &mut [f32] {
        &mut self.values
    }

    fn half(&self, side: HandSide) -> &[f32] {
        let base = side.index() * HAND_HALF_LENGTH;
        &self.values[base..base + HAND_HALF_LENGTH]
    }

    pub fn is_tracked(&self, side: HandSide) -> bool {
        approximately(self.half(side)[0], 1.0)
    }

    pub fn gesture(&self, side: HandSide) -> Gesture {
        Gesture::from_raw(self.half(side)[GESTURE_OFFSET])
    }

    pub fn palm_facing(&self, side: HandSide) -> PalmFacing {
        PalmFacing::from_raw(self.half(side)[PALM_FACING_OFFSET])
    }

    /// Decode one hand, `None` when the runtime is not tracking it
    pub fn decode(&self, side: HandSide, space: TrackingSpace) -> Option<HandFrame> {
        if !self.is_tracked(side) {
            return None;
        }

        let half = self.half(side);
        let joints = std::array::from_fn(|i| {
            let offset = 1 + i * JOINT_STRIDE;
            let s = &half[offset..offset + JOINT_STRIDE];
            convert_joint(side, space, [s[0], s[1], s[2]], [s[3], s[4], s[5], s[6]])
        });

        Some(HandFrame {
            side,
            joints,
            gesture: self.gesture(side),
            palm_facing: self.palm_facing(side),
        })
    }
}

/// Map a runtime joint sample into application space
///
/// `position` is `[x, y, z]`, `rotation` is `[w, x, y, z]` as stored in the
/// native buffer.
pub fn convert_joint(
    side: HandSide,
    space: TrackingSpace,
    position: [f32; 3],
    rotation: [f32; 4],
) -> JointPose {
    let [px, py, pz] = position;
    let [rw, rx, ry, rz] = rotation;

    match space {
        TrackingSpace::SixDoF => JointPose {
            position: Vec3::new(-px, pz, -py),
            rotation: Quat::from_xyzw(rx, -rz, ry, rw) * joint_offset(side, HeadTrackingCapability::SixDoF),
        },
        TrackingSpace::ThreeDoF {
            head_position,
            head_rotation,
        } => {
            let local_position = Vec3::new(px, -py, pz);
            let local_rotation = Quat::from_xyzw(-rx, ry, -rz, rw);
            JointPose {
                position: head_position + head_rotation * local_position,
                rotation: head_rotation
                    * local_rotation
                    * joint_offset(side, HeadTrackingCapability::ThreeDoF),
            }
        }
    }
}

/// Fixed rotation aligning runtime joint axes with the application's joint axes
pub fn joint_offset(side: HandSide, capability: HeadTrackingCapability) -> Quat {
    match (capability, side) {
        (HeadTrackingCapability::SixDoF, HandSide::Left) => {
            Quat::from_axis_angle(Vec3::Z, FRAC_PI_2) * Quat::from_axis_angle(Vec3::X, -FRAC_PI_2)
        }
        (HeadTrackingCapability::SixDoF, HandSide::Right) => {
            Quat::from_axis_angle(Vec3::Z, -FRAC_PI_2) * Quat::from_axis_angle(Vec3::X, -FRAC_PI_2)
        }
        (HeadTrackingCapability::ThreeDoF, HandSide::Left) => {
            Quat::from_axis_angle(Vec3::Z, PI) * Quat::from_axis_angle(Vec3::Y, -FRAC_PI_2)
        }
        (HeadTrackingCapability::ThreeDoF, HandSide::Right) => {
            Quat::from_axis_angle(Vec3::Z, PI) * Quat::from_axis_angle(Vec3::Y, FRAC_PI_2)
        }
    }
}

/// Rotation whose +Z axis points along `forward`, keeping +Y up
pub fn look_rotation(forward: Vec3) -> Quat {
    let Some(z) = forward.try_normalize() else {
        return Quat::IDENTITY;
    };
    let Some(x) = Vec3::Y.cross(z).try_normalize() else {
        return Quat::from_rotation_arc(Vec3::Z, z);
    };
    let y = z.cross(x);
    Quat::from_mat3(&Mat3::from_cols(x, y, z))
}

/// Interaction poses derived from a hand frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandInteraction {
    pub pinch_position: Vec3,
    pub aim_position: Vec3,
    pub aim_rotation: Quat,
    pub poke_position: Vec3,
    pub poke_rotation: Quat,
    /// Pinch held
    pub select: bool,
    pub gesture: Gesture,
    pub palm_facing: PalmFacing,
}

impl HandInteraction {
    /// Derive interaction poses; `head` is the center eye pose if known
    ///
    /// Aim rays start at the palm and point away from an estimated shoulder.
    /// Without a head pose the aim direction falls back to +Z.
    pub fn from_frame(frame: &HandFrame, head: Option<(Vec3, Quat)>) -> Self {
        let palm = frame.joint(JointId::Palm).position;
        let index_tip = frame.joint(JointId::IndexTip).position;
        let index_distal = frame.joint(JointId::IndexDistal).position;

        let aim_direction = match head {
            Some((eye_position, eye_rotation)) => {
                let head_position = eye_position + eye_rotation * CENTER_EYE_TO_HEAD;
                let (yaw, _, _) = eye_rotation.to_euler(EulerRot::YXZ);
                let shoulder_offset = match frame.side {
                    HandSide::Left => HEAD_TO_LEFT_SHOULDER,
                    HandSide::Right => HEAD_TO_RIGHT_SHOULDER,
                };
                let shoulder = head_position + Quat::from_rotation_y(yaw) * shoulder_offset;
                (palm - shoulder).normalize_or_zero()
            }
            None => Vec3::Z,
        };

        Self {
            pinch_position: frame.joint(JointId::ThumbTip).position,
            aim_position: palm,
            aim_rotation: look_rotation(aim_direction),
            poke_position: index_tip,
            poke_rotation: look_rotation(index_tip - index_distal),
            select: frame.gesture == Gesture::Pinch,
            gesture: frame.gesture,
            palm_facing: frame.palm_facing,
        }
    }
}
