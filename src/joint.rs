//! Hand and joint identities
//!
//! Joint identifiers follow the slot order of the native hand tracking
//! runtime, so `JointId as usize` is both the registry index and the slot
//! index inside a raw hand buffer.

use serde::{Deserialize, Serialize};

/// Which hand a sample belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    /// Both sides, in registry order
    pub const ALL: [HandSide; 2] = [HandSide::Left, HandSide::Right];

    /// Registry index of this side
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            HandSide::Left => 0,
            HandSide::Right => 1,
        }
    }
}

/// Hand joints reported by the tracking runtime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum JointId {
    ThumbTip = 0,
    IndexTip = 1,
    MiddleTip = 2,
    RingTip = 3,
    LittleTip = 4,
    Wrist = 5,
    ThumbProximal = 6,
    ThumbDistal = 7,
    IndexProximal = 8,
    IndexIntermediate = 9,
    IndexDistal = 10,
    MiddleProximal = 11,
    MiddleIntermediate = 12,
    MiddleDistal = 13,
    RingProximal = 14,
    RingIntermediate = 15,
    RingDistal = 16,
    LittleProximal = 17,
    LittleIntermediate = 18,
    LittleDistal = 19,
    Palm = 20,
}

impl JointId {
    /// Number of named joints
    pub const COUNT: usize = 21;

    /// All joints in slot order
    pub const ALL: [JointId; JointId::COUNT] = [
        JointId::ThumbTip,
        JointId::IndexTip,
        JointId::MiddleTip,
        JointId::RingTip,
        JointId::LittleTip,
        JointId::Wrist,
        JointId::ThumbProximal,
        JointId::ThumbDistal,
        JointId::IndexProximal,
        JointId::IndexIntermediate,
        JointId::IndexDistal,
        JointId::MiddleProximal,
        JointId::MiddleIntermediate,
        JointId::MiddleDistal,
        JointId::RingProximal,
        JointId::RingIntermediate,
        JointId::RingDistal,
        JointId::LittleProximal,
        JointId::LittleIntermediate,
        JointId::LittleDistal,
        JointId::Palm,
    ];

    /// Slot index of this joint
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Joint for a slot index, `None` for unnamed slots
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Anatomical class used to pick filter parameters
    #[inline]
    pub fn level(self) -> JointLevel {
        JOINT_LEVELS[self.index()]
    }
}

/// Coarse anatomical grouping of a joint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JointLevel {
    Wrist,
    Palm,
    Proximal,
    Intermediate,
    Distal,
    Tip,
}

// Indexed by `JointId::index`. Proximal doubles as the fallback class.
const JOINT_LEVELS: [JointLevel; JointId::COUNT] = [
    JointLevel::Tip,          // ThumbTip
    JointLevel::Tip,          // IndexTip
    JointLevel::Tip,          // MiddleTip
    JointLevel::Tip,          // RingTip
    JointLevel::Tip,          // LittleTip
    JointLevel::Wrist,        // Wrist
    JointLevel::Proximal,     // ThumbProximal
    JointLevel::Distal,       // ThumbDistal
    JointLevel::Proximal,     // IndexProximal
    JointLevel::Intermediate, // IndexIntermediate
    JointLevel::Distal,       // IndexDistal
    JointLevel::Proximal,     // MiddleProximal
    JointLevel::Intermediate, // MiddleIntermediate
    JointLevel::Distal,       // MiddleDistal
    JointLevel::Proximal,     // RingProximal
    JointLevel::Intermediate, // RingIntermediate
    JointLevel::Distal,       // RingDistal
    JointLevel::Proximal,     // LittleProximal
    JointLevel::Intermediate, // LittleIntermediate
    JointLevel::Distal,       // LittleDistal
    JointLevel::Palm,         // Palm
];
