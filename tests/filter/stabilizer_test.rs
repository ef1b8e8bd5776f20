use bevy::math::{Quat, Vec3};
use viture_hand_stabilizer::{FilterProfile, HandSide, JointId, JointStabilizer};

use crate::test_utils::{constants::ROTATION_TOLERANCE, filter_x_trajectory, sample_time, step_trajectory};

#[test]
fn test_disabled_passthrough_creates_no_state() {
    let mut stabilizer = JointStabilizer::new(FilterProfile::Disabled);
    let position = Vec3::new(5.0, -2.0, 0.25);
    let rotation = Quat::from_xyzw(0.1, 0.2, 0.3, 0.9); // deliberately not unit

    let (p, r) = stabilizer.filter_joint(HandSide::Left, JointId::IndexTip, position, rotation, 0.0);
    assert_eq!(p, position);
    assert_eq!(r, rotation);
    assert_eq!(stabilizer.tracked_joint_count(), 0);

    // Enabling later starts from a cold filter, not from the passthrough sample
    stabilizer.set_profile(FilterProfile::Responsive);
    let next = Vec3::new(1.0, 1.0, 1.0);
    let (p, _) = stabilizer.filter_joint(HandSide::Left, JointId::IndexTip, next, Quat::IDENTITY, sample_time(1));
    assert_eq!(p, next);
}

#[test]
fn test_cold_start_identity() {
    for profile in [FilterProfile::Responsive, FilterProfile::Stable] {
        let mut stabilizer = JointStabilizer::new(profile);
        for (i, joint) in JointId::ALL.into_iter().enumerate() {
            let position = Vec3::new(0.1 * i as f32, -0.3, 0.45);
            let rotation = Quat::from_rotation_y(0.1 * i as f32);

            let (p, r) = stabilizer.filter_joint(HandSide::Right, joint, position, rotation, 0.0);
            assert_eq!(p, position, "{joint:?}");
            assert!((r - rotation).length() < ROTATION_TOLERANCE, "{joint:?}");
        }
    }
}

#[test]
fn test_converges_to_constant() {
    let target = 0.5;
    let trajectory: Vec<f32> = (0..20).map(|i| if i == 0 { 0.0 } else { target }).collect();

    for profile in [FilterProfile::Responsive, FilterProfile::Stable] {
        for joint in JointId::ALL {
            let output = filter_x_trajectory(profile, joint, &trajectory);
            let errors: Vec<f32> = output.iter().map(|x| (x - target).abs()).collect();

            for pair in errors.windows(2) {
                assert!(pair[1] <= pair[0], "{profile:?} {joint:?}: {errors:?}");
            }
            assert!(errors[15] < 1e-3, "{profile:?} {joint:?}: {errors:?}");
        }
    }
}

#[test]
fn test_tip_step_response() {
    let output = filter_x_trajectory(FilterProfile::Responsive, JointId::IndexTip, &step_trajectory(12));

    assert_eq!(output[0], 0.0);
    for pair in output.windows(2) {
        assert!(pair[1] >= pair[0], "not monotonic: {output:?}");
    }
    for x in &output {
        assert!(*x <= 1.0, "overshoot: {output:?}");
    }
    assert!(output[1] > 0.5 && output[1] < 1.0);
    assert!((1.0 - output[10]).abs() < 1e-3, "{output:?}");
}

#[test]
fn test_rotation_stays_unit_length() {
    let mut stabilizer = JointStabilizer::new(FilterProfile::Stable);
    let axis = Vec3::new(1.0, 2.0, -0.5).normalize();

    for i in 0..200 {
        let angle = (i as f32 * 0.37).sin() * 2.5;
        let rotation = Quat::from_axis_angle(axis, angle) * Quat::from_rotation_x(i as f32 * 0.05);
        let (_, r) = stabilizer.filter_joint(HandSide::Left, JointId::Wrist, Vec3::ZERO, rotation, sample_time(i));
        assert!((r.length() - 1.0).abs() < ROTATION_TOLERANCE, "sample {i}: {r:?}");
    }
}

#[test]
fn test_hands_are_independent() {
    let mut stabilizer = JointStabilizer::new(FilterProfile::Responsive);
    let joint = JointId::MiddleTip;

    stabilizer.filter_joint(HandSide::Left, joint, Vec3::ZERO, Quat::IDENTITY, sample_time(0));
    stabilizer.filter_joint(HandSide::Left, joint, Vec3::ONE, Quat::IDENTITY, sample_time(1));

    // First right-hand sample is a cold start despite left-hand history
    let (p, _) = stabilizer.filter_joint(HandSide::Right, joint, Vec3::ONE, Quat::IDENTITY, sample_time(1));
    assert_eq!(p, Vec3::ONE);
}

#[test]
fn test_deterministic() {
    let trajectory: Vec<f32> = (0..50).map(|i| (i as f32 * 0.2).sin()).collect();
    let a = filter_x_trajectory(FilterProfile::Responsive, JointId::Palm, &trajectory);
    let b = filter_x_trajectory(FilterProfile::Responsive, JointId::Palm, &trajectory);
    assert_eq!(a, b);
}
