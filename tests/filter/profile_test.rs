use bevy::math::{Quat, Vec3};
use viture_hand_stabilizer::filter::{OneEuroFilter, NOMINAL_FREQUENCY_HZ};
use viture_hand_stabilizer::{FilterParams, FilterProfile, HandSide, JointId, JointStabilizer};

use crate::test_utils::{filter_x_trajectory, sample_time, squared_error, step_trajectory};

#[test]
fn test_responsive_tracks_step_better_than_stable() {
    let input = step_trajectory(30);
    let responsive = filter_x_trajectory(FilterProfile::Responsive, JointId::IndexTip, &input);
    let stable = filter_x_trajectory(FilterProfile::Stable, JointId::IndexTip, &input);

    assert!(squared_error(&responsive, &input) < squared_error(&stable, &input));
    // Pointwise closer to the target after the step
    for i in 1..input.len() {
        assert!(responsive[i] >= stable[i], "sample {i}: {} < {}", responsive[i], stable[i]);
    }
}

#[test]
fn test_responsive_tracks_sinusoid_better_than_stable() {
    let input: Vec<f32> = (0..300)
        .map(|i| 0.05 * (2.0 * std::f64::consts::PI * sample_time(i)).sin() as f32)
        .collect();
    let responsive = filter_x_trajectory(FilterProfile::Responsive, JointId::ThumbTip, &input);
    let stable = filter_x_trajectory(FilterProfile::Stable, JointId::ThumbTip, &input);

    assert!(squared_error(&responsive, &input) < squared_error(&stable, &input));
}

#[test]
fn test_profile_switch_preserves_history() {
    let joint = JointId::IndexTip;
    let input = [0.0, 0.2, 0.5, 0.9, 1.0, 1.0];

    let mut stabilizer = JointStabilizer::new(FilterProfile::Responsive);
    let mut reference = OneEuroFilter::new(
        FilterParams::for_joint(FilterProfile::Responsive, joint),
        Some(NOMINAL_FREQUENCY_HZ),
    );

    for (i, &x) in input.iter().enumerate() {
        let (p, _) = stabilizer.filter_joint(HandSide::Left, joint, Vec3::new(x, 0.0, 0.0), Quat::IDENTITY, sample_time(i));
        assert_eq!(p.x, reference.filter(x, sample_time(i)));
    }

    stabilizer.set_profile(FilterProfile::Stable);
    reference.set_params(FilterParams::for_joint(FilterProfile::Stable, joint));

    let t = sample_time(input.len());
    let (p, _) = stabilizer.filter_joint(HandSide::Left, joint, Vec3::new(2.0, 0.0, 0.0), Quat::IDENTITY, t);
    assert_eq!(p.x, reference.filter(2.0, t));
    // A cold start would have returned the raw value
    assert!(p.x < 2.0);
    assert!(stabilizer.is_tracking(HandSide::Left, joint));
}

#[test]
fn test_set_profile_is_idempotent() {
    let input: Vec<f32> = (0..40).map(|i| (i as f32 * 0.3).cos()).collect();

    let run = |repeats: usize| {
        let mut stabilizer = JointStabilizer::new(FilterProfile::Responsive);
        let mut out = Vec::new();
        for (i, &x) in input.iter().enumerate() {
            if i == 20 {
                for _ in 0..repeats {
                    stabilizer.set_profile(FilterProfile::Stable);
                }
            }
            let (p, _) = stabilizer.filter_joint(HandSide::Right, JointId::Palm, Vec3::splat(x), Quat::IDENTITY, sample_time(i));
            out.push(p);
        }
        out
    };

    assert_eq!(run(1), run(2));
    assert_eq!(run(1), run(5));
}

#[test]
fn test_switch_to_disabled_keeps_state() {
    let mut stabilizer = JointStabilizer::new(FilterProfile::Stable);
    stabilizer.filter_joint(HandSide::Left, JointId::Wrist, Vec3::ZERO, Quat::IDENTITY, sample_time(0));

    stabilizer.set_profile(FilterProfile::Disabled);
    let raw = Vec3::new(3.0, 0.0, 0.0);
    let (p, _) = stabilizer.filter_joint(HandSide::Left, JointId::Wrist, raw, Quat::IDENTITY, sample_time(1));
    assert_eq!(p, raw);
    assert!(stabilizer.is_tracking(HandSide::Left, JointId::Wrist));

    // Re-enabling continues from the last filtered sample, not the passthrough one
    stabilizer.set_profile(FilterProfile::Stable);
    let (p, _) = stabilizer.filter_joint(HandSide::Left, JointId::Wrist, raw, Quat::IDENTITY, sample_time(2));
    assert!(p.x > 0.0 && p.x < 3.0);
}
