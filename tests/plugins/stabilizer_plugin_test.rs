use bevy::prelude::*;
use viture_hand_stabilizer::plugin::{
    FilteredJointPose, HandStabilizer, HandTrackingActive, RawJointSample, TrackedJoint,
};
use viture_hand_stabilizer::{FilterProfile, HandSide, HandStabilizerPlugin, HandTrackingSettings, JointId};

use crate::test_utils::sample_time;

fn setup() -> (App, Entity) {
    setup_with(HandTrackingSettings::default())
}

fn setup_with(settings: HandTrackingSettings) -> (App, Entity) {
    let mut app = App::new();
    app.add_plugins(HandStabilizerPlugin { settings });

    let entity = app
        .world_mut()
        .spawn((
            TrackedJoint {
                side: HandSide::Left,
                joint: JointId::IndexTip,
            },
            RawJointSample {
                position: Vec3::new(0.0, 1.0, 0.0),
                rotation: Quat::IDENTITY,
                timestamp: sample_time(0),
            },
            FilteredJointPose::default(),
        ))
        .id();

    (app, entity)
}

fn filtered(app: &App, entity: Entity) -> FilteredJointPose {
    *app.world()
        .get::<FilteredJointPose>(entity)
        .expect("entity has a filtered pose")
}

fn push_sample(app: &mut App, entity: Entity, position: Vec3, timestamp: f64) {
    let mut sample = app
        .world_mut()
        .get_mut::<RawJointSample>(entity)
        .expect("entity has a raw sample");
    sample.position = position;
    sample.timestamp = timestamp;
}

#[test]
fn test_plugin_applies_settings_profile() {
    let (mut app, _) = setup();
    app.update();

    let stabilizer = app.world().resource::<HandStabilizer>();
    assert_eq!(stabilizer.0.profile(), FilterProfile::Responsive);
}

#[test]
fn test_first_sample_passes_through() {
    let (mut app, entity) = setup();
    app.update();

    let pose = filtered(&app, entity);
    assert_eq!(pose.position, Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(pose.rotation, Quat::IDENTITY);
}

#[test]
fn test_changed_samples_are_smoothed() {
    let (mut app, entity) = setup();
    app.update();

    push_sample(&mut app, entity, Vec3::new(1.0, 1.0, 0.0), sample_time(1));
    app.update();

    let pose = filtered(&app, entity);
    assert!(pose.position.x > 0.0 && pose.position.x < 1.0, "{:?}", pose.position);
    assert!(app
        .world()
        .resource::<HandStabilizer>()
        .0
        .is_tracking(HandSide::Left, JointId::IndexTip));
}

#[test]
fn test_settings_change_switches_profile() {
    let (mut app, entity) = setup();
    app.update();

    app.world_mut()
        .resource_mut::<HandTrackingSettings>()
        .filter_profile = FilterProfile::Disabled;
    push_sample(&mut app, entity, Vec3::new(1.0, 1.0, 0.0), sample_time(1));
    app.update();

    assert_eq!(
        app.world().resource::<HandStabilizer>().0.profile(),
        FilterProfile::Disabled
    );
    assert_eq!(filtered(&app, entity).position, Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_inactive_tracking_leaves_poses_until_started() {
    let (mut app, entity) = setup_with(HandTrackingSettings {
        activate_on_startup: false,
        ..HandTrackingSettings::default()
    });
    app.update();

    assert_eq!(filtered(&app, entity), FilteredJointPose::default());
    assert_eq!(app.world().resource::<HandStabilizer>().0.tracked_joint_count(), 0);

    app.world_mut().resource_mut::<HandTrackingActive>().0 = true;
    push_sample(&mut app, entity, Vec3::new(0.0, 2.0, 0.0), sample_time(1));
    app.update();

    assert_eq!(filtered(&app, entity).position, Vec3::new(0.0, 2.0, 0.0));
    assert_eq!(app.world().resource::<HandStabilizer>().0.tracked_joint_count(), 1);
}
