use bevy::hierarchy::HierarchyPlugin;
use bevy::prelude::*;
use bevy::transform::TransformPlugin;
use bevy_ribbit_rig::{
    BindState, FixedDt, JointEntities, RibbitRigEvent, RibbitRigPlugin, RibbitRigRoot,
    RigContext, StartRig,
};
use ribbit_rig_core::{
    Control, HierarchyEvaluator, LocalEvaluator, RigConfig, RigEvent, SkeletonDesc,
};
use ribbit_test_fixtures::rigs;

fn app_with(config: RigConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .add_plugins((TransformPlugin, HierarchyPlugin))
        .add_plugins(RibbitRigPlugin { config })
        .insert_resource(FixedDt(1.0 / 60.0));
    app
}

/// Spawns the frog fixture as a named entity hierarchy. Returns the entities
/// in description order.
fn spawn_frog(app: &mut App) -> Vec<Entity> {
    let desc: SkeletonDesc = rigs::load("frog").expect("frog fixture");
    let world = app.world_mut();
    let entities: Vec<Entity> = desc
        .joints
        .iter()
        .map(|j| {
            let tf = Transform {
                translation: j.translation,
                rotation: j.rotation,
                scale: j.scale,
            };
            world
                .spawn((Name::new(j.name.clone()), TransformBundle::from_transform(tf)))
                .id()
        })
        .collect();
    for (i, j) in desc.joints.iter().enumerate() {
        match &j.parent {
            Some(parent) => {
                let p = desc.joints.iter().position(|d| &d.name == parent).unwrap();
                world.entity_mut(entities[p]).add_child(entities[i]);
            }
            None => {
                world.entity_mut(entities[i]).insert(RibbitRigRoot);
            }
        }
    }
    entities
}

#[test]
fn plugin_inserts_resources() {
    let app = app_with(RigConfig::default());
    assert!(app.world().get_resource::<RigContext>().is_some());
    assert_eq!(*app.world().resource::<BindState>(), BindState::Pending);
}

#[test]
fn binds_named_hierarchy() {
    let mut app = app_with(RigConfig::default());
    let entities = spawn_frog(&mut app);
    app.update();

    assert_eq!(*app.world().resource::<BindState>(), BindState::Bound);
    let rig = app.world().resource::<RigContext>();
    let ctx = rig.0.as_ref().expect("rig bound");
    assert_eq!(ctx.skeleton().len(), entities.len());
    let index = app.world().resource::<JointEntities>();
    let head = ctx.joints().head;
    let head_entity = index.entity(head).unwrap();
    assert_eq!(
        app.world().get::<Name>(head_entity).unwrap().as_str(),
        "head"
    );
}

#[test]
fn forward_key_moves_body_and_bones_follow_propagation() {
    let mut app = app_with(RigConfig::default());
    let entities = spawn_frog(&mut app);
    app.update();

    app.world_mut().send_event(StartRig);
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyW);
    app.insert_resource(keys);
    for _ in 0..5 {
        app.update();
    }

    // The root entity mirrors the body joint.
    let root_tf = app.world().get::<Transform>(entities[0]).unwrap();
    assert!(root_tf.translation.z < 0.0);

    let rig = app.world().resource::<RigContext>();
    let ctx = rig.0.as_ref().unwrap();
    assert!(ctx.started());
    let expected = LocalEvaluator.evaluate(ctx.skeleton());
    for (i, m) in expected.iter().enumerate() {
        let got = ctx.bone_matrices().as_slice()[i];
        assert!(got.abs_diff_eq(*m, 1e-4), "bone {i}: {got:?} vs {m:?}");
    }
}

#[test]
fn start_is_reported_as_an_ecs_event() {
    let mut app = app_with(RigConfig::default());
    spawn_frog(&mut app);
    app.update();
    app.world_mut().send_event(StartRig);
    app.update();
    app.update();

    let events = app.world().resource::<Events<RibbitRigEvent>>();
    let mut reader = events.get_reader();
    let started = reader
        .read(events)
        .filter(|e| e.0 == RigEvent::Started)
        .count();
    assert_eq!(started, 1);
}

#[test]
fn start_and_keys_before_bind_are_not_lost() {
    let mut app = app_with(RigConfig::default());
    let mut keys = ButtonInput::<KeyCode>::default();
    keys.press(KeyCode::KeyW);
    // Held, but no longer "just pressed" by the time the rig binds.
    keys.clear();
    app.insert_resource(keys);
    app.world_mut().send_event(StartRig);
    app.update();
    app.update();
    assert_eq!(*app.world().resource::<BindState>(), BindState::Pending);

    spawn_frog(&mut app);
    app.update();

    let rig = app.world().resource::<RigContext>();
    let ctx = rig.0.as_ref().expect("rig bound");
    assert!(ctx.started());
    assert!(ctx.input().is_held(Control::MoveForward));
}

#[test]
fn missing_joint_requests_error_exit() {
    let mut config = RigConfig::default();
    config.joints.head = "skull".into();
    let mut app = app_with(config);
    spawn_frog(&mut app);
    app.update();

    assert_eq!(*app.world().resource::<BindState>(), BindState::Failed);
    assert!(app.world().resource::<RigContext>().0.is_none());
    let exits = app.world().resource::<Events<AppExit>>();
    let mut reader = exits.get_reader();
    assert!(reader.read(exits).any(|e| e.is_error()));
}
