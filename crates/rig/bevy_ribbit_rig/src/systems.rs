use bevy::prelude::*;
use ribbit_rig_core::{AnimationContext, JointDesc, KeyEvent, SkeletonDesc};

use crate::components::{JointInverseBind, RibbitRigRoot};
use crate::resources::{
    BindState, FixedDt, JointEntities, RibbitRigEvent, RigContext, RigSettings, StartRig,
};

/// Builds a skeleton description by walking named descendants of `root`
/// depth-first. Unnamed entities end the walk for their subtree.
fn describe_hierarchy(
    root: Entity,
    joints: &Query<(&Name, &Transform, Option<&JointInverseBind>)>,
    children: &Query<&Children>,
) -> (SkeletonDesc, Vec<Entity>) {
    fn walk(
        e: Entity,
        parent: Option<&str>,
        joints: &Query<(&Name, &Transform, Option<&JointInverseBind>)>,
        children: &Query<&Children>,
        desc: &mut SkeletonDesc,
        entities: &mut Vec<Entity>,
    ) {
        let Ok((name, tf, inverse_bind)) = joints.get(e) else {
            return;
        };
        desc.joints.push(JointDesc {
            inverse_bind: inverse_bind.map(|ib| ib.0),
            ..JointDesc::new(name.as_str(), parent)
                .with_translation(tf.translation)
                .with_rotation(tf.rotation)
                .with_scale(tf.scale)
        });
        entities.push(e);
        if let Ok(cs) = children.get(e) {
            for &c in cs.iter() {
                walk(c, Some(name.as_str()), joints, children, desc, entities);
            }
        }
    }

    let mut desc = SkeletonDesc::default();
    let mut entities = Vec::new();
    walk(root, None, joints, children, &mut desc, &mut entities);
    (desc, entities)
}

/// Binds the first [`RibbitRigRoot`] hierarchy into an [`AnimationContext`].
/// A bind failure is fatal: it is logged and the app is asked to exit.
pub fn bind_rig_system(
    roots: Query<Entity, With<RibbitRigRoot>>,
    joints: Query<(&Name, &Transform, Option<&JointInverseBind>)>,
    children: Query<&Children>,
    settings: Res<RigSettings>,
    mut state: ResMut<BindState>,
    mut rig: ResMut<RigContext>,
    mut index: ResMut<JointEntities>,
    mut exit: EventWriter<AppExit>,
) {
    if *state != BindState::Pending {
        return;
    }
    let Some(root) = roots.iter().next() else {
        return;
    };

    let (desc, entities) = describe_hierarchy(root, &joints, &children);
    match AnimationContext::new(&desc, settings.0.clone()) {
        Ok(ctx) => {
            info!("ribbit rig bound to {} entities", entities.len());
            index.by_joint = entities;
            rig.0 = Some(ctx);
            *state = BindState::Bound;
        }
        Err(e) => {
            error!("ribbit rig: {e}");
            *state = BindState::Failed;
            exit.send(AppExit::error());
        }
    }
}

/// Input bookkeeping carried across frames until the rig is bound.
#[derive(Default)]
pub struct InputLatch {
    start_requested: bool,
    primed: bool,
}

/// Forwards keyboard changes (by `KeyCode` name) and starts the rig on the
/// first left click or [`StartRig`] event. Requests that arrive before the
/// rig is bound are held until it is; keys already down at bind time are
/// pressed on the first bound frame.
pub fn input_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    mut start: EventReader<StartRig>,
    mut latch: Local<InputLatch>,
    mut rig: ResMut<RigContext>,
) {
    if start.read().count() > 0 || mouse.is_some_and(|m| m.just_pressed(MouseButton::Left)) {
        latch.start_requested = true;
    }
    let Some(ctx) = rig.0.as_mut() else {
        return;
    };

    if std::mem::take(&mut latch.start_requested) {
        ctx.start();
    }

    let Some(keys) = keys else {
        return;
    };
    if !latch.primed {
        latch.primed = true;
        for key in keys.get_pressed() {
            ctx.key_event(&KeyEvent::down(format!("{key:?}")));
        }
        return;
    }
    for key in keys.get_just_pressed() {
        ctx.key_event(&KeyEvent::down(format!("{key:?}")));
    }
    for key in keys.get_just_released() {
        ctx.key_event(&KeyEvent::up(format!("{key:?}")));
    }
}

/// Blend phase: step the rig and mirror every joint's local transform onto
/// its entity. Bevy's transform propagation then acts as the evaluator.
pub fn step_rig_system(
    time: Res<Time>,
    fixed: Option<Res<FixedDt>>,
    mut rig: ResMut<RigContext>,
    index: Res<JointEntities>,
    mut transforms: Query<&mut Transform>,
    mut events: EventWriter<RibbitRigEvent>,
) {
    let Some(ctx) = rig.0.as_mut() else {
        return;
    };
    let dt = fixed.map_or_else(|| time.delta_seconds(), |f| f.0);
    ctx.step(dt);

    for joint in ctx.skeleton().joints() {
        let Some(entity) = index.entity(joint.id) else {
            continue;
        };
        if let Ok(mut tf) = transforms.get_mut(entity) {
            tf.translation = joint.local.translation;
            tf.rotation = joint.local.rotation;
            tf.scale = joint.local.scale;
        }
    }

    for e in ctx.events().iter() {
        events.send(RibbitRigEvent(e.clone()));
    }
}

/// Sync phase: read propagated global transforms (relative to the rig root's
/// parent space) into the bone matrix buffer.
pub fn sync_bones_system(
    mut rig: ResMut<RigContext>,
    index: Res<JointEntities>,
    globals: Query<(&GlobalTransform, &Transform)>,
) {
    let Some(ctx) = rig.0.as_mut() else {
        return;
    };
    let Some(&root) = index.by_joint.first() else {
        return;
    };
    let Ok((root_global, root_local)) = globals.get(root) else {
        return;
    };
    // root_global = parent_space * root_local
    let to_rig = (root_global.compute_matrix() * root_local.compute_matrix().inverse()).inverse();

    let world: Vec<Mat4> = index
        .by_joint
        .iter()
        .map(|e| {
            globals
                .get(*e)
                .map(|(g, _)| to_rig * g.compute_matrix())
                .unwrap_or(Mat4::IDENTITY)
        })
        .collect();
    ctx.sync_world(&world);
}
