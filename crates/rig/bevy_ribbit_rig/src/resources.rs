use bevy::prelude::*;
use ribbit_rig_core::{AnimationContext, JointId, RigConfig, RigEvent};

/// The bound rig. Empty until a [`crate::RibbitRigRoot`] hierarchy is bound.
#[derive(Resource, Default)]
pub struct RigContext(pub Option<AnimationContext>);

/// Config used when the rig is bound.
#[derive(Resource, Default, Clone)]
pub struct RigSettings(pub RigConfig);

/// Binding outcome; a failed bind is not retried.
#[derive(Resource, Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BindState {
    #[default]
    Pending,
    Bound,
    Failed,
}

/// Joint entities indexed by JointId.
#[derive(Resource, Default, Debug)]
pub struct JointEntities {
    pub by_joint: Vec<Entity>,
}

impl JointEntities {
    pub fn entity(&self, joint: JointId) -> Option<Entity> {
        self.by_joint.get(joint.index()).copied()
    }
}

/// Fixed frame delta (seconds). When absent, `Time::delta_seconds` is used.
#[derive(Resource)]
pub struct FixedDt(pub f32);

impl Default for FixedDt {
    fn default() -> Self {
        Self(1.0 / 60.0)
    }
}

/// Request the one-way start latch (same as the first mouse click).
#[derive(Event, Default, Debug, Clone, Copy)]
pub struct StartRig;

/// Rig events re-emitted into the ECS after each tick.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct RibbitRigEvent(pub RigEvent);
