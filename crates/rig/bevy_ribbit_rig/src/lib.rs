use bevy::prelude::*;
use bevy::transform::TransformSystem;
use ribbit_rig_core::RigConfig;

mod components;
mod resources;
mod systems;

pub use components::{JointInverseBind, RibbitRigRoot};
pub use resources::{
    BindState, FixedDt, JointEntities, RibbitRigEvent, RigContext, RigSettings, StartRig,
};

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RibbitRigSet {
    Bind,
    Input,
    Step,
    Sync,
}

#[derive(Default)]
pub struct RibbitRigPlugin {
    pub config: RigConfig,
}

impl Plugin for RibbitRigPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(RigSettings(self.config.clone()))
            .init_resource::<RigContext>()
            .init_resource::<BindState>()
            .init_resource::<JointEntities>()
            .add_event::<StartRig>()
            .add_event::<RibbitRigEvent>()
            .configure_sets(
                Update,
                (RibbitRigSet::Bind, RibbitRigSet::Input, RibbitRigSet::Step).chain(),
            )
            .add_systems(
                Update,
                (
                    systems::bind_rig_system.in_set(RibbitRigSet::Bind),
                    systems::input_system.in_set(RibbitRigSet::Input),
                    systems::step_rig_system.in_set(RibbitRigSet::Step),
                ),
            )
            .add_systems(
                PostUpdate,
                systems::sync_bones_system
                    .in_set(RibbitRigSet::Sync)
                    .after(TransformSystem::TransformPropagate),
            );
    }
}
