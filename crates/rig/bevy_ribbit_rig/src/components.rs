use bevy::prelude::*;

/// Marks the root joint of a rig hierarchy. The binding system walks the
/// named descendants of this entity to build the skeleton.
#[derive(Component)]
pub struct RibbitRigRoot;

/// Optional inverse bind matrix for a joint entity; identity when absent.
#[derive(Component, Debug, Clone, Copy)]
pub struct JointInverseBind(pub Mat4);
