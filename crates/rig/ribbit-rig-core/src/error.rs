//! Setup errors for the rig core.
//!
//! Everything that can go wrong happens while a rig is being built: a malformed
//! skeleton, a joint name the binding cannot find, or a skeleton larger than the
//! shader's bone array. Per-tick code has no error path.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum RigError {
    #[error("duplicate joint name '{0}'")]
    DuplicateJoint(String),

    #[error("joint '{joint}' references unknown parent '{parent}'")]
    UnknownParent { joint: String, parent: String },

    #[error("skeleton has no root joint")]
    NoRoot,

    #[error("skeleton has more than one root joint: {roots:?}")]
    MultipleRoots { roots: Vec<String> },

    #[error("joint '{0}' is not reachable from the root (parent cycle)")]
    Cycle(String),

    #[error("rig binding for {role} expects joint '{name}', which the skeleton does not contain")]
    MissingJoint { role: String, name: String },

    #[error("joint '{0}' has no captured rest pose (degenerate transform)")]
    MissingRestPose(String),

    #[error("skeleton has {bones} bones but the shader bone array holds {capacity}")]
    BoneCapacity { bones: usize, capacity: usize },

    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, RigError>;
