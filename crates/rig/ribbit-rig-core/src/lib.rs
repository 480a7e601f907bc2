//! Ribbit Rig Core (engine-agnostic)
//!
//! Procedural pose blending for the frog rig: rest-pose capture, held-key input
//! state, per-joint target behaviors blended with an iterative exponential
//! approach, tempo-locked head wobble and color pulses, and a fixed-capacity
//! bone matrix buffer for the skinning shader.
//!
//! Rendering, asset import and hierarchy evaluation belong to the host; the
//! core only needs a [`SkeletonDesc`] and a frame delta. Adapters (Bevy/WASM)
//! drive an [`AnimationContext`] once per display frame.

pub mod beat;
pub mod behavior;
pub mod binding;
pub mod clock;
pub mod config;
pub mod context;
pub mod error;
pub mod ids;
pub mod input;
pub mod interp;
pub mod outputs;
pub mod pose;
pub mod skeleton;
pub mod uniforms;

// Re-exports for consumers (adapters)
pub use binding::{JointResolver, LegJoints, RigJoints};
pub use clock::ClockState;
pub use config::{LegSlot, RigConfig};
pub use context::AnimationContext;
pub use error::{Result, RigError};
pub use ids::JointId;
pub use input::{Control, InputState, KeyEvent, KeyMap};
pub use outputs::{Events, RigEvent};
pub use pose::{PoseStore, RestPose};
pub use skeleton::{
    HierarchyEvaluator, Joint, JointDesc, JointTransform, LocalEvaluator, Skeleton, SkeletonDesc,
};
pub use uniforms::{BoneMatrixBuffer, ShaderUniforms, UniformSink};
