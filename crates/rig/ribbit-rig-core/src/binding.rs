//! Name-based rig binding.
//!
//! The animated joints are looked up by name once, when the rig is built, and
//! stored as typed handles. A missing name fails the build instead of leaving
//! an unbound joint to be discovered mid-animation.

use glam::Vec3;

use crate::config::{JointNames, LegSlot};
use crate::error::{Result, RigError};
use crate::ids::JointId;
use crate::pose::PoseStore;

/// Resolves joint names to handles.
/// Implemented by [`Skeleton`](crate::skeleton::Skeleton); adapters may provide their own.
pub trait JointResolver {
    fn resolve(&self, name: &str) -> Option<JointId>;
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegJoints {
    pub slot: LegSlot,
    pub leg: JointId,
    pub foot: JointId,
    /// Normalized lift axis.
    pub swing_axis: Vec3,
}

/// Handles of every joint the blend engine drives.
#[derive(Clone, Debug, PartialEq)]
pub struct RigJoints {
    pub body: JointId,
    pub head: JointId,
    pub legs: Vec<LegJoints>,
}

fn require(
    resolver: &dyn JointResolver,
    poses: &PoseStore,
    role: &str,
    name: &str,
) -> Result<JointId> {
    let id = resolver.resolve(name).ok_or_else(|| RigError::MissingJoint {
        role: role.to_string(),
        name: name.to_string(),
    })?;
    if poses.rest_pose(id).is_none() {
        return Err(RigError::MissingRestPose(name.to_string()));
    }
    Ok(id)
}

impl RigJoints {
    /// Resolve every configured name. Each bound joint must also have a rest pose.
    pub fn bind(names: &JointNames, resolver: &dyn JointResolver, poses: &PoseStore) -> Result<Self> {
        let body = require(resolver, poses, "body", &names.body)?;
        let head = require(resolver, poses, "head", &names.head)?;
        let mut legs = Vec::with_capacity(names.legs.len());
        for leg in &names.legs {
            let role = leg.slot.as_str();
            let swing_axis = leg.swing_axis.try_normalize().ok_or_else(|| {
                RigError::Config(format!("swing_axis of {role} must be a non-zero vector"))
            })?;
            legs.push(LegJoints {
                slot: leg.slot,
                leg: require(resolver, poses, role, &leg.leg)?,
                foot: require(resolver, poses, &format!("{role} foot"), &leg.foot)?,
                swing_axis,
            });
        }
        Ok(Self { body, head, legs })
    }

    pub fn leg(&self, slot: LegSlot) -> Option<&LegJoints> {
        self.legs.iter().find(|l| l.slot == slot)
    }
}
