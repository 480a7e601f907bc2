//! Rest pose capture.
//!
//! The rest pose is the blend target for idle joints and the base every
//! additive offset is composed with. It is captured once from the freshly
//! loaded skeleton and never written again.

use glam::{EulerRot, Quat, Vec3};
use log::warn;

use crate::ids::JointId;
use crate::skeleton::{JointTransform, Skeleton};

/// Euler order used wherever a joint is animated per axis.
pub const EULER_ORDER: EulerRot = EulerRot::XYZ;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RestPose {
    pub translation: Vec3,
    pub rotation: Quat,
    /// `rotation` decomposed in [`EULER_ORDER`].
    pub euler: Vec3,
    pub scale: Vec3,
}

/// Immutable per-joint rest poses, indexed by JointId.
#[derive(Clone, Debug, Default)]
pub struct PoseStore {
    poses: Vec<Option<RestPose>>,
}

fn degenerate(t: &JointTransform) -> Option<&'static str> {
    if !t.translation.is_finite() {
        return Some("non-finite translation");
    }
    if !t.scale.is_finite() || t.scale.x == 0.0 || t.scale.y == 0.0 || t.scale.z == 0.0 {
        return Some("degenerate scale");
    }
    if !t.rotation.is_finite() || t.rotation.length_squared() == 0.0 {
        return Some("degenerate rotation");
    }
    None
}

impl PoseStore {
    /// Snapshot every joint's current local transform. Joints with a degenerate
    /// transform are skipped and have no rest pose.
    pub fn capture(skeleton: &Skeleton) -> Self {
        let poses = skeleton
            .joints()
            .iter()
            .map(|joint| {
                if let Some(reason) = degenerate(&joint.local) {
                    warn!("rest pose: skipping joint '{}' ({reason})", joint.name);
                    return None;
                }
                let rotation = joint.local.rotation;
                let (x, y, z) = rotation.to_euler(EULER_ORDER);
                Some(RestPose {
                    translation: joint.local.translation,
                    rotation,
                    euler: Vec3::new(x, y, z),
                    scale: joint.local.scale,
                })
            })
            .collect();
        Self { poses }
    }

    #[inline]
    pub fn rest_pose(&self, joint: JointId) -> Option<&RestPose> {
        self.poses.get(joint.index()).and_then(Option::as_ref)
    }

    /// Number of joints with a captured pose.
    pub fn captured(&self) -> usize {
        self.poses.iter().filter(|p| p.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skeleton::{JointDesc, SkeletonDesc};

    #[test]
    fn captures_rotation_and_euler() {
        let q = Quat::from_rotation_x(0.3);
        let sk = Skeleton::from_desc(&SkeletonDesc {
            joints: vec![JointDesc::new("root", None).with_rotation(q)],
        })
        .unwrap();
        let store = PoseStore::capture(&sk);
        let rest = store.rest_pose(JointId(0)).unwrap();
        assert!(rest.rotation.abs_diff_eq(q, 1e-6));
        assert!((rest.euler.x - 0.3).abs() < 1e-5);
        assert!(rest.euler.y.abs() < 1e-5);
    }

    #[test]
    fn skips_zero_scale() {
        let sk = Skeleton::from_desc(&SkeletonDesc {
            joints: vec![
                JointDesc::new("root", None),
                JointDesc::new("flat", Some("root")).with_scale(Vec3::new(1.0, 0.0, 1.0)),
            ],
        })
        .unwrap();
        let store = PoseStore::capture(&sk);
        assert!(store.rest_pose(JointId(0)).is_some());
        assert!(store.rest_pose(JointId(1)).is_none());
        assert_eq!(store.captured(), 1);
    }

    #[test]
    fn out_of_range_joint_has_no_pose() {
        let store = PoseStore::default();
        assert!(store.rest_pose(JointId(7)).is_none());
    }
}
