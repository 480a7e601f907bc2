//! Joint hierarchy and world-matrix evaluation.
//!
//! A [`Skeleton`] is an arena of joints built once from a [`SkeletonDesc`]. The
//! description order is the skeleton order: it fixes every joint's [`JointId`]
//! and therefore its slot in the bone matrix buffer. Construction validates the
//! hierarchy (unique names, known parents, a single root, no cycles).
//!
//! World matrices are produced by a [`HierarchyEvaluator`], which only borrows
//! the skeleton. Hosts with a scene graph of their own skip the evaluator and
//! hand their world matrices to the context directly.

use glam::{Mat4, Quat, Vec3};
use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::binding::JointResolver;
use crate::error::{Result, RigError};
use crate::ids::{IdAllocator, JointId};

/// Local translation/rotation/scale of a joint relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct JointTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl JointTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    #[inline]
    pub fn to_mat4(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for JointTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Importers round quaternion components; degenerate rotations are kept
/// as-is for the pose store to reject.
fn normalized(q: Quat) -> Quat {
    if q.is_finite() && q.length_squared() > 0.0 {
        q.normalize()
    } else {
        q
    }
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

/// One joint as delivered by the asset importer.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct JointDesc {
    pub name: String,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub translation: Vec3,
    /// Quaternion (x, y, z, w).
    #[serde(default)]
    pub rotation: Quat,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
    /// Column-major inverse bind matrix; identity when absent.
    #[serde(default)]
    pub inverse_bind: Option<Mat4>,
}

impl JointDesc {
    pub fn new(name: impl Into<String>, parent: Option<&str>) -> Self {
        Self {
            name: name.into(),
            parent: parent.map(str::to_string),
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
            inverse_bind: None,
        }
    }

    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SkeletonDesc {
    pub joints: Vec<JointDesc>,
}

#[derive(Clone, Debug)]
pub struct Joint {
    pub id: JointId,
    pub name: String,
    pub parent: Option<JointId>,
    pub children: Vec<JointId>,
    pub local: JointTransform,
    pub inverse_bind: Mat4,
}

#[derive(Clone, Debug)]
pub struct Skeleton {
    joints: Vec<Joint>,
    by_name: HashMap<String, JointId>,
    root: JointId,
    /// Parent-before-child order used for world evaluation.
    eval_order: Vec<JointId>,
}

impl Skeleton {
    /// Build and validate a skeleton from its description.
    pub fn from_desc(desc: &SkeletonDesc) -> Result<Self> {
        let mut ids = IdAllocator::new();
        let mut by_name: HashMap<String, JointId> = HashMap::with_capacity(desc.joints.len());
        let mut joints: Vec<Joint> = Vec::with_capacity(desc.joints.len());

        for jd in &desc.joints {
            let id = ids.alloc_joint();
            if by_name.insert(jd.name.clone(), id).is_some() {
                return Err(RigError::DuplicateJoint(jd.name.clone()));
            }
            joints.push(Joint {
                id,
                name: jd.name.clone(),
                parent: None,
                children: Vec::new(),
                local: JointTransform {
                    translation: jd.translation,
                    rotation: normalized(jd.rotation),
                    scale: jd.scale,
                },
                inverse_bind: jd.inverse_bind.unwrap_or(Mat4::IDENTITY),
            });
        }

        // Resolve parents once every name is known.
        let mut roots = Vec::new();
        for (idx, jd) in desc.joints.iter().enumerate() {
            let id = joints[idx].id;
            match &jd.parent {
                Some(parent) => {
                    let pid = *by_name.get(parent).ok_or_else(|| RigError::UnknownParent {
                        joint: jd.name.clone(),
                        parent: parent.clone(),
                    })?;
                    joints[idx].parent = Some(pid);
                    joints[pid.index()].children.push(id);
                }
                None => roots.push(id),
            }
        }

        let root = match roots.as_slice() {
            [] => return Err(RigError::NoRoot),
            [root] => *root,
            _ => {
                return Err(RigError::MultipleRoots {
                    roots: roots
                        .iter()
                        .map(|id| joints[id.index()].name.clone())
                        .collect(),
                })
            }
        };

        // Depth-first from the root; anything not reached hangs off a cycle.
        let mut eval_order = Vec::with_capacity(joints.len());
        let mut visited = vec![false; joints.len()];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if visited[id.index()] {
                continue;
            }
            visited[id.index()] = true;
            eval_order.push(id);
            stack.extend(joints[id.index()].children.iter().rev().copied());
        }
        if let Some(idx) = visited.iter().position(|v| !v) {
            return Err(RigError::Cycle(joints[idx].name.clone()));
        }

        Ok(Self {
            joints,
            by_name,
            root,
            eval_order,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    #[inline]
    pub fn root(&self) -> JointId {
        self.root
    }

    pub fn joints(&self) -> &[Joint] {
        &self.joints
    }

    #[inline]
    pub fn joint(&self, id: JointId) -> &Joint {
        &self.joints[id.index()]
    }

    #[inline]
    pub fn local(&self, id: JointId) -> &JointTransform {
        &self.joints[id.index()].local
    }

    #[inline]
    pub fn local_mut(&mut self, id: JointId) -> &mut JointTransform {
        &mut self.joints[id.index()].local
    }

    pub fn find(&self, name: &str) -> Option<JointId> {
        self.by_name.get(name).copied()
    }

    /// Joints ordered so every parent precedes its children.
    pub fn eval_order(&self) -> &[JointId] {
        &self.eval_order
    }
}

impl JointResolver for Skeleton {
    fn resolve(&self, name: &str) -> Option<JointId> {
        self.find(name)
    }
}

/// Produces world matrices (indexed by JointId) from a skeleton's local transforms.
pub trait HierarchyEvaluator {
    fn evaluate(&self, skeleton: &Skeleton) -> Vec<Mat4>;
}

/// Reference evaluator: `world = parent_world * local`, with the root's local
/// transform taken as its world transform.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalEvaluator;

impl HierarchyEvaluator for LocalEvaluator {
    fn evaluate(&self, skeleton: &Skeleton) -> Vec<Mat4> {
        let mut world = vec![Mat4::IDENTITY; skeleton.len()];
        for &id in skeleton.eval_order() {
            let joint = skeleton.joint(id);
            let local = joint.local.to_mat4();
            world[id.index()] = match joint.parent {
                Some(parent) => world[parent.index()] * local,
                None => local,
            };
        }
        world
    }
}
