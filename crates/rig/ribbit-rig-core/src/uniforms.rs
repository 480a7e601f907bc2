//! Shader uniform sync.
//!
//! The skinning shader declares a fixed `boneMatrices[N]` array. The buffer
//! here always holds exactly N matrices: one per joint in skeleton order, then
//! identity for every slot the skeleton does not use.

use glam::{Mat4, Vec3};

use crate::config::Material;
use crate::skeleton::Skeleton;

/// Shader-facing uniform names.
pub mod names {
    pub const COLOR: &str = "uColor";
    pub const SHININESS: &str = "uShininess";
    pub const REFLECTIVITY: &str = "uReflectivity";
    pub const AMBIENT_COLOR: &str = "uAmbientColor";
    pub const SPECULAR_COLOR: &str = "uSpecularColor";
    pub const LIGHT_DIRECTION: &str = "uLightDirection";
    pub const BONE_MATRICES: &str = "boneMatrices";
}

/// Destination for uniform writes (a GPU material, a JS object, a test recorder).
pub trait UniformSink {
    fn write_matrices(&mut self, name: &str, matrices: &[Mat4]);
    fn write_vec3(&mut self, name: &str, value: Vec3);
    fn write_f32(&mut self, name: &str, value: f32);
}

#[derive(Clone, Debug, PartialEq)]
pub struct BoneMatrixBuffer {
    matrices: Vec<Mat4>,
    bones: usize,
}

impl BoneMatrixBuffer {
    /// Identity-filled buffer of `capacity` matrices.
    pub fn new(capacity: usize) -> Self {
        Self {
            matrices: vec![Mat4::IDENTITY; capacity],
            bones: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.matrices.len()
    }

    /// Number of slots written from the skeleton on the last sync.
    #[inline]
    pub fn bones(&self) -> usize {
        self.bones
    }

    pub fn as_slice(&self) -> &[Mat4] {
        &self.matrices
    }

    /// Column-major floats, 16 per matrix.
    pub fn to_cols_floats(&self) -> Vec<f32> {
        self.matrices
            .iter()
            .flat_map(|m| m.to_cols_array())
            .collect()
    }

    /// Rewrite every slot: `world[i] * inverse_bind[i]` for each joint, identity
    /// for the rest. Joints beyond capacity are dropped; the context rejects
    /// such skeletons at setup.
    pub fn sync(&mut self, skeleton: &Skeleton, world: &[Mat4]) {
        let bones = skeleton.len().min(world.len()).min(self.matrices.len());
        for (slot, (joint, w)) in self
            .matrices
            .iter_mut()
            .zip(skeleton.joints().iter().zip(world))
        {
            *slot = *w * joint.inverse_bind;
        }
        for slot in &mut self.matrices[bones..] {
            *slot = Mat4::IDENTITY;
        }
        self.bones = bones;
    }
}

/// Uniform set of the frog skin material.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaderUniforms {
    pub color: Vec3,
    pub shininess: f32,
    pub reflectivity: f32,
    pub ambient_color: Vec3,
    pub specular_color: Vec3,
    pub light_direction: Vec3,
    pub bone_matrices: BoneMatrixBuffer,
}

impl ShaderUniforms {
    pub fn new(material: &Material, bone_capacity: usize) -> Self {
        Self {
            color: material.active_color,
            shininess: material.shininess,
            reflectivity: material.reflectivity,
            ambient_color: material.ambient_color,
            specular_color: material.specular_color,
            light_direction: material.light_direction,
            bone_matrices: BoneMatrixBuffer::new(bone_capacity),
        }
    }

    /// Write every uniform to `sink` by its shader name.
    pub fn flush(&self, sink: &mut dyn UniformSink) {
        sink.write_vec3(names::COLOR, self.color);
        sink.write_f32(names::SHININESS, self.shininess);
        sink.write_f32(names::REFLECTIVITY, self.reflectivity);
        sink.write_vec3(names::AMBIENT_COLOR, self.ambient_color);
        sink.write_vec3(names::SPECULAR_COLOR, self.specular_color);
        sink.write_vec3(names::LIGHT_DIRECTION, self.light_direction);
        sink.write_matrices(names::BONE_MATRICES, self.bone_matrices.as_slice());
    }
}
