use glam::{Mat4, Vec3};
use js_sys::{Array, Float32Array, Object, Reflect};
use serde::Serialize;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use ribbit_rig_core::{
    AnimationContext, Control, KeyEvent, RigConfig, SkeletonDesc, UniformSink,
};

#[wasm_bindgen]
pub struct RibbitRig {
    core: AnimationContext,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Accept either a JS object or a JSON string.
fn parse_arg<T: serde::de::DeserializeOwned>(what: &str, v: JsValue) -> Result<T, JsError> {
    if let Some(s) = v.as_string() {
        return serde_json::from_str(&s).map_err(|e| JsError::new(&format!("{what} error: {e}")));
    }
    swb::from_value(v).map_err(|e| JsError::new(&format!("{what} error: {e}")))
}

/// Writes uniforms onto a plain JS object keyed by shader name.
struct JsUniformSink {
    target: Object,
}

impl JsUniformSink {
    fn set(&self, name: &str, value: &JsValue) {
        // Reflect::set only fails on frozen/proxy targets; ours is a fresh object.
        let _ = Reflect::set(&self.target, &JsValue::from_str(name), value);
    }
}

impl UniformSink for JsUniformSink {
    fn write_matrices(&mut self, name: &str, matrices: &[Mat4]) {
        let floats: Vec<f32> = matrices.iter().flat_map(|m| m.to_cols_array()).collect();
        self.set(name, &Float32Array::from(floats.as_slice()).into());
    }

    fn write_vec3(&mut self, name: &str, value: Vec3) {
        self.set(name, &Float32Array::from(&value.to_array()[..]).into());
    }

    fn write_f32(&mut self, name: &str, value: f32) {
        self.set(name, &JsValue::from_f64(f64::from(value)));
    }
}

#[derive(Serialize)]
struct JointPose<'a> {
    name: &'a str,
    translation: [f32; 3],
    rotation: [f32; 4],
    scale: [f32; 3],
}

#[wasm_bindgen]
impl RibbitRig {
    /// Build a rig from a skeleton description and an optional config.
    /// Both accept a JS object or a JSON string.
    /// Example:
    ///   new RibbitRig(skeletonJson, { rates: { head: 4 } })
    #[wasm_bindgen(constructor)]
    pub fn new(skeleton: JsValue, config: JsValue) -> Result<RibbitRig, JsError> {
        console_error_panic_hook::set_once();

        if jsvalue_is_undefined_or_null(&skeleton) {
            return Err(JsError::new("skeleton is null/undefined"));
        }
        let desc: SkeletonDesc = parse_arg("skeleton", skeleton)?;
        let cfg: RigConfig = if jsvalue_is_undefined_or_null(&config) {
            RigConfig::default()
        } else if let Some(s) = config.as_string() {
            RigConfig::from_json_str(&s).map_err(|e| JsError::new(&e.to_string()))?
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };

        let core = AnimationContext::new(&desc, cfg).map_err(|e| JsError::new(&e.to_string()))?;
        Ok(RibbitRig { core })
    }

    /// First user interaction: latch the clock. Later calls are ignored.
    #[wasm_bindgen]
    pub fn start(&mut self) {
        self.core.start();
    }

    #[wasm_bindgen]
    pub fn started(&self) -> bool {
        self.core.started()
    }

    /// Forward a `keydown` (DOM `KeyboardEvent.code`). Returns false for unmapped keys.
    #[wasm_bindgen(js_name = key_down)]
    pub fn key_down(&mut self, code: String) -> bool {
        self.core.key_event(&KeyEvent::down(code))
    }

    #[wasm_bindgen(js_name = key_up)]
    pub fn key_up(&mut self, code: String) -> bool {
        self.core.key_event(&KeyEvent::up(code))
    }

    /// Forward `{ type: "Down" | "Up", code }`.
    #[wasm_bindgen(js_name = key_event)]
    pub fn key_event(&mut self, event: JsValue) -> Result<bool, JsError> {
        let event: KeyEvent =
            swb::from_value(event).map_err(|e| JsError::new(&format!("key event error: {e}")))?;
        Ok(self.core.key_event(&event))
    }

    /// Release every held control (e.g. on window blur).
    #[wasm_bindgen(js_name = release_all)]
    pub fn release_all(&mut self) {
        self.core.input_mut().clear();
    }

    /// Held controls by name, e.g. `["MoveForward"]`.
    #[wasm_bindgen(js_name = held_controls)]
    pub fn held_controls(&self) -> Array {
        Control::ALL
            .iter()
            .filter(|c| self.core.input().is_held(**c))
            .map(|c| JsValue::from_str(&format!("{c:?}")))
            .collect()
    }

    /// Advance one display frame (seconds). Returns this tick's events.
    #[wasm_bindgen]
    pub fn advance(&mut self, dt: f32) -> Result<JsValue, JsError> {
        self.core.advance(dt);
        swb::to_value(&self.core.events().events)
            .map_err(|e| JsError::new(&format!("events error: {e}")))
    }

    /// Blend phase only, for hosts that evaluate the hierarchy themselves.
    /// Follow with `sync_world`.
    #[wasm_bindgen]
    pub fn step(&mut self, dt: f32) -> Result<JsValue, JsError> {
        self.core.step(dt);
        swb::to_value(&self.core.events().events)
            .map_err(|e| JsError::new(&format!("events error: {e}")))
    }

    /// Host world matrices, 16 column-major floats per joint in skeleton order.
    #[wasm_bindgen(js_name = sync_world)]
    pub fn sync_world(&mut self, world: &[f32]) -> Result<(), JsError> {
        let joints = self.core.skeleton().len();
        if world.len() != joints * 16 {
            return Err(JsError::new(&format!(
                "sync_world: expected {} floats for {joints} joints, got {}",
                joints * 16,
                world.len()
            )));
        }
        let matrices: Vec<Mat4> = world.chunks_exact(16).map(Mat4::from_cols_slice).collect();
        self.core.sync_world(&matrices);
        Ok(())
    }

    /// The full `boneMatrices` array: capacity × 16 column-major floats.
    #[wasm_bindgen(js_name = bone_matrices)]
    pub fn bone_matrices(&self) -> Vec<f32> {
        self.core.bone_matrices().to_cols_floats()
    }

    #[wasm_bindgen(js_name = bone_capacity)]
    pub fn bone_capacity(&self) -> usize {
        self.core.bone_matrices().capacity()
    }

    /// Current `uColor` as `[r, g, b]`.
    #[wasm_bindgen]
    pub fn color(&self) -> Vec<f32> {
        self.core.color().to_array().to_vec()
    }

    /// Every shader uniform keyed by its GLSL name.
    #[wasm_bindgen]
    pub fn uniforms(&self) -> Object {
        let mut sink = JsUniformSink {
            target: Object::new(),
        };
        self.core.flush_uniforms(&mut sink);
        sink.target
    }

    #[wasm_bindgen(js_name = joint_names)]
    pub fn joint_names(&self) -> Array {
        self.core
            .skeleton()
            .joints()
            .iter()
            .map(|j| JsValue::from_str(&j.name))
            .collect()
    }

    /// Local transforms in skeleton order, for hosts mirroring the pose
    /// onto their own scene graph.
    #[wasm_bindgen(js_name = joint_poses)]
    pub fn joint_poses(&self) -> Result<JsValue, JsError> {
        let poses: Vec<JointPose<'_>> = self
            .core
            .skeleton()
            .joints()
            .iter()
            .map(|j| JointPose {
                name: &j.name,
                translation: j.local.translation.to_array(),
                rotation: j.local.rotation.to_array(),
                scale: j.local.scale.to_array(),
            })
            .collect();
        swb::to_value(&poses).map_err(|e| JsError::new(&format!("poses error: {e}")))
    }

    /// Elapsed animation time in seconds (0 until started).
    #[wasm_bindgen]
    pub fn elapsed(&self) -> f32 {
        self.core.clock().elapsed()
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
