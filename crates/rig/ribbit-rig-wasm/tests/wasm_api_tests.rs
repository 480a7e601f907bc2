#![cfg(target_arch = "wasm32")]
use js_sys::{Object, Reflect};
use ribbit_rig_wasm::{abi_version, RibbitRig};
use serde_json::json;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

const FROG: &str = include_str!("../../../../fixtures/rigs/frog.json");

fn frog() -> RibbitRig {
    RibbitRig::new(JsValue::from_str(FROG), JsValue::UNDEFINED).unwrap()
}

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_from_json_string_with_defaults() {
    let rig = frog();
    assert!(!rig.started());
    assert_eq!(rig.bone_capacity(), 46);
    assert_eq!(rig.joint_names().length(), 14);
}

#[wasm_bindgen_test]
fn missing_skeleton_is_an_error() {
    assert!(RibbitRig::new(JsValue::NULL, JsValue::UNDEFINED).is_err());
}

#[wasm_bindgen_test]
fn unknown_joint_name_in_config_is_an_error() {
    let cfg = json!({ "joints": { "head": "skull" } }).to_string();
    assert!(RibbitRig::new(JsValue::from_str(FROG), JsValue::from_str(&cfg)).is_err());
}

#[wasm_bindgen_test]
fn bone_buffer_is_full_capacity() {
    let mut rig = frog();
    rig.start();
    rig.advance(1.0 / 60.0).unwrap();
    let floats = rig.bone_matrices();
    assert_eq!(floats.len(), 46 * 16);
    // Slot 45 is unused by a 14-joint rig: identity.
    let tail = &floats[45 * 16..];
    assert_eq!(tail[0], 1.0);
    assert_eq!(tail[5], 1.0);
    assert_eq!(tail[1], 0.0);
}

#[wasm_bindgen_test]
fn keys_map_to_controls() {
    let mut rig = frog();
    assert!(rig.key_down("KeyW".into()));
    assert!(!rig.key_down("KeyZ".into()));
    assert_eq!(rig.held_controls().length(), 1);
    assert!(rig.key_up("KeyW".into()));
    assert_eq!(rig.held_controls().length(), 0);
}

#[wasm_bindgen_test]
fn first_tick_after_start_reports_started() {
    let mut rig = frog();
    rig.start();
    let events = rig.advance(0.016).unwrap();
    let arr = js_sys::Array::from(&events);
    assert_eq!(arr.length(), 1);
    assert_eq!(arr.get(0).as_string().as_deref(), Some("Started"));
    assert!(rig.elapsed() > 0.0);
}

#[wasm_bindgen_test]
fn uniforms_are_keyed_by_shader_name() {
    let rig = frog();
    let obj: Object = rig.uniforms();
    let shininess = Reflect::get(&obj, &JsValue::from_str("uShininess")).unwrap();
    assert!((shininess.as_f64().unwrap() - 0.4).abs() < 1e-6);
    let bones = Reflect::get(&obj, &JsValue::from_str("boneMatrices")).unwrap();
    assert_eq!(js_sys::Float32Array::from(bones).length(), 46 * 16);
}

#[wasm_bindgen_test]
fn sync_world_checks_length() {
    let mut rig = frog();
    rig.step(0.016).unwrap();
    assert!(rig.sync_world(&[0.0; 16]).is_err());
    let identity: Vec<f32> = (0..14)
        .flat_map(|_| {
            [
                1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
            ]
        })
        .collect();
    assert!(rig.sync_world(&identity).is_ok());
}
