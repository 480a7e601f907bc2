//! Rig configuration.
//!
//! Every tunable the blend engine reads lives here. Defaults reproduce the
//! shipped frog demo; hosts override any subset from JSON (all sections are
//! `#[serde(default)]`).

use std::f32::consts::{FRAC_PI_4, FRAC_PI_8};

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::error::{Result, RigError};

/// Tempo of the soundtrack the head bob is locked to (beats per minute / 60).
pub const DEFAULT_BEATS_PER_SECOND: f32 = 115.262 / 60.0;

/// Size of `boneMatrices[]` in the skinning shader.
pub const DEFAULT_BONE_CAPACITY: usize = 46;

/// Convert a 0xRRGGBB literal to a normalized RGB triple.
pub fn rgb_hex(hex: u32) -> Vec3 {
    Vec3::new(
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    )
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RigConfig {
    pub joints: JointNames,
    pub rates: Rates,
    pub tempo: Tempo,
    pub head: HeadMotion,
    pub legs: LegMotion,
    pub locomotion: Locomotion,
    pub axes: Axes,
    pub material: Material,
    /// Length of the bone matrix buffer handed to the shader.
    pub bone_capacity: usize,
}

impl Default for RigConfig {
    fn default() -> Self {
        Self {
            joints: JointNames::default(),
            rates: Rates::default(),
            tempo: Tempo::default(),
            head: HeadMotion::default(),
            legs: LegMotion::default(),
            locomotion: Locomotion::default(),
            axes: Axes::default(),
            material: Material::default(),
            bone_capacity: DEFAULT_BONE_CAPACITY,
        }
    }
}

impl RigConfig {
    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json_str(s: &str) -> Result<Self> {
        let cfg: RigConfig =
            serde_json::from_str(s).map_err(|e| RigError::Config(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject values the blend engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.bone_capacity == 0 {
            return Err(RigError::Config("bone_capacity must be > 0".into()));
        }
        if !(self.tempo.beats_per_second.is_finite() && self.tempo.beats_per_second > 0.0) {
            return Err(RigError::Config(format!(
                "tempo.beats_per_second must be positive, got {}",
                self.tempo.beats_per_second
            )));
        }
        let axes = [
            ("axes.up", self.axes.up),
            ("axes.forward", self.axes.forward),
            ("axes.left", self.axes.left),
        ];
        for (field, axis) in axes {
            if axis.try_normalize().is_none() {
                return Err(RigError::Config(format!("{field} must be a non-zero vector")));
            }
        }
        for leg in &self.joints.legs {
            if leg.swing_axis.try_normalize().is_none() {
                return Err(RigError::Config(format!(
                    "swing_axis of leg '{}' must be a non-zero vector",
                    leg.leg
                )));
            }
        }
        Ok(())
    }
}

/// Which corner of the body a leg sits on.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum LegSlot {
    FrontLeft,
    FrontRight,
    RearLeft,
    RearRight,
}

impl LegSlot {
    #[inline]
    pub fn is_front(self) -> bool {
        matches!(self, LegSlot::FrontLeft | LegSlot::FrontRight)
    }

    #[inline]
    pub fn is_left(self) -> bool {
        matches!(self, LegSlot::FrontLeft | LegSlot::RearLeft)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LegSlot::FrontLeft => "front-left-leg",
            LegSlot::FrontRight => "front-right-leg",
            LegSlot::RearLeft => "rear-left-leg",
            LegSlot::RearRight => "rear-right-leg",
        }
    }
}

/// Joint names for one leg and the tilted axis its lift rotates about.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LegNames {
    pub slot: LegSlot,
    pub leg: String,
    pub foot: String,
    /// Rotation axis of the leg lift, in the leg joint's local space.
    pub swing_axis: Vec3,
}

/// Names the rig binding resolves against the skeleton.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct JointNames {
    /// Joint translated by locomotion.
    pub body: String,
    pub head: String,
    pub legs: Vec<LegNames>,
}

impl Default for JointNames {
    fn default() -> Self {
        let left_axis = Vec3::new(1.0, 0.0, 0.5);
        let right_axis = Vec3::new(1.0, 0.0, -0.5);
        let leg = |slot: LegSlot, suffix: &str, swing_axis: Vec3| LegNames {
            slot,
            leg: format!("leg.{suffix}"),
            foot: format!("foot.{suffix}"),
            swing_axis,
        };
        Self {
            body: "root".into(),
            head: "head".into(),
            legs: vec![
                leg(LegSlot::FrontLeft, "fl", left_axis),
                leg(LegSlot::FrontRight, "fr", right_axis),
                leg(LegSlot::RearLeft, "rl", left_axis),
                leg(LegSlot::RearRight, "rr", right_axis),
            ],
        }
    }
}

/// Approach rates (per second) of the exponential blend.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Rates {
    pub head: f32,
    pub leg: f32,
    pub foot: f32,
    pub color: f32,
}

impl Default for Rates {
    fn default() -> Self {
        Self {
            head: 5.0,
            leg: 10.0,
            foot: 10.0,
            color: 5.0,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tempo {
    pub beats_per_second: f32,
    /// Beat counter is `floor(t * bps * beat_counter_scale)`.
    pub beat_counter_scale: f32,
    /// Head wobble frequency per axis, in multiples of the beat rate.
    pub wobble_beats: Vec2,
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            beats_per_second: DEFAULT_BEATS_PER_SECOND,
            beat_counter_scale: 0.5,
            wobble_beats: Vec2::new(2.0, 1.0),
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HeadMotion {
    /// Wobble amplitude (radians) on the x and y Euler axes.
    pub wobble_amplitude: Vec2,
    pub turn_angle: f32,
}

impl Default for HeadMotion {
    fn default() -> Self {
        Self {
            wobble_amplitude: Vec2::new(0.2, 0.2),
            turn_angle: FRAC_PI_4,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LegMotion {
    pub lift_angle: f32,
    /// Counter-rotation of the foot about the up axis.
    pub foot_angle: f32,
}

impl Default for LegMotion {
    fn default() -> Self {
        Self {
            lift_angle: FRAC_PI_4,
            foot_angle: FRAC_PI_8,
        }
    }
}

/// Per-tick body translation. Not scaled by the frame delta.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Locomotion {
    pub step: f32,
    pub bob: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self {
            step: 0.05,
            bob: 0.01,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Axes {
    pub up: Vec3,
    pub forward: Vec3,
    pub left: Vec3,
}

impl Default for Axes {
    fn default() -> Self {
        Self {
            up: Vec3::Y,
            forward: Vec3::NEG_Z,
            left: Vec3::NEG_X,
        }
    }
}

/// Skin shader material uniforms.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Material {
    /// Base color the drift approaches once animation has started.
    pub active_color: Vec3,
    /// Color written on every beat reset.
    pub pulse_color: Vec3,
    pub ambient_color: Vec3,
    pub specular_color: Vec3,
    pub shininess: f32,
    pub reflectivity: f32,
    pub light_direction: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            active_color: rgb_hex(0x1f7753),
            pulse_color: rgb_hex(0x9be36b),
            ambient_color: rgb_hex(0x1f7753),
            specular_color: rgb_hex(0xffffff),
            shininess: 0.4,
            reflectivity: 0.2,
            light_direction: Vec3::new(0.0, -1.0, 0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_normalize() {
        assert_eq!(rgb_hex(0xffffff), Vec3::ONE);
        assert_eq!(rgb_hex(0x000000), Vec3::ZERO);
        let c = rgb_hex(0x1f7753);
        assert!((c.x - 31.0 / 255.0).abs() < 1e-6);
        assert!((c.y - 119.0 / 255.0).abs() < 1e-6);
        assert!((c.z - 83.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let cfg = RigConfig::from_json_str(r#"{ "rates": { "head": 2.5 } }"#).unwrap();
        assert_eq!(cfg.rates.head, 2.5);
        assert_eq!(cfg.rates.leg, 10.0);
        assert_eq!(cfg.bone_capacity, DEFAULT_BONE_CAPACITY);
        assert_eq!(cfg.joints.legs.len(), 4);
    }

    #[test]
    fn zero_capacity_is_rejected() {
        let err = RigConfig::from_json_str(r#"{ "bone_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, RigError::Config(_)));
    }

    #[test]
    fn zero_axis_is_rejected() {
        let err = RigConfig::from_json_str(r#"{ "axes": { "up": [0.0, 0.0, 0.0] } }"#).unwrap_err();
        assert!(matches!(err, RigError::Config(msg) if msg.contains("axes.up")));
    }
}
