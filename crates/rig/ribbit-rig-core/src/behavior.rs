//! Per-group target selection.
//!
//! Each animated joint group picks a behavior from the held controls every
//! tick and turns it into a target the blend engine approaches:
//! - legs/feet: idle (rest pose) or a directional offset composed with the rest rotation
//! - head: tempo-locked wobble plus a lateral turn, both on Euler axes
//! - body: a fixed per-tick translation delta

use std::f32::consts::TAU;

use glam::{Quat, Vec2, Vec3};

use crate::config::{Axes, HeadMotion, LegMotion, LegSlot, Locomotion, Tempo};
use crate::input::{Control, InputState};
use crate::pose::RestPose;

#[inline]
fn signum_or_zero(x: f32) -> f32 {
    if x > 0.0 {
        1.0
    } else if x < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Behavior of one leg group (leg joint + foot joint) for the current tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum LegBehavior {
    Idle,
    /// Lift in the direction of `sign` (+1 or -1).
    Offset { sign: f32 },
}

impl LegBehavior {
    /// Sum every held movement key's contribution for this leg and keep the
    /// sign. Forward lifts the front legs and drops the rear ones, strafing
    /// lifts the legs on the side moved toward; opposing keys cancel.
    pub fn select(slot: LegSlot, input: &InputState) -> Self {
        let gait = if slot.is_front() { 1.0 } else { -1.0 };
        let side = if slot.is_left() { 1.0 } else { -1.0 };
        let sum = gait * input.axis(Control::MoveForward, Control::MoveBack)
            + side * input.axis(Control::StrafeLeft, Control::StrafeRight);
        match signum_or_zero(sum) {
            s if s == 0.0 => LegBehavior::Idle,
            sign => LegBehavior::Offset { sign },
        }
    }

    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            LegBehavior::Idle => 0.0,
            LegBehavior::Offset { sign } => sign,
        }
    }
}

/// Target rotations for a leg and its foot.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LegTargets {
    pub leg: Quat,
    pub foot: Quat,
}

/// Compose the behavior's offset with the rest rotations. `swing_axis` and
/// `up` must be normalized.
pub fn leg_targets(
    behavior: LegBehavior,
    rest_leg: &RestPose,
    rest_foot: &RestPose,
    swing_axis: Vec3,
    up: Vec3,
    motion: &LegMotion,
) -> LegTargets {
    match behavior {
        LegBehavior::Idle => LegTargets {
            leg: rest_leg.rotation,
            foot: rest_foot.rotation,
        },
        LegBehavior::Offset { sign } => LegTargets {
            leg: rest_leg.rotation * Quat::from_axis_angle(swing_axis, sign * motion.lift_angle),
            foot: rest_foot.rotation * Quat::from_axis_angle(up, -sign * motion.foot_angle),
        },
    }
}

/// Cosine head bob on the x and y Euler axes, locked to the tempo.
pub fn head_wobble(elapsed: f32, tempo: &Tempo, head: &HeadMotion) -> Vec2 {
    let phase = TAU * tempo.beats_per_second * elapsed;
    Vec2::new(
        head.wobble_amplitude.x * (phase * tempo.wobble_beats.x).cos(),
        head.wobble_amplitude.y * (phase * tempo.wobble_beats.y).cos(),
    )
}

/// Lateral head turn as (yaw, roll). Left turns positive, right negative,
/// both held cancel. The rotate modifier moves the turn from yaw to roll.
pub fn head_turn(input: &InputState, head: &HeadMotion) -> Vec2 {
    let turn = input.axis(Control::TurnLeft, Control::TurnRight) * head.turn_angle;
    if input.is_held(Control::RotateModifier) {
        Vec2::new(0.0, turn)
    } else {
        Vec2::new(turn, 0.0)
    }
}

/// Euler target of the head joint.
pub fn head_target(
    rest: &RestPose,
    elapsed: f32,
    input: &InputState,
    tempo: &Tempo,
    head: &HeadMotion,
) -> Vec3 {
    let wobble = head_wobble(elapsed, tempo, head);
    let turn = head_turn(input, head);
    Vec3::new(
        rest.euler.x + wobble.x,
        rest.euler.y + wobble.y + turn.x,
        rest.euler.z + turn.y,
    )
}

/// Per-tick body translation. Every held key contributes its delta, so
/// opposing keys cancel additively instead of blocking each other.
pub fn body_delta(
    input: &InputState,
    elapsed: f32,
    axes: &Axes,
    locomotion: &Locomotion,
    tempo: &Tempo,
) -> Vec3 {
    let forward = axes.forward.normalize() * locomotion.step;
    let left = axes.left.normalize() * locomotion.step;
    let bob = axes.up.normalize() * locomotion.bob * (TAU * tempo.beats_per_second * elapsed).cos();

    let mut delta = Vec3::ZERO;
    if input.is_held(Control::MoveForward) {
        delta += forward + bob;
    }
    if input.is_held(Control::MoveBack) {
        delta -= forward + bob;
    }
    if input.is_held(Control::StrafeLeft) {
        delta += left;
    }
    if input.is_held(Control::StrafeRight) {
        delta -= left;
    }
    delta
}
