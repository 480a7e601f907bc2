//! AnimationContext: data ownership and the per-tick entry point.
//!
//! Methods:
//! - new (validate config, build skeleton, capture rest pose, bind joints)
//! - start, key_event / input_mut
//! - advance (step → evaluate → sync), or step + sync_world for hosts that
//!   evaluate the hierarchy themselves

use glam::{Mat4, Quat, Vec3};
use log::{debug, info, trace, warn};

use crate::beat::{BeatCounter, ColorDrift};
use crate::behavior::{body_delta, head_target, leg_targets, LegBehavior};
use crate::binding::RigJoints;
use crate::clock::ClockState;
use crate::config::RigConfig;
use crate::error::{Result, RigError};
use crate::ids::JointId;
use crate::input::{InputState, KeyEvent, KeyMap};
use crate::interp::{approach_quat, approach_vec3};
use crate::outputs::{Events, RigEvent};
use crate::pose::{PoseStore, RestPose, EULER_ORDER};
use crate::skeleton::{HierarchyEvaluator, LocalEvaluator, Skeleton, SkeletonDesc};
use crate::uniforms::{BoneMatrixBuffer, ShaderUniforms, UniformSink};

/// Upper bound on `BeatReset` events pushed by a single tick. A stalled frame
/// reports only its most recent crossings.
pub const MAX_BEAT_EVENTS: u64 = 16;

/// Everything one animated rig needs between ticks.
#[derive(Debug)]
pub struct AnimationContext {
    cfg: RigConfig,
    skeleton: Skeleton,
    poses: PoseStore,
    joints: RigJoints,

    input: InputState,
    key_map: KeyMap,
    clock: ClockState,

    /// Head rotation is blended per Euler axis.
    head_euler: Vec3,
    beat: BeatCounter,
    color: ColorDrift,

    uniforms: ShaderUniforms,
    events: Events,
    announce_start: bool,
}

impl AnimationContext {
    /// Build a rig from a skeleton description. Fails on any hierarchy, binding
    /// or capacity problem; nothing is animated until this succeeds.
    pub fn new(desc: &SkeletonDesc, cfg: RigConfig) -> Result<Self> {
        cfg.validate()?;
        let skeleton = Skeleton::from_desc(desc)?;
        if skeleton.len() > cfg.bone_capacity {
            return Err(RigError::BoneCapacity {
                bones: skeleton.len(),
                capacity: cfg.bone_capacity,
            });
        }
        let poses = PoseStore::capture(&skeleton);
        let joints = RigJoints::bind(&cfg.joints, &skeleton, &poses)?;
        let head_euler = poses
            .rest_pose(joints.head)
            .map(|rest| rest.euler)
            .ok_or_else(|| RigError::MissingRestPose(cfg.joints.head.clone()))?;

        info!(
            "rig bound: {} joints, {} legs, {} rest poses, bone capacity {}",
            skeleton.len(),
            joints.legs.len(),
            poses.captured(),
            cfg.bone_capacity
        );

        let mut ctx = Self {
            beat: BeatCounter::new(&cfg.tempo),
            color: ColorDrift::new(&cfg.material, cfg.rates.color),
            uniforms: ShaderUniforms::new(&cfg.material, cfg.bone_capacity),
            cfg,
            skeleton,
            poses,
            joints,
            input: InputState::new(),
            key_map: KeyMap::default(),
            clock: ClockState::new(),
            head_euler,
            events: Events::default(),
            announce_start: false,
        };
        // The first draw may happen before any tick.
        let world = LocalEvaluator.evaluate(&ctx.skeleton);
        ctx.sync_world(&world);
        Ok(ctx)
    }

    /// Set the one-way start latch (first user interaction).
    pub fn start(&mut self) {
        if self.clock.start() {
            debug!("rig started");
            self.announce_start = true;
        }
    }

    #[inline]
    pub fn started(&self) -> bool {
        self.clock.started()
    }

    /// Route a host key event through the key map. Returns false for unmapped keys.
    pub fn key_event(&mut self, event: &KeyEvent) -> bool {
        self.input.apply(event, &self.key_map)
    }

    /// Advance one display frame using the reference hierarchy evaluator.
    pub fn advance(&mut self, dt: f32) {
        self.advance_with(dt, &LocalEvaluator);
    }

    /// Advance one display frame using the given hierarchy evaluator.
    pub fn advance_with(&mut self, dt: f32, evaluator: &dyn HierarchyEvaluator) {
        self.step(dt);
        let world = evaluator.evaluate(&self.skeleton);
        self.sync_world(&world);
    }

    /// Blend phase only: clock, joint targets, body translation, color.
    /// Leaves local transforms ready for hierarchy evaluation.
    pub fn step(&mut self, dt: f32) {
        self.events.clear();
        if self.announce_start {
            self.announce_start = false;
            self.events.push(RigEvent::Started);
        }

        self.clock.tick(dt);
        if !self.clock.started() {
            return;
        }
        let dt = self.clock.delta();
        let t = self.clock.elapsed();

        self.blend_legs(dt);
        self.blend_head(t, dt);
        self.move_body(t);
        self.drift_color(t, dt);
    }

    /// Sync phase: rewrite the bone buffer from host-evaluated world matrices
    /// (indexed by JointId).
    pub fn sync_world(&mut self, world: &[Mat4]) {
        self.uniforms.bone_matrices.sync(&self.skeleton, world);
        self.uniforms.color = self.color.color();
    }

    fn blend_legs(&mut self, dt: f32) {
        let up = self.cfg.axes.up.normalize();
        let rate_leg = self.cfg.rates.leg;
        let rate_foot = self.cfg.rates.foot;
        for leg in &self.joints.legs {
            let (Some(rest_leg), Some(rest_foot)) = (
                self.poses.rest_pose(leg.leg),
                self.poses.rest_pose(leg.foot),
            ) else {
                continue;
            };
            let behavior = LegBehavior::select(leg.slot, &self.input);
            let target = leg_targets(
                behavior,
                rest_leg,
                rest_foot,
                leg.swing_axis,
                up,
                &self.cfg.legs,
            );

            let leg_local = self.skeleton.local_mut(leg.leg);
            leg_local.rotation = approach_quat(leg_local.rotation, target.leg, rate_leg, dt);
            let foot_local = self.skeleton.local_mut(leg.foot);
            foot_local.rotation = approach_quat(foot_local.rotation, target.foot, rate_foot, dt);
        }
    }

    fn blend_head(&mut self, t: f32, dt: f32) {
        let Some(rest) = self.poses.rest_pose(self.joints.head) else {
            return;
        };
        let target = head_target(rest, t, &self.input, &self.cfg.tempo, &self.cfg.head);
        self.head_euler = approach_vec3(self.head_euler, target, self.cfg.rates.head, dt);
        let e = self.head_euler;
        self.skeleton.local_mut(self.joints.head).rotation =
            Quat::from_euler(EULER_ORDER, e.x, e.y, e.z);
    }

    fn move_body(&mut self, t: f32) {
        let delta = body_delta(
            &self.input,
            t,
            &self.cfg.axes,
            &self.cfg.locomotion,
            &self.cfg.tempo,
        );
        self.skeleton.local_mut(self.joints.body).translation += delta;
    }

    fn drift_color(&mut self, t: f32, dt: f32) {
        self.color.step(dt);
        let crossed = self.beat.advance(t);
        if crossed == 0 {
            return;
        }
        self.color.reset();
        let last = self.beat.current();
        if crossed > MAX_BEAT_EVENTS {
            warn!(
                "beat: {} crossings in one tick, reporting the last {MAX_BEAT_EVENTS}",
                crossed
            );
        }
        let reported = crossed.min(MAX_BEAT_EVENTS) as i64;
        for beat_index in (last - reported + 1)..=last {
            trace!("beat {beat_index}: color reset");
            self.events.push(RigEvent::BeatReset { beat_index });
        }
    }
}

// Accessors
impl AnimationContext {
    pub fn config(&self) -> &RigConfig {
        &self.cfg
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn joints(&self) -> &RigJoints {
        &self.joints
    }

    pub fn rest_pose(&self, joint: JointId) -> Option<&RestPose> {
        self.poses.rest_pose(joint)
    }

    pub fn poses(&self) -> &PoseStore {
        &self.poses
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputState {
        &mut self.input
    }

    pub fn key_map(&self) -> &KeyMap {
        &self.key_map
    }

    pub fn key_map_mut(&mut self) -> &mut KeyMap {
        &mut self.key_map
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    /// Events emitted by the last tick.
    pub fn events(&self) -> &Events {
        &self.events
    }

    pub fn head_euler(&self) -> Vec3 {
        self.head_euler
    }

    pub fn color(&self) -> Vec3 {
        self.color.color()
    }

    pub fn uniforms(&self) -> &ShaderUniforms {
        &self.uniforms
    }

    pub fn bone_matrices(&self) -> &BoneMatrixBuffer {
        &self.uniforms.bone_matrices
    }

    pub fn flush_uniforms(&self, sink: &mut dyn UniformSink) {
        self.uniforms.flush(sink);
    }
}
