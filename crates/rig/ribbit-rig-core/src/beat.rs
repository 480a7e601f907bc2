//! Beat counting and shader color drift.
//!
//! The tempo is a fixed constant, not extracted from audio. The beat counter is
//! `floor(t * bps * scale)`; every increase resets the skin color to the pulse
//! color, after which it drifts back toward the active color.

use glam::Vec3;

use crate::config::{Material, Tempo};
use crate::interp::approach_vec3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BeatCounter {
    beats_per_second: f32,
    scale: f32,
    last: i64,
}

impl BeatCounter {
    pub fn new(tempo: &Tempo) -> Self {
        Self {
            beats_per_second: tempo.beats_per_second,
            scale: tempo.beat_counter_scale,
            last: 0,
        }
    }

    #[inline]
    pub fn index_at(&self, elapsed: f32) -> i64 {
        (elapsed * self.beats_per_second * self.scale).floor() as i64
    }

    /// Last observed counter value.
    #[inline]
    pub fn current(&self) -> i64 {
        self.last
    }

    /// Observe the clock and return how many integer boundaries were crossed
    /// since the previous call. The counter never moves backwards.
    pub fn advance(&mut self, elapsed: f32) -> u64 {
        let index = self.index_at(elapsed);
        if index <= self.last {
            return 0;
        }
        let crossed = index.abs_diff(self.last);
        self.last = index;
        crossed
    }
}

/// Base color uniform driven toward the active color with beat-timed resets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorDrift {
    current: Vec3,
    active: Vec3,
    pulse: Vec3,
    rate: f32,
}

impl ColorDrift {
    /// Starts at the active color.
    pub fn new(material: &Material, rate: f32) -> Self {
        Self {
            current: material.active_color,
            active: material.active_color,
            pulse: material.pulse_color,
            rate,
        }
    }

    #[inline]
    pub fn color(&self) -> Vec3 {
        self.current
    }

    pub fn step(&mut self, dt: f32) {
        self.current = approach_vec3(self.current, self.active, self.rate, dt);
    }

    pub fn reset(&mut self) {
        self.current = self.pulse;
    }
}
