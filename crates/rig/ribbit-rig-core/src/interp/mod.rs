//! Interpolation helpers for the blend engine.
//!
//! All blending uses the iterative approach law
//! `current += (target - current) * rate * dt`, reapplied every tick. The step
//! fraction `rate * dt` is neither converted to `1 - exp(-rate * dt)` nor
//! clamped, so on-screen speed depends on the frame rate.

pub mod functions;

pub use functions::{approach_f32, approach_quat, approach_vec3, step_fraction};
