//! Per-frame camera and mesh update.
//!
//! Each frame the camera's local height follows page scroll directly, the
//! rig eases toward a cursor-driven parallax target, and every section mesh
//! takes a rotation that is a pure function of elapsed time.

use crate::constants::{
    PARALLAX_GAIN, ROTATION_RATE_X, ROTATION_RATE_Y, SECTION_SPACING, SMOOTHING_RATE,
};
use crate::input::InputState;
use crate::scene::Scene;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    pub section_spacing: f32,
    pub parallax_gain: f32,
    pub smoothing_rate: f32,
    /// Radians per second around x and y.
    pub rotation_rate: Vec2,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            section_spacing: SECTION_SPACING,
            parallax_gain: PARALLAX_GAIN,
            smoothing_rate: SMOOTHING_RATE,
            rotation_rate: Vec2::new(ROTATION_RATE_X, ROTATION_RATE_Y),
        }
    }
}

/// What one update computed; handy for tracing and tests.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewUpdate {
    pub delta: f32,
    pub camera_offset: f32,
    pub parallax_target: Vec2,
}

#[derive(Clone, Debug, Default)]
pub struct ViewLoop {
    pub config: ViewConfig,
    previous_elapsed: f64,
}

impl ViewLoop {
    pub fn new(config: ViewConfig) -> Self {
        Self {
            config,
            previous_elapsed: 0.0,
        }
    }

    pub fn previous_elapsed(&self) -> f64 {
        self.previous_elapsed
    }

    pub fn update(&mut self, elapsed: f64, input: &InputState, scene: &mut Scene) -> ViewUpdate {
        let delta = (elapsed - self.previous_elapsed) as f32;
        self.previous_elapsed = elapsed;

        let camera_offset = camera_vertical_offset(
            input.scroll_y,
            input.viewport.height as f32,
            self.config.section_spacing,
        );
        scene.rig.camera.position.y = camera_offset;

        let target = parallax_target(input.cursor, self.config.parallax_gain);
        let rig = &mut scene.rig.position;
        rig.x = smooth_toward(rig.x, target.x, self.config.smoothing_rate, delta);
        rig.y = smooth_toward(rig.y, target.y, self.config.smoothing_rate, delta);

        let rotation = mesh_rotation(elapsed, self.config.rotation_rate);
        for mesh in &mut scene.meshes {
            mesh.transform.rotation.x = rotation.x;
            mesh.transform.rotation.y = rotation.y;
        }

        ViewUpdate {
            delta,
            camera_offset,
            parallax_target: target,
        }
    }
}

/// Scroll maps linearly onto depth: one viewport height of scroll moves the
/// camera down one section. No upper clamp; scrolling past the last section
/// moves the camera past the last mesh.
#[inline]
pub fn camera_vertical_offset(scroll_y: f32, viewport_height: f32, section_spacing: f32) -> f32 {
    -(scroll_y / viewport_height.max(1.0)) * section_spacing
}

/// Screen y grows downward, world y grows upward.
#[inline]
pub fn parallax_target(cursor: Vec2, gain: f32) -> Vec2 {
    Vec2::new(cursor.x * gain, -cursor.y * gain)
}

/// First-order low-pass step. Does not overshoot while `rate * delta <= 1`.
#[inline]
pub fn smooth_toward(current: f32, target: f32, rate: f32, delta: f32) -> f32 {
    current + (target - current) * rate * delta
}

#[inline]
pub fn mesh_rotation(elapsed: f64, rate: Vec2) -> Vec2 {
    Vec2::new(
        (elapsed * rate.x as f64) as f32,
        (elapsed * rate.y as f64) as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_delta_leaves_value_unchanged() {
        assert_eq!(smooth_toward(0.3, 1.0, 5.0, 0.0), 0.3);
    }

    #[test]
    fn full_step_lands_on_target() {
        let v = smooth_toward(-0.2, 0.25, 5.0, 0.2);
        assert!((v - 0.25).abs() < 1e-6);
    }
}
