//! Perspective camera mounted on a parallax rig.
//!
//! The rig is a parent transform that only translates. The camera sits
//! inside it at a fixed base depth and looks down -Z; its local vertical
//! position follows page scroll while the rig follows the cursor.

use crate::constants::{CAMERA_FAR, CAMERA_FOV_DEG, CAMERA_NEAR, CAMERA_Z};
use glam::{Mat4, Vec3};

/// Right-handed perspective camera, positioned relative to its rig.
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,
    pub aspect: f32,
    pub fovy_radians: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, CAMERA_Z),
            aspect,
            fovy_radians: CAMERA_FOV_DEG.to_radians(),
            znear: CAMERA_NEAR,
            zfar: CAMERA_FAR,
        }
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        if aspect.is_finite() && aspect > 0.0 {
            self.aspect = aspect;
        }
    }

    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }
}

#[derive(Clone, Debug)]
pub struct CameraRig {
    pub position: Vec3,
    pub camera: Camera,
}

impl CameraRig {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            camera: Camera::new(aspect),
        }
    }

    /// Camera position in world space.
    #[inline]
    pub fn eye(&self) -> Vec3 {
        self.position + self.camera.position
    }

    /// World-to-view transform. Neither the rig nor the camera rotates, so
    /// this is a pure translation.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.eye())
    }

    pub fn view_projection(&self) -> Mat4 {
        self.camera.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eye_combines_rig_and_camera() {
        let mut rig = CameraRig::new(1.0);
        rig.position = Vec3::new(0.25, 0.1, 0.0);
        rig.camera.position.y = -4.0;
        let eye = rig.eye();
        assert!((eye - Vec3::new(0.25, -3.9, CAMERA_Z)).length() < 1e-6);
    }

    #[test]
    fn origin_projects_in_front_of_camera() {
        let rig = CameraRig::new(16.0 / 9.0);
        let clip = rig.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0);
        let ndc_z = clip.z / clip.w;
        assert!((0.0..=1.0).contains(&ndc_z));
    }

    #[test]
    fn invalid_aspect_is_ignored() {
        let mut cam = Camera::new(2.0);
        cam.set_aspect(f32::INFINITY);
        assert_eq!(cam.aspect, 2.0);
    }
}
