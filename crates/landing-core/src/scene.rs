//! Declarative scene assembly: camera rig, section meshes, particle field,
//! light and the slot the loaded model drops into.

use crate::camera::CameraRig;
use crate::constants::*;
use crate::error::{Result, SceneError};
use crate::geometry::MeshKind;
use crate::input::Viewport;
use crate::model::ModelAsset;
use glam::{EulerRot, Mat4, Quat, Vec3};
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    /// Euler angles in radians, applied in XYZ order.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    pub fn quat(&self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.rotation.x, self.rotation.y, self.rotation.z)
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.quat(), self.position)
    }
}

/// Placement of one decorative mesh on the page.
#[derive(Clone, Copy, Debug)]
pub struct MeshSpec {
    pub kind: MeshKind,
    pub x: f32,
    /// Page section the mesh belongs to; y = -SECTION_SPACING * section.
    pub section: f32,
}

pub const SECTION_MESHES: [MeshSpec; 5] = [
    MeshSpec {
        kind: MeshKind::Torus {
            radius: 1.3,
            tube: 0.2,
            radial_segments: 16,
            tubular_segments: 60,
        },
        x: 1.5,
        section: 0.0,
    },
    MeshSpec {
        kind: MeshKind::Sphere {
            radius: 0.3,
            width_segments: 32,
            height_segments: 16,
        },
        x: -2.0,
        section: 1.6,
    },
    MeshSpec {
        kind: MeshKind::Icosahedron { radius: 0.3 },
        x: 0.0,
        section: 2.6,
    },
    MeshSpec {
        kind: MeshKind::Cone {
            radius: 0.3,
            height: 0.6,
            radial_segments: 32,
        },
        x: 1.3,
        section: 3.5,
    },
    MeshSpec {
        kind: MeshKind::Capsule {
            radius: 0.3,
            length: 0.3,
            cap_segments: 4,
            radial_segments: 8,
        },
        x: -1.2,
        section: 4.5,
    },
];

#[derive(Clone, Debug)]
pub struct DecorativeMesh {
    pub kind: MeshKind,
    pub transform: Transform,
}

/// Wireframe toon material shared by the section meshes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Material {
    pub color: [f32; 4],
    pub wireframe: bool,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: MATERIAL_COLOR,
            wireframe: true,
        }
    }
}

#[derive(Clone, Debug)]
pub struct ParticleField {
    positions: Vec<Vec3>,
    pub size: f32,
    pub color: [f32; 4],
}

impl ParticleField {
    /// Scatter `count` points: x/z across the field width, y from half a
    /// section above the top down through every section.
    pub fn scatter<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let top = SECTION_SPACING * 0.5;
        let depth = SECTION_SPACING * SECTION_COUNT as f32;
        let positions = (0..count)
            .map(|_| {
                Vec3::new(
                    (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
                    top - rng.gen::<f32>() * depth,
                    (rng.gen::<f32>() - 0.5) * PARTICLE_SPREAD,
                )
            })
            .collect();
        Self {
            positions,
            size: PARTICLE_SIZE,
            color: MATERIAL_COLOR,
        }
    }

    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
pub struct DirectionalLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

impl DirectionalLight {
    /// Unit vector pointing from the lit surface toward the light, which
    /// shines at the origin.
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

impl Default for DirectionalLight {
    fn default() -> Self {
        Self {
            position: LIGHT_POSITION,
            color: [1.0, 1.0, 1.0],
            intensity: LIGHT_INTENSITY,
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlacedModel {
    pub asset: ModelAsset,
    pub transform: Transform,
}

pub struct Scene {
    pub rig: CameraRig,
    pub meshes: Vec<DecorativeMesh>,
    pub material: Material,
    pub particles: ParticleField,
    pub light: DirectionalLight,
    model: Option<PlacedModel>,
}

impl Scene {
    pub fn assemble<R: Rng + ?Sized>(viewport: &Viewport, rng: &mut R) -> Self {
        let meshes = SECTION_MESHES
            .iter()
            .map(|spec| DecorativeMesh {
                kind: spec.kind,
                transform: Transform::from_position(Vec3::new(
                    spec.x,
                    -SECTION_SPACING * spec.section,
                    0.0,
                )),
            })
            .collect::<Vec<_>>();
        let particles = ParticleField::scatter(PARTICLE_COUNT, rng);
        log::info!(
            "[scene] meshes={} particles={} aspect={:.3}",
            meshes.len(),
            particles.len(),
            viewport.aspect()
        );
        Self {
            rig: CameraRig::new(viewport.aspect()),
            meshes,
            material: Material::default(),
            particles,
            light: DirectionalLight::default(),
            model: None,
        }
    }

    pub fn model(&self) -> Option<&PlacedModel> {
        self.model.as_ref()
    }

    /// Insert the loaded model at its fixed placement. Only the first model
    /// is accepted.
    pub fn attach_model(&mut self, asset: ModelAsset) -> Result<()> {
        if self.model.is_some() {
            return Err(SceneError::ModelAlreadyAttached);
        }
        let transform = Transform {
            position: MODEL_POSITION,
            rotation: MODEL_ROTATION,
            scale: Vec3::splat(MODEL_SCALE),
        };
        self.model = Some(PlacedModel { asset, transform });
        Ok(())
    }
}
