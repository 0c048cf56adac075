// Shared fixtures for the host-side tests.

#![allow(dead_code)]

use glam::Vec3;
use landing_core::{InputState, RenderStatus, Scene, SceneRenderer, Viewport};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Renderer stand-in that records what the frame loop asked of it.
#[derive(Default)]
pub struct RecordingRenderer {
    pub renders: usize,
    pub sizes: Vec<(u32, u32)>,
    pub last_eye: Option<Vec3>,
    pub fail: bool,
    pub skip: bool,
}

impl SceneRenderer for RecordingRenderer {
    fn resize(&mut self, viewport: &Viewport) {
        self.sizes.push((viewport.width, viewport.height));
    }

    fn render(&mut self, scene: &Scene) -> anyhow::Result<RenderStatus> {
        self.renders += 1;
        self.last_eye = Some(scene.rig.eye());
        if self.fail {
            anyhow::bail!("out of memory");
        }
        if self.skip {
            return Ok(RenderStatus::Skipped);
        }
        Ok(RenderStatus::Presented)
    }
}

pub fn viewport(width: u32, height: u32) -> Viewport {
    Viewport::new(width, height, 1.0)
}

pub fn scene(viewport: &Viewport) -> Scene {
    Scene::assemble(viewport, &mut StdRng::seed_from_u64(7))
}

pub fn input(viewport: Viewport) -> InputState {
    InputState::new(viewport, 0.0)
}
