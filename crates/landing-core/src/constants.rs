use glam::Vec3;

// Shared scene layout and motion tuning constants.

// Page sections
pub const SECTION_SPACING: f32 = 4.0; // world-space depth between page sections
pub const SECTION_COUNT: usize = 6;

// Camera
pub const CAMERA_FOV_DEG: f32 = 35.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;
pub const CAMERA_Z: f32 = 6.0; // base depth of the camera inside its rig

// Motion
pub const PARALLAX_GAIN: f32 = 0.5; // cursor offset -> rig target
pub const SMOOTHING_RATE: f32 = 5.0; // per-second low-pass rate for the rig
pub const ROTATION_RATE_X: f32 = 0.05; // radians per second
pub const ROTATION_RATE_Y: f32 = 0.12;

// Renderer
pub const MAX_PIXEL_RATIO: f32 = 2.0;

// Particles
pub const PARTICLE_COUNT: usize = 800;
pub const PARTICLE_SPREAD: f32 = 10.0; // x/z extent of the field
pub const PARTICLE_SIZE: f32 = 0.03;

// Material
pub const MATERIAL_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0]; // #ffffff
pub const GRADIENT_STEPS: u32 = 3;

// Light
pub const LIGHT_POSITION: Vec3 = Vec3::new(1.0, 1.0, 0.0);
pub const LIGHT_INTENSITY: f32 = 1.0;

// Loaded model placement
pub const MODEL_SCALE: f32 = 0.06;
pub const MODEL_POSITION: Vec3 = Vec3::new(-1.7, -4.6, 0.0);
pub const MODEL_ROTATION: Vec3 = Vec3::new(0.2, 5.5, 0.0);

// Static assets, relative to the page
pub const MODEL_URL: &str = "models/scene.gltf";
pub const GRADIENT_URL: &str = "textures/gradients/3.jpg";
