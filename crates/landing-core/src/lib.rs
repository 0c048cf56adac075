pub mod assets;
pub mod camera;
pub mod clock;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod input;
pub mod model;
pub mod runner;
pub mod scene;
pub mod texture;
pub mod view;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use assets::AssetPaths;
pub use camera::*;
pub use clock::*;
pub use constants::*;
pub use error::SceneError;
pub use geometry::{MeshData, MeshKind, Vertex};
pub use input::*;
pub use model::{LoadEvent, ModelAsset};
pub use runner::*;
pub use scene::*;
pub use texture::*;
pub use view::*;
