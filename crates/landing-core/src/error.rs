use thiserror::Error;

/// Failures raised while assembling the scene or decoding its assets.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("failed to parse glTF document: {0}")]
    ModelParse(#[from] gltf::Error),
    #[error("glTF buffer {index} is missing ({reason})")]
    ModelBuffer { index: usize, reason: String },
    #[error("glTF document contains no triangle geometry")]
    ModelEmpty,
    #[error("unsupported data URI: {0}")]
    UnsupportedDataUri(String),
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("model already attached to the scene")]
    ModelAlreadyAttached,
    #[error("failed to decode gradient texture: {0}")]
    TextureDecode(#[from] image::ImageError),
    #[error("gradient texture has no texels")]
    EmptyTexture,
}

pub type Result<T> = std::result::Result<T, SceneError>;
