//! glTF model decoding.
//!
//! Loading is split so the web front-end can fetch external buffers
//! asynchronously: parse the document, list its buffer sources, fetch what is
//! external, then flatten every triangle primitive of the default scene into
//! one vertex/index list with node transforms baked in.

use crate::error::{Result, SceneError};
use crate::geometry::{compute_vertex_normals, Vertex};
use base64::Engine;
use glam::{Mat3, Mat4, Vec3};

const DATA_URI_PREFIXES: [&str; 2] = [
    "data:application/octet-stream;base64,",
    "data:application/gltf-buffer;base64,",
];

/// Flattened triangle geometry of a loaded model, in model space.
#[derive(Clone, Debug, Default)]
pub struct ModelAsset {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl ModelAsset {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

/// Callbacks of the model loader, delivered as messages.
#[derive(Clone, Debug)]
pub enum LoadEvent {
    Progress { loaded: usize, total: usize },
    Loaded(ModelAsset),
    Failed(String),
}

#[inline]
pub fn progress_percent(loaded: usize, total: usize) -> f32 {
    if total == 0 {
        return 100.0;
    }
    (loaded as f32 / total as f32 * 100.0).clamp(0.0, 100.0)
}

#[derive(Clone, Debug, PartialEq)]
pub enum BufferSource {
    Embedded(Vec<u8>),
    External(String),
}

pub fn parse_document(bytes: &[u8]) -> Result<gltf::Gltf> {
    Ok(gltf::Gltf::from_slice(bytes)?)
}

/// Resolve every buffer either to bytes already at hand (GLB blob, data URI)
/// or to a URI that still has to be fetched.
pub fn buffer_sources(gltf: &gltf::Gltf) -> Result<Vec<BufferSource>> {
    gltf.buffers()
        .map(|buffer| match buffer.source() {
            gltf::buffer::Source::Bin => gltf
                .blob
                .clone()
                .map(BufferSource::Embedded)
                .ok_or_else(|| SceneError::ModelBuffer {
                    index: buffer.index(),
                    reason: "binary chunk missing".into(),
                }),
            gltf::buffer::Source::Uri(uri) if uri.starts_with("data:") => {
                decode_data_uri(uri).map(BufferSource::Embedded)
            }
            gltf::buffer::Source::Uri(uri) => Ok(BufferSource::External(uri.to_string())),
        })
        .collect()
}

pub fn decode_data_uri(uri: &str) -> Result<Vec<u8>> {
    let payload = DATA_URI_PREFIXES
        .iter()
        .find_map(|prefix| uri.strip_prefix(prefix))
        .ok_or_else(|| SceneError::UnsupportedDataUri(uri.chars().take(48).collect()))?;
    Ok(base64::engine::general_purpose::STANDARD.decode(payload)?)
}

/// Resolve a buffer URI relative to the URL the document came from.
pub fn resolve_uri(document_url: &str, uri: &str) -> String {
    if uri.contains("://") || uri.starts_with('/') {
        return uri.to_string();
    }
    match document_url.rfind('/') {
        Some(i) => format!("{}{}", &document_url[..=i], uri),
        None => uri.to_string(),
    }
}

/// Flatten the default scene (or every mesh when the document has no
/// scenes) into a single indexed triangle list.
pub fn build_model(gltf: &gltf::Gltf, buffers: &[Vec<u8>]) -> Result<ModelAsset> {
    for buffer in gltf.buffers() {
        let have = buffers.get(buffer.index()).map(Vec::len).unwrap_or(0);
        if have < buffer.length() {
            return Err(SceneError::ModelBuffer {
                index: buffer.index(),
                reason: format!("expected {} bytes, got {}", buffer.length(), have),
            });
        }
    }

    let mut asset = ModelAsset::default();
    match gltf.default_scene().or_else(|| gltf.scenes().next()) {
        Some(scene) => {
            let mut stack: Vec<(gltf::Node, Mat4)> =
                scene.nodes().map(|n| (n, Mat4::IDENTITY)).collect();
            while let Some((node, parent)) = stack.pop() {
                let world = parent * Mat4::from_cols_array_2d(&node.transform().matrix());
                if let Some(mesh) = node.mesh() {
                    append_mesh(&mut asset, &mesh, world, buffers);
                }
                stack.extend(node.children().map(|c| (c, world)));
            }
        }
        None => {
            for mesh in gltf.meshes() {
                append_mesh(&mut asset, &mesh, Mat4::IDENTITY, buffers);
            }
        }
    }

    if asset.indices.is_empty() {
        return Err(SceneError::ModelEmpty);
    }
    Ok(asset)
}

fn append_mesh(asset: &mut ModelAsset, mesh: &gltf::Mesh, world: Mat4, buffers: &[Vec<u8>]) {
    let normal_matrix = Mat3::from_mat4(world).inverse().transpose();
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            log::debug!(
                "[model] skipping {:?} primitive in mesh {:?}",
                primitive.mode(),
                mesh.name()
            );
            continue;
        }
        let reader = primitive.reader(|b| buffers.get(b.index()).map(Vec::as_slice));
        let Some(positions) = reader.read_positions() else {
            log::warn!("[model] primitive without positions in mesh {:?}", mesh.name());
            continue;
        };
        let positions: Vec<Vec3> = positions.map(Vec3::from).collect();
        let indices: Vec<u32> = match reader.read_indices() {
            Some(ix) => ix.into_u32().collect(),
            None => (0..positions.len() as u32).collect(),
        };
        if indices.iter().any(|&i| i as usize >= positions.len()) {
            log::warn!("[model] out-of-range index in mesh {:?}", mesh.name());
            continue;
        }
        let normals: Vec<Vec3> = match reader.read_normals() {
            Some(n) => n.map(Vec3::from).collect(),
            None => compute_vertex_normals(&positions, &indices),
        };
        let color = primitive
            .material()
            .pbr_metallic_roughness()
            .base_color_factor();

        let base = asset.vertices.len() as u32;
        asset
            .vertices
            .extend(positions.iter().zip(&normals).map(|(p, n)| Vertex {
                position: world.transform_point3(*p).to_array(),
                normal: (normal_matrix * *n).normalize_or_zero().to_array(),
                color,
            }));
        asset.indices.extend(indices.iter().map(|i| base + i));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_relative_buffer_uris() {
        assert_eq!(
            resolve_uri("models/scene.gltf", "scene.bin"),
            "models/scene.bin"
        );
        assert_eq!(resolve_uri("scene.gltf", "scene.bin"), "scene.bin");
        assert_eq!(
            resolve_uri("models/scene.gltf", "https://cdn.test/a.bin"),
            "https://cdn.test/a.bin"
        );
    }

    #[test]
    fn progress_handles_empty_totals() {
        assert_eq!(progress_percent(0, 0), 100.0);
        assert_eq!(progress_percent(1, 4), 25.0);
    }

    #[test]
    fn rejects_unknown_data_uri() {
        assert!(matches!(
            decode_data_uri("data:text/plain;base64,AAAA"),
            Err(SceneError::UnsupportedDataUri(_))
        ));
    }
}
