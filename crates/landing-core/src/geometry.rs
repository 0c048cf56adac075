//! Procedural primitives for the decorative meshes.
//!
//! Parameterization and vertex layout follow the usual web 3D primitives
//! (torus, UV sphere, icosahedron, cone, capsule) so the scene constants read
//! the same way as their radius/segment counts suggest. All meshes are
//! indexed triangle lists with counter-clockwise outward faces.

use fnv::FnvHashSet;
use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI, TAU};

/// GPU vertex shared by the wireframe meshes and the loaded model.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 4],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleave into GPU vertices with a flat color.
    pub fn vertices(&self, color: [f32; 4]) -> Vec<Vertex> {
        self.positions
            .iter()
            .zip(&self.normals)
            .map(|(p, n)| Vertex {
                position: p.to_array(),
                normal: n.to_array(),
                color,
            })
            .collect()
    }

    /// Line-list indices covering every triangle edge once.
    pub fn wireframe_indices(&self) -> Vec<u32> {
        wireframe_indices(&self.indices)
    }
}

pub fn wireframe_indices(triangles: &[u32]) -> Vec<u32> {
    let mut seen: FnvHashSet<(u32, u32)> = FnvHashSet::default();
    let mut lines = Vec::with_capacity(triangles.len() * 2);
    for tri in triangles.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            if a == b {
                continue;
            }
            let key = (a.min(b), a.max(b));
            if seen.insert(key) {
                lines.push(a);
                lines.push(b);
            }
        }
    }
    lines
}

/// Smooth vertex normals from area-weighted face normals.
pub fn compute_vertex_normals(positions: &[Vec3], indices: &[u32]) -> Vec<Vec3> {
    let mut normals = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let (ia, ib, ic) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
        if ia >= positions.len() || ib >= positions.len() || ic >= positions.len() {
            continue;
        }
        let face = (positions[ib] - positions[ia]).cross(positions[ic] - positions[ia]);
        normals[ia] += face;
        normals[ib] += face;
        normals[ic] += face;
    }
    normals
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y))
        .collect()
}

/// Shape and parameters of one decorative mesh.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MeshKind {
    Torus {
        radius: f32,
        tube: f32,
        radial_segments: u32,
        tubular_segments: u32,
    },
    Sphere {
        radius: f32,
        width_segments: u32,
        height_segments: u32,
    },
    Icosahedron {
        radius: f32,
    },
    Cone {
        radius: f32,
        height: f32,
        radial_segments: u32,
    },
    Capsule {
        radius: f32,
        length: f32,
        cap_segments: u32,
        radial_segments: u32,
    },
}

impl MeshKind {
    pub fn name(&self) -> &'static str {
        match self {
            MeshKind::Torus { .. } => "torus",
            MeshKind::Sphere { .. } => "sphere",
            MeshKind::Icosahedron { .. } => "icosahedron",
            MeshKind::Cone { .. } => "cone",
            MeshKind::Capsule { .. } => "capsule",
        }
    }

    pub fn build(&self) -> MeshData {
        match *self {
            MeshKind::Torus {
                radius,
                tube,
                radial_segments,
                tubular_segments,
            } => torus(radius, tube, radial_segments, tubular_segments),
            MeshKind::Sphere {
                radius,
                width_segments,
                height_segments,
            } => sphere(radius, width_segments, height_segments),
            MeshKind::Icosahedron { radius } => icosahedron(radius),
            MeshKind::Cone {
                radius,
                height,
                radial_segments,
            } => cone(radius, height, radial_segments),
            MeshKind::Capsule {
                radius,
                length,
                cap_segments,
                radial_segments,
            } => capsule(radius, length, cap_segments, radial_segments),
        }
    }
}

pub fn torus(radius: f32, tube: f32, radial_segments: u32, tubular_segments: u32) -> MeshData {
    let radial = radial_segments.max(2);
    let tubular = tubular_segments.max(3);
    let mut mesh = MeshData::default();
    for j in 0..=radial {
        let v = j as f32 / radial as f32 * TAU;
        for i in 0..=tubular {
            let u = i as f32 / tubular as f32 * TAU;
            let ring = radius + tube * v.cos();
            let p = Vec3::new(ring * u.cos(), ring * u.sin(), tube * v.sin());
            let center = Vec3::new(radius * u.cos(), radius * u.sin(), 0.0);
            mesh.positions.push(p);
            mesh.normals.push((p - center).normalize_or_zero());
        }
    }
    let row = tubular + 1;
    for j in 1..=radial {
        for i in 1..=tubular {
            let a = row * j + i - 1;
            let b = row * (j - 1) + i - 1;
            let c = row * (j - 1) + i;
            let d = row * j + i;
            mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
        }
    }
    mesh
}

pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> MeshData {
    let w = width_segments.max(3);
    let h = height_segments.max(2);
    let mut mesh = MeshData::default();
    for iy in 0..=h {
        let v = iy as f32 / h as f32;
        for ix in 0..=w {
            let u = ix as f32 / w as f32;
            let p = Vec3::new(
                -radius * (u * TAU).cos() * (v * PI).sin(),
                radius * (v * PI).cos(),
                radius * (u * TAU).sin() * (v * PI).sin(),
            );
            mesh.positions.push(p);
            mesh.normals.push(p.normalize_or_zero());
        }
    }
    let row = w + 1;
    for iy in 0..h {
        for ix in 0..w {
            let a = iy * row + ix + 1;
            let b = iy * row + ix;
            let c = (iy + 1) * row + ix;
            let d = (iy + 1) * row + ix + 1;
            if iy != 0 {
                mesh.indices.extend_from_slice(&[a, b, d]);
            }
            if iy != h - 1 {
                mesh.indices.extend_from_slice(&[b, c, d]);
            }
        }
    }
    mesh
}

const ICOSAHEDRON_FACES: [[usize; 3]; 20] = [
    [0, 11, 5],
    [0, 5, 1],
    [0, 1, 7],
    [0, 7, 10],
    [0, 10, 11],
    [1, 5, 9],
    [5, 11, 4],
    [11, 10, 2],
    [10, 7, 6],
    [7, 1, 8],
    [3, 9, 4],
    [3, 4, 2],
    [3, 2, 6],
    [3, 6, 8],
    [3, 8, 9],
    [4, 9, 5],
    [2, 4, 11],
    [6, 2, 10],
    [8, 6, 7],
    [9, 8, 1],
];

/// Flat-shaded icosahedron: every face owns its three vertices.
pub fn icosahedron(radius: f32) -> MeshData {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let corners = [
        Vec3::new(-1.0, t, 0.0),
        Vec3::new(1.0, t, 0.0),
        Vec3::new(-1.0, -t, 0.0),
        Vec3::new(1.0, -t, 0.0),
        Vec3::new(0.0, -1.0, t),
        Vec3::new(0.0, 1.0, t),
        Vec3::new(0.0, -1.0, -t),
        Vec3::new(0.0, 1.0, -t),
        Vec3::new(t, 0.0, -1.0),
        Vec3::new(t, 0.0, 1.0),
        Vec3::new(-t, 0.0, -1.0),
        Vec3::new(-t, 0.0, 1.0),
    ]
    .map(|c| c.normalize() * radius);

    let mut mesh = MeshData::default();
    for face in ICOSAHEDRON_FACES {
        let [a, b, c] = face.map(|i| corners[i]);
        let n = (b - a).cross(c - a).normalize_or_zero();
        let base = mesh.positions.len() as u32;
        mesh.positions.extend_from_slice(&[a, b, c]);
        mesh.normals.extend_from_slice(&[n, n, n]);
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2]);
    }
    mesh
}

/// Cone with its apex up and a closed base.
pub fn cone(radius: f32, height: f32, radial_segments: u32) -> MeshData {
    let radial = radial_segments.max(3);
    let half = height / 2.0;
    let slope = radius / height.max(f32::EPSILON);
    let mut mesh = MeshData::default();

    // side: apex row then base row
    for row in 0..=1u32 {
        let r = row as f32 * radius;
        let y = half - row as f32 * height;
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            let (s, c) = theta.sin_cos();
            mesh.positions.push(Vec3::new(r * s, y, r * c));
            mesh.normals.push(Vec3::new(s, slope, c).normalize());
        }
    }
    let row = radial + 1;
    for x in 0..radial {
        let a = x;
        let b = row + x;
        let c = row + x + 1;
        let d = x + 1;
        mesh.indices.extend_from_slice(&[a, b, d, b, c, d]);
    }

    // base cap
    let center = mesh.positions.len() as u32;
    mesh.positions.push(Vec3::new(0.0, -half, 0.0));
    mesh.normals.push(Vec3::NEG_Y);
    let ring = mesh.positions.len() as u32;
    for x in 0..=radial {
        let theta = x as f32 / radial as f32 * TAU;
        let (s, c) = theta.sin_cos();
        mesh.positions.push(Vec3::new(radius * s, -half, radius * c));
        mesh.normals.push(Vec3::NEG_Y);
    }
    for x in 0..radial {
        let i = ring + x;
        mesh.indices.extend_from_slice(&[i + 1, i, center]);
    }
    mesh
}

/// Cylinder of `length` capped by two hemispheres of `radius`, built by
/// revolving a profile around the Y axis.
pub fn capsule(radius: f32, length: f32, cap_segments: u32, radial_segments: u32) -> MeshData {
    let caps = cap_segments.max(1);
    let radial = radial_segments.max(3);
    let half = length / 2.0;

    // (radius, y, normal.x, normal.y) from the bottom pole to the top pole
    let mut profile = Vec::with_capacity(2 * (caps as usize + 1));
    for i in 0..=caps {
        let a = -FRAC_PI_2 + i as f32 / caps as f32 * FRAC_PI_2;
        profile.push((radius * a.cos(), -half + radius * a.sin(), a.cos(), a.sin()));
    }
    for i in 0..=caps {
        let a = i as f32 / caps as f32 * FRAC_PI_2;
        profile.push((radius * a.cos(), half + radius * a.sin(), a.cos(), a.sin()));
    }

    let mut mesh = MeshData::default();
    for &(pr, py, nx, ny) in &profile {
        for x in 0..=radial {
            let theta = x as f32 / radial as f32 * TAU;
            let (s, c) = theta.sin_cos();
            mesh.positions.push(Vec3::new(pr * s, py, pr * c));
            mesh.normals.push(Vec3::new(nx * s, ny, nx * c).normalize_or_zero());
        }
    }
    let rows = profile.len() as u32;
    let row = radial + 1;
    for j in 0..rows - 1 {
        for x in 0..radial {
            let p00 = j * row + x;
            let p10 = j * row + x + 1;
            let p01 = (j + 1) * row + x;
            let p11 = (j + 1) * row + x + 1;
            // skip the collapsed triangles at both poles
            if j != 0 {
                mesh.indices.extend_from_slice(&[p00, p10, p11]);
            }
            if j != rows - 2 {
                mesh.indices.extend_from_slice(&[p00, p11, p01]);
            }
        }
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_outward(mesh: &MeshData) {
        let centroid = mesh.positions.iter().copied().sum::<Vec3>() / mesh.positions.len() as f32;
        for tri in mesh.indices.chunks_exact(3) {
            let [a, b, c] = [tri[0], tri[1], tri[2]].map(|i| mesh.positions[i as usize]);
            let n = (b - a).cross(c - a);
            if n.length() < 1e-7 {
                continue;
            }
            let mid = (a + b + c) / 3.0;
            assert!(n.dot(mid - centroid) > -1e-5, "inward face at {mid:?}");
        }
    }

    #[test]
    fn sphere_and_icosahedron_face_outward() {
        assert_outward(&sphere(0.3, 32, 16));
        assert_outward(&icosahedron(0.3));
        assert_outward(&capsule(0.3, 0.3, 4, 8));
    }

    #[test]
    fn normals_are_unit_length() {
        for mesh in [
            torus(1.3, 0.2, 16, 60),
            sphere(0.3, 32, 16),
            cone(0.3, 0.6, 32),
            capsule(0.3, 0.3, 4, 8),
        ] {
            for n in &mesh.normals {
                assert!((n.length() - 1.0).abs() < 1e-4);
            }
        }
    }
}
