// Host-side tests for the procedural section meshes.

use fnv::FnvHashSet;
use glam::Vec3;
use landing_core::geometry::{compute_vertex_normals, wireframe_indices};
use landing_core::*;

fn counts(kind: MeshKind) -> (usize, usize) {
    let mesh = kind.build();
    assert_eq!(mesh.positions.len(), mesh.normals.len());
    (mesh.vertex_count(), mesh.triangle_count())
}

#[test]
fn section_meshes_have_expected_topology() {
    let expected = [
        ("torus", (1037, 1920)),
        ("sphere", (561, 960)),
        ("icosahedron", (60, 20)),
        ("cone", (100, 96)),
        ("capsule", (90, 128)),
    ];
    for (spec, (name, topology)) in SECTION_MESHES.iter().zip(expected) {
        assert_eq!(spec.kind.name(), name);
        assert_eq!(counts(spec.kind), topology, "{name}");
    }
}

#[test]
fn indices_stay_in_range() {
    for spec in SECTION_MESHES {
        let mesh = spec.kind.build();
        let n = mesh.vertex_count() as u32;
        assert!(mesh.indices.iter().all(|&i| i < n), "{}", spec.kind.name());
    }
}

#[test]
fn meshes_fit_their_radius() {
    let sphere = MeshKind::Sphere {
        radius: 0.3,
        width_segments: 32,
        height_segments: 16,
    }
    .build();
    for p in &sphere.positions {
        assert!((p.length() - 0.3).abs() < 1e-5);
    }

    let ico = MeshKind::Icosahedron { radius: 0.3 }.build();
    for p in &ico.positions {
        assert!((p.length() - 0.3).abs() < 1e-5);
    }

    // capsule spans length + 2 * radius along Y
    let capsule = MeshKind::Capsule {
        radius: 0.3,
        length: 0.3,
        cap_segments: 4,
        radial_segments: 8,
    }
    .build();
    let (lo, hi) = capsule
        .positions
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    assert!((lo + 0.45).abs() < 1e-5 && (hi - 0.45).abs() < 1e-5);
}

#[test]
fn cone_apex_is_up() {
    let cone = MeshKind::Cone {
        radius: 0.3,
        height: 0.6,
        radial_segments: 32,
    }
    .build();
    let top = cone.positions.iter().map(|p| p.y).fold(f32::MIN, f32::max);
    let bottom = cone.positions.iter().map(|p| p.y).fold(f32::MAX, f32::min);
    assert!((top - 0.3).abs() < 1e-6);
    assert!((bottom + 0.3).abs() < 1e-6);
    for p in cone.positions.iter().filter(|p| p.y > 0.29) {
        assert!(p.x.abs() < 1e-6 && p.z.abs() < 1e-6);
    }
}

#[test]
fn wireframe_lists_each_edge_once() {
    // two triangles sharing the 1-2 edge
    let lines = wireframe_indices(&[0, 1, 2, 2, 1, 3]);
    assert_eq!(lines.len(), 10);

    for spec in SECTION_MESHES {
        let mesh = spec.kind.build();
        let lines = mesh.wireframe_indices();
        assert_eq!(lines.len() % 2, 0);
        let mut seen = FnvHashSet::default();
        for pair in lines.chunks_exact(2) {
            assert_ne!(pair[0], pair[1]);
            let key = (pair[0].min(pair[1]), pair[0].max(pair[1]));
            assert!(seen.insert(key), "duplicate edge in {}", spec.kind.name());
        }
        for tri in mesh.indices.chunks_exact(3) {
            for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
                assert!(a == b || seen.contains(&(a.min(b), a.max(b))));
            }
        }
    }
}

#[test]
fn degenerate_edges_are_skipped() {
    assert_eq!(wireframe_indices(&[4, 4, 5]), vec![4, 5]);
    assert!(wireframe_indices(&[]).is_empty());
}

#[test]
fn computed_normals_follow_winding() {
    let positions = [Vec3::ZERO, Vec3::X, Vec3::Y, Vec3::new(5.0, 5.0, 5.0)];
    let normals = compute_vertex_normals(&positions, &[0, 1, 2]);
    assert_eq!(normals[0], Vec3::Z);
    assert_eq!(normals[2], Vec3::Z);
    // unused vertex falls back to +Y
    assert_eq!(normals[3], Vec3::Y);

    let flipped = compute_vertex_normals(&positions, &[0, 2, 1]);
    assert_eq!(flipped[1], Vec3::NEG_Z);
}

#[test]
fn interleaved_vertices_carry_color() {
    let mesh = MeshKind::Icosahedron { radius: 1.0 }.build();
    let verts = mesh.vertices(MATERIAL_COLOR);
    assert_eq!(verts.len(), 60);
    assert!(verts.iter().all(|v| v.color == MATERIAL_COLOR));
    assert_eq!(bytemuck::cast_slice::<Vertex, u8>(&verts).len(), 60 * 40);
}
