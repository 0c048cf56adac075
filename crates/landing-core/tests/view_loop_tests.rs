// Host-side tests for the per-frame camera and mesh update.

mod common;

use glam::{Vec2, Vec3};
use landing_core::*;

#[test]
fn smoothing_moves_strictly_between_current_and_target() {
    let cases = [(0.0_f32, 0.25_f32), (0.3, -0.25), (-0.1, 0.1)];
    for (current, target) in cases {
        // rate * delta from 0.05 up to 0.95
        for step in 1..20 {
            let delta = step as f32 * 0.01;
            let next = smooth_toward(current, target, SMOOTHING_RATE, delta);
            let (lo, hi) = if current < target {
                (current, target)
            } else {
                (target, current)
            };
            assert!(
                next > lo && next < hi,
                "current={current} target={target} delta={delta} -> {next}"
            );
        }
    }
}

#[test]
fn smoothing_converges_monotonically_at_display_rate() {
    let mut value = 0.0_f32;
    let target = 0.25_f32;
    let mut previous_gap = (target - value).abs();
    for _ in 0..120 {
        value = smooth_toward(value, target, SMOOTHING_RATE, 1.0 / 60.0);
        let gap = (target - value).abs();
        assert!(gap < previous_gap);
        previous_gap = gap;
    }
    assert!(previous_gap < 1e-3);
}

#[test]
fn mesh_rotation_is_a_pure_function_of_elapsed_time() {
    let vp = common::viewport(1280, 800);
    let mut scene = common::scene(&vp);
    let input = common::input(vp);
    let mut view = ViewLoop::default();

    view.update(3.0, &input, &mut scene);
    let first: Vec<Vec3> = scene.meshes.iter().map(|m| m.transform.rotation).collect();

    view.update(10.0, &input, &mut scene);
    view.update(3.0, &input, &mut scene);
    let again: Vec<Vec3> = scene.meshes.iter().map(|m| m.transform.rotation).collect();

    assert_eq!(first, again);
    for r in first {
        assert!((r.x - 0.15).abs() < 1e-6);
        assert!((r.y - 0.36).abs() < 1e-6);
        assert_eq!(r.z, 0.0);
    }
}

#[test]
fn mesh_rotation_matches_rates() {
    let rate = ViewConfig::default().rotation_rate;
    for t in [0.0, 0.5, 12.25, 600.0] {
        let r = mesh_rotation(t, rate);
        assert!((r.x as f64 - 0.05 * t).abs() < 1e-4);
        assert!((r.y as f64 - 0.12 * t).abs() < 1e-4);
    }
}

#[test]
fn camera_offset_is_linear_in_scroll() {
    assert_eq!(camera_vertical_offset(0.0, 800.0, 4.0), 0.0);
    assert_eq!(camera_vertical_offset(800.0, 800.0, 4.0), -4.0);
    assert_eq!(camera_vertical_offset(400.0, 800.0, 4.0), -2.0);
    // no clamp past the last section
    assert_eq!(camera_vertical_offset(8000.0, 800.0, 4.0), -40.0);
}

#[test]
fn zero_height_viewport_keeps_camera_finite() {
    let offset = camera_vertical_offset(120.0, 0.0, SECTION_SPACING);
    assert!(offset.is_finite());
}

#[test]
fn parallax_target_flips_vertical_axis() {
    assert_eq!(
        parallax_target(Vec2::new(0.5, -0.5), 0.5),
        Vec2::new(0.25, 0.25)
    );
    assert_eq!(parallax_target(Vec2::ZERO, 0.5), Vec2::ZERO);
}

#[test]
fn scroll_and_cursor_scenario() {
    let vp = common::viewport(1280, 800);
    let mut scene = common::scene(&vp);
    let mut input = common::input(vp);
    let mut view = ViewLoop::default();

    let update = view.update(0.0, &input, &mut scene);
    assert_eq!(update.camera_offset, 0.0);
    assert_eq!(scene.rig.camera.position.y, 0.0);

    input.apply(InputEvent::Scroll { offset_y: 800.0 });
    input.apply(InputEvent::PointerMove {
        client_x: 1280.0,
        client_y: 0.0,
    });
    assert_eq!(input.cursor, Vec2::new(0.5, -0.5));

    let update = view.update(1.0 / 60.0, &input, &mut scene);
    assert_eq!(update.camera_offset, -4.0);
    assert_eq!(scene.rig.camera.position.y, -4.0);
    assert_eq!(update.parallax_target, Vec2::new(0.25, 0.25));
    assert!(scene.rig.position.x > 0.0 && scene.rig.position.x < 0.25);
    assert!(scene.rig.position.y > 0.0 && scene.rig.position.y < 0.25);

    // the rig settles on the target, the camera depth does not move
    let mut t = 1.0 / 60.0;
    for _ in 0..180 {
        t += 1.0 / 60.0;
        view.update(t, &input, &mut scene);
    }
    assert!((scene.rig.position.x - 0.25).abs() < 1e-3);
    assert!((scene.rig.position.y - 0.25).abs() < 1e-3);
    assert_eq!(scene.rig.camera.position.y, -4.0);
    assert_eq!(scene.rig.camera.position.z, CAMERA_Z);
}

#[test]
fn delta_is_measured_against_previous_call() {
    let vp = common::viewport(800, 600);
    let mut scene = common::scene(&vp);
    let input = common::input(vp);
    let mut view = ViewLoop::default();

    assert!((view.update(0.5, &input, &mut scene).delta - 0.5).abs() < 1e-6);
    assert!((view.update(0.75, &input, &mut scene).delta - 0.25).abs() < 1e-6);
    assert_eq!(view.update(0.75, &input, &mut scene).delta, 0.0);
    assert_eq!(view.previous_elapsed(), 0.75);
}

#[test]
fn updates_never_move_meshes_or_particles() {
    let vp = common::viewport(1024, 768);
    let mut scene = common::scene(&vp);
    let mut input = common::input(vp);
    let mut view = ViewLoop::default();

    let positions: Vec<Vec3> = scene.meshes.iter().map(|m| m.transform.position).collect();
    let particles = scene.particles.positions().to_vec();

    for frame in 0..240 {
        input.apply(InputEvent::Scroll {
            offset_y: frame as f32 * 10.0,
        });
        input.apply(InputEvent::PointerMove {
            client_x: (frame * 3 % 1024) as f32,
            client_y: (frame * 7 % 768) as f32,
        });
        view.update(frame as f64 / 60.0, &input, &mut scene);
    }

    let after: Vec<Vec3> = scene.meshes.iter().map(|m| m.transform.position).collect();
    assert_eq!(positions, after);
    assert_eq!(particles, scene.particles.positions());
    assert_eq!(scene.particles.len(), PARTICLE_COUNT);
}
