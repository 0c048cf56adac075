// Sanity checks on scene tuning constants.

use landing_core::*;

#[test]
fn motion_constants_are_positive() {
    assert!(SMOOTHING_RATE > 0.0);
    assert!(PARALLAX_GAIN > 0.0);
    assert!(ROTATION_RATE_X > 0.0 && ROTATION_RATE_Y > ROTATION_RATE_X);
}

#[test]
fn camera_frustum_is_valid() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_FAR > CAMERA_NEAR);
    assert!(CAMERA_FOV_DEG > 0.0 && CAMERA_FOV_DEG < 180.0);
    // every mesh sits inside the page sections
    let last = SECTION_MESHES.iter().map(|m| m.section).fold(0.0, f32::max);
    assert!(last < SECTION_COUNT as f32);
    assert!(CAMERA_Z < CAMERA_FAR);
}

#[test]
fn sections_are_ordered_down_the_page() {
    assert!(SECTION_MESHES.windows(2).all(|w| w[0].section < w[1].section));
}

#[test]
fn model_sits_in_its_section() {
    let section = -MODEL_POSITION.y / SECTION_SPACING;
    assert!(section > 1.0 && section < 2.0);
    assert!(MODEL_SCALE > 0.0);
}

#[test]
fn default_gradient_is_three_band() {
    let g = GradientMap::default();
    assert_eq!(g.width(), GRADIENT_STEPS);
    assert_eq!(g.filter, TextureFilter::Nearest);
}
