// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    assert!(CAMERA_NEAR > 0.0 && CAMERA_NEAR < CAMERA_FAR);
    assert!(CAMERA_FOV_Y_DEG > 0.0 && CAMERA_FOV_Y_DEG < 180.0);
    assert!(ZOOM_DURATION_SEC > 0.0);
    assert!(CLICK_DEAD_ZONE_PX >= 0.0);

    // Glass stays see-through
    assert!(PROFILE_OPACITY > 0.0 && PROFILE_OPACITY < 1.0);
    for v in [
        PROFILE_ROUGHNESS,
        PROFILE_METALNESS,
        PROFILE_REFLECTIVITY,
        PROFILE_CLEARCOAT,
        PROFILE_CLEARCOAT_ROUGHNESS,
    ] {
        assert!((0.0..=1.0).contains(&v));
    }
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn layout_keeps_spheres_apart_and_inside_orbits() {
    // Neighbouring spheres never overlap
    assert!(PROFILE_OFFSET >= PROFILE_RADIUS);
    // Markers orbit outside the cross
    assert!(MARKER_ORBIT_RADIUS * MARKER_DIAGONAL_SCALE > PROFILE_OFFSET * 2.0);
    // The camera starts outside every orbit
    assert!(CAMERA_Z > MARKER_ORBIT_RADIUS + MARKER_RADIUS);
}

#[test]
fn every_sphere_has_assets() {
    assert_eq!(THUMBNAIL_IMAGES.len(), PROFILE_COUNT);
    assert_eq!(VIDEO_URLS.len(), PROFILE_COUNT);
    for url in VIDEO_URLS {
        assert!(url.starts_with("https://www.youtube.com/embed/"));
        assert!(url.ends_with("?autoplay=1"));
    }
    assert_eq!(MARKER_COLORS.len(), MARKER_COUNT);
}

#[test]
#[allow(clippy::assertions_on_constants)]
fn bloom_leaves_lit_glass_alone() {
    // Fully lit, fully opaque white stays at 1.0, below the bright-pass cut
    assert!(BLOOM_THRESHOLD >= 1.0);
    assert!(BLOOM_STRENGTH > 0.0 && BLOOM_STRENGTH <= 0.5);
    // Emissive markers push past it on top of their lit colour
    assert!(1.0 + MARKER_EMISSIVE_INTENSITY > BLOOM_THRESHOLD);
}
