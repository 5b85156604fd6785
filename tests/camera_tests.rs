// Host-side tests for the camera and screen-to-ray conversion.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}

use camera::*;
use glam::{Vec2, Vec3};

#[test]
fn client_corners_map_to_ndc_corners() {
    assert_eq!(client_to_ndc(0.0, 0.0, 800.0, 600.0), Vec2::new(-1.0, 1.0));
    assert_eq!(client_to_ndc(800.0, 600.0, 800.0, 600.0), Vec2::new(1.0, -1.0));
    assert_eq!(client_to_ndc(400.0, 300.0, 800.0, 600.0), Vec2::ZERO);
}

#[test]
fn camera_starts_home() {
    let c = Camera::new(4.0 / 3.0);
    assert_eq!(c.eye, Vec3::new(0.0, 0.0, 10.0));
    assert_eq!(Camera::home(), c.eye);
    assert!((c.fovy_radians - 75f32.to_radians()).abs() < 1e-6);
}

#[test]
fn invalid_aspect_falls_back_to_square() {
    assert_eq!(Camera::new(0.0).aspect, 1.0);
    assert_eq!(Camera::new(f32::NAN).aspect, 1.0);
}

#[test]
fn center_ray_looks_down_negative_z() {
    let c = Camera::new(16.0 / 9.0);
    let r = c.ray_through_ndc(Vec2::ZERO);
    assert_eq!(r.origin, c.eye);
    assert!(r.dir.distance(Vec3::NEG_Z) < 1e-4);
}

#[test]
fn ray_passes_through_projected_point() {
    let mut c = Camera::new(4.0 / 3.0);
    c.eye = Vec3::new(1.0, -0.5, 6.0);
    let p = Vec3::new(2.1, 0.3, -1.0);
    let ndc = c.view_proj().project_point3(p);
    let r = c.ray_through_ndc(Vec2::new(ndc.x, ndc.y));
    let to_p = p - r.origin;
    let along = to_p.dot(r.dir);
    assert!(along > 0.0);
    assert!((r.origin + r.dir * along).distance(p) < 1e-3);
}
