// Host-side tests for pure input functions.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
mod camera {
    include!("../src/camera.rs");
}
mod input {
    include!("../src/input.rs");
}

use camera::Ray;
use glam::{EulerRot, Quat, Vec2, Vec3};
use input::*;

fn quat_close(a: Quat, b: Quat) -> bool {
    // q and -q are the same rotation
    a.dot(b).abs() > 1.0 - 1e-5
}

#[test]
fn ray_sphere_intersection_basic() {
    // Ray from origin pointing in +Z direction
    let ray_origin = Vec3::ZERO;
    let ray_dir = Vec3::new(0.0, 0.0, 1.0);

    // Sphere at (0, 0, 5) with radius 2
    let center = Vec3::new(0.0, 0.0, 5.0);
    let radius = 2.0;

    let t = ray_sphere(ray_origin, ray_dir, center, radius).unwrap();
    assert!((t - 3.0).abs() < 1e-5);
}

#[test]
fn ray_sphere_intersection_miss() {
    let ray_origin = Vec3::ZERO;
    let ray_dir = Vec3::new(1.0, 0.0, 0.0);
    let center = Vec3::new(0.0, 0.0, 5.0);

    assert!(ray_sphere(ray_origin, ray_dir, center, 2.0).is_none());
}

#[test]
fn ray_sphere_intersection_behind_origin() {
    let center = Vec3::new(0.0, 0.0, -5.0);
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, center, 1.0).is_none());
}

#[test]
fn ray_sphere_intersection_inside_reports_none() {
    let center = Vec3::new(0.0, 0.0, 5.0);
    assert!(ray_sphere(center, Vec3::X, center, 3.0).is_none());
}

#[test]
fn pick_nearest_prefers_closest_hit() {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 10.0),
        dir: Vec3::NEG_Z,
    };
    let spheres = [
        (Vec3::new(0.0, 0.0, -3.0), 1.0),
        (Vec3::new(0.0, 0.0, 2.0), 1.0),
        (Vec3::new(5.0, 0.0, 0.0), 1.0),
    ];
    let (i, t) = pick_nearest(&ray, spheres).unwrap();
    assert_eq!(i, 1);
    assert!((t - 7.0).abs() < 1e-5);
}

#[test]
fn pick_nearest_empty_on_miss() {
    let ray = Ray {
        origin: Vec3::new(0.0, 0.0, 10.0),
        dir: Vec3::NEG_Z,
    };
    assert!(pick_nearest(&ray, [(Vec3::new(3.0, 0.0, 0.0), 1.0)]).is_none());
    assert!(pick_nearest(&ray, std::iter::empty()).is_none());
}

#[test]
fn horizontal_drag_turns_about_y() {
    let q = drag_rotation(Vec2::new(100.0, 0.0));
    let expected = Quat::from_euler(EulerRot::XYZ, 0.0, 50f32.to_radians(), 0.0);
    assert!(quat_close(q, expected));
    assert!(quat_close(q, Quat::from_rotation_y(50f32.to_radians())));
}

#[test]
fn vertical_drag_turns_about_x() {
    let q = drag_rotation(Vec2::new(0.0, -20.0));
    assert!(quat_close(q, Quat::from_rotation_x((-10f32).to_radians())));
}

#[test]
fn zero_delta_is_identity() {
    assert!(quat_close(drag_rotation(Vec2::ZERO), Quat::IDENTITY));
}

#[test]
fn move_without_press_only_tracks_position() {
    let mut d = DragState::default();
    assert!(d.pointer_move(Vec2::new(30.0, 40.0)).is_none());
    assert_eq!(d.last, Vec2::new(30.0, 40.0));
    assert!(!d.dragging);
}

#[test]
fn drag_increments_follow_successive_moves() {
    let mut d = DragState::default();
    d.pointer_down(Vec2::new(100.0, 100.0));
    let q1 = d.pointer_move(Vec2::new(110.0, 100.0)).unwrap();
    let q2 = d.pointer_move(Vec2::new(130.0, 100.0)).unwrap();
    assert!(quat_close(q1, Quat::from_rotation_y(5f32.to_radians())));
    assert!(quat_close(q2, Quat::from_rotation_y(10f32.to_radians())));

    d.pointer_up(Vec2::new(130.0, 100.0));
    assert!(!d.dragging);
    assert!(d.pointer_move(Vec2::new(200.0, 100.0)).is_none());
}

#[test]
fn small_jitter_still_counts_as_click() {
    let mut d = DragState::default();
    d.pointer_down(Vec2::new(50.0, 50.0));
    d.pointer_move(Vec2::new(52.0, 51.0));
    d.pointer_up(Vec2::new(52.0, 51.0));
    assert!(d.is_click());
}

#[test]
fn travel_past_dead_zone_is_a_drag() {
    let mut d = DragState::default();
    d.pointer_down(Vec2::new(50.0, 50.0));
    d.pointer_move(Vec2::new(80.0, 50.0));
    // Coming back to the start does not turn it into a click
    d.pointer_move(Vec2::new(50.0, 50.0));
    d.pointer_up(Vec2::new(50.0, 50.0));
    assert!(!d.is_click());

    // The next press starts fresh
    d.pointer_down(Vec2::new(10.0, 10.0));
    d.pointer_up(Vec2::new(10.0, 10.0));
    assert!(d.is_click());
}
