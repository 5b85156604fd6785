// Host-side tests for the application context: drag, click-to-zoom and close
// flows driven the way the browser event handlers and frame loop drive them.

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
mod scene {
    include!("../src/scene.rs");
}
mod tween {
    include!("../src/tween.rs");
}
mod zoom {
    include!("../src/zoom.rs");
}
mod app {
    include!("../src/app.rs");
}

use app::*;
use constants::VIDEO_URLS;
use glam::{Vec2, Vec3};
use std::cell::Cell;
use zoom::VideoPresenter;

const W: f32 = 800.0;
const H: f32 = 600.0;

#[derive(Default)]
struct Recorder {
    shown: Vec<String>,
    hides: usize,
}

impl VideoPresenter for Recorder {
    fn show(&mut self, url: &str) {
        self.shown.push(url.to_string());
    }
    fn hide(&mut self) {
        self.hides += 1;
    }
}

fn new_app() -> App<Recorder> {
    App::new(W, H, Recorder::default())
}

/// Client-space position of a world point.
fn screen_of(app: &App<Recorder>, p: Vec3) -> Vec2 {
    let ndc = app.camera.view_proj().project_point3(p);
    Vec2::new((ndc.x + 1.0) * 0.5 * W, (1.0 - ndc.y) * 0.5 * H)
}

fn click_at(app: &mut App<Recorder>, p: Vec2) -> ClickOutcome {
    app.pointer_down(p.x, p.y);
    app.pointer_up(p.x, p.y);
    app.click(p.x, p.y)
}

/// Run frames of `dt` seconds until `secs` have passed.
fn run_for(app: &mut App<Recorder>, clock: &mut f64, secs: f32, dt: f32) {
    let frames = (secs / dt).round() as usize;
    for _ in 0..frames {
        *clock += dt as f64;
        app.tick(*clock, dt);
    }
}

fn close(a: Vec3, b: Vec3) -> bool {
    a.distance(b) < 1e-3
}

#[test]
fn picks_each_sphere_at_its_screen_position() {
    let app = new_app();
    for i in 0..4 {
        let p = screen_of(&app, app.scene.spheres[i].position);
        assert_eq!(app.pick(p.x, p.y), Some(i));
    }
    assert_eq!(app.pick(W * 0.5, H * 0.5), None);
}

#[test]
fn click_zooms_then_shows_video() {
    let mut app = new_app();
    let mut clock = 0.0;
    let p = screen_of(&app, app.scene.spheres[2].position);
    assert_eq!(click_at(&mut app, p), ClickOutcome::Zooming(2));

    run_for(&mut app, &mut clock, 1.0, 0.5);
    assert!(app.presenter.shown.is_empty());
    assert!(app.camera.eye.z < 10.0 && app.camera.eye.z > 2.0);

    run_for(&mut app, &mut clock, 1.0, 0.5);
    assert!(close(app.camera.eye, Vec3::new(2.1, 0.0, 2.0)));
    assert_eq!(app.presenter.shown, vec![VIDEO_URLS[2].to_string()]);
    assert!(app.zoom.is_showing());
}

#[test]
fn close_hides_video_and_flies_home() {
    let mut app = new_app();
    let mut clock = 0.0;
    let p = screen_of(&app, app.scene.spheres[0].position);
    click_at(&mut app, p);
    run_for(&mut app, &mut clock, 2.0, 0.25);

    assert!(app.request_close());
    assert_eq!(app.presenter.hides, 1);
    // A second close while returning does nothing
    assert!(!app.request_close());

    run_for(&mut app, &mut clock, 2.0, 0.25);
    assert!(close(app.camera.eye, Vec3::new(0.0, 0.0, 10.0)));
    assert!(app.zoom.is_idle());
    assert_eq!(app.presenter.shown.len(), 1);
}

#[test]
fn background_click_does_nothing() {
    let mut app = new_app();
    let mut clock = 0.0;
    assert_eq!(
        click_at(&mut app, Vec2::new(W * 0.5, H * 0.5)),
        ClickOutcome::Miss
    );
    run_for(&mut app, &mut clock, 1.0, 0.5);
    assert_eq!(app.camera.eye, Vec3::new(0.0, 0.0, 10.0));
    assert!(app.zoom.is_idle());
    assert!(!app.request_close());
}

#[test]
fn clicks_while_busy_are_rejected() {
    let mut app = new_app();
    let mut clock = 0.0;
    let p2 = screen_of(&app, app.scene.spheres[2].position);
    let p1 = screen_of(&app, app.scene.spheres[1].position);
    click_at(&mut app, p2);
    run_for(&mut app, &mut clock, 0.5, 0.5);
    assert_eq!(click_at(&mut app, p1), ClickOutcome::Busy);

    run_for(&mut app, &mut clock, 1.5, 0.5);
    assert_eq!(click_at(&mut app, p1), ClickOutcome::Busy);
    assert_eq!(app.presenter.shown, vec![VIDEO_URLS[2].to_string()]);
}

#[test]
fn drag_release_is_not_a_click() {
    let mut app = new_app();
    let p = screen_of(&app, app.scene.spheres[2].position);
    app.pointer_down(p.x - 40.0, p.y);
    app.pointer_move(p.x, p.y);
    app.pointer_up(p.x, p.y);
    assert_eq!(app.click(p.x, p.y), ClickOutcome::DragRelease);
    assert!(app.zoom.is_idle());
    assert!(app.scene.orientation.dot(glam::Quat::IDENTITY).abs() < 1.0);
}

#[test]
fn moves_without_a_press_do_not_rotate() {
    let mut app = new_app();
    app.pointer_move(10.0, 10.0);
    app.pointer_move(300.0, 200.0);
    assert_eq!(app.scene.orientation, glam::Quat::IDENTITY);
}

#[test]
fn rotated_sphere_flies_to_its_unrotated_position() {
    let mut app = new_app();
    // 360 px at half a degree per pixel: half a turn about Y
    app.pointer_down(100.0, 300.0);
    app.pointer_move(460.0, 300.0);
    app.pointer_up(460.0, 300.0);

    // Sphere 1 (left) now sits on the right
    let world = app.scene.spheres[1].world_center(app.scene.orientation);
    assert!(close(world, Vec3::new(2.1, 0.0, 0.0)));
    let p = screen_of(&app, world);
    assert_eq!(click_at(&mut app, p), ClickOutcome::Zooming(1));

    let mut clock = 0.0;
    run_for(&mut app, &mut clock, 2.0, 0.5);
    assert!(close(app.camera.eye, Vec3::new(-2.1, 0.0, 2.0)));
    assert_eq!(app.presenter.shown, vec![VIDEO_URLS[1].to_string()]);
}

#[test]
fn tick_spins_and_moves_markers() {
    let mut app = new_app();
    app.tick(0.0, 0.016);
    app.tick(0.016, 0.016);
    assert!((app.scene.spheres[0].spin - 0.02).abs() < 1e-5);
    assert!((app.scene.spheres[3].spin - 0.08).abs() < 1e-5);
    assert_eq!(
        app.scene.markers[0].position,
        scene::orbit_position(0, 0.016)
    );
}

#[test]
fn close_flag_hides_video_once_drained() {
    let mut app = new_app();
    let mut clock = 0.0;
    let p = screen_of(&app, app.scene.spheres[3].position);
    click_at(&mut app, p);
    run_for(&mut app, &mut clock, 2.0, 0.5);

    let flag = Cell::new(false);
    assert!(!app.take_close_request(&flag));
    assert_eq!(app.presenter.hides, 0);

    flag.set(true);
    assert!(app.take_close_request(&flag));
    assert!(!flag.get());
    assert_eq!(app.presenter.hides, 1);

    run_for(&mut app, &mut clock, 2.0, 0.5);
    assert!(close(app.camera.eye, Vec3::new(0.0, 0.0, 10.0)));
}

#[test]
fn close_flag_while_idle_is_drained_without_effect() {
    let mut app = new_app();
    let flag = Cell::new(true);
    assert!(!app.take_close_request(&flag));
    assert!(!flag.get());
    assert_eq!(app.presenter.hides, 0);
    assert!(app.zoom.is_idle());
}
