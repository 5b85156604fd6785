// Application context: every piece of mutable state the page has, owned in
// one place and handed to the event handlers and the render loop.
//
// Each field has a single writer: drag input writes `scene.orientation`, the
// zoom controller writes `camera.eye`, and `tick` writes spins and markers.

use crate::camera::{client_to_ndc, Camera};
use crate::constants::ZOOM_STANDOFF_Z;
use crate::input::{pick_nearest, DragState};
use crate::scene::Scene;
use crate::zoom::{VideoPresenter, ZoomController};
use glam::{Vec2, Vec3};
use std::cell::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Camera started flying toward this sphere.
    Zooming(usize),
    Miss,
    /// The press travelled past the dead-zone; it was a drag, not a click.
    DragRelease,
    /// A zoom, video or return flight is already in progress.
    Busy,
}

pub struct App<P: VideoPresenter> {
    pub scene: Scene,
    pub camera: Camera,
    pub drag: DragState,
    pub zoom: ZoomController,
    pub presenter: P,
    viewport: Vec2,
}

impl<P: VideoPresenter> App<P> {
    pub fn new(viewport_width: f32, viewport_height: f32, presenter: P) -> Self {
        Self {
            scene: Scene::new(),
            camera: Camera::new(viewport_width / viewport_height.max(1.0)),
            drag: DragState::default(),
            zoom: ZoomController::default(),
            presenter,
            viewport: Vec2::new(viewport_width, viewport_height),
        }
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        self.drag.pointer_down(Vec2::new(x, y));
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if let Some(increment) = self.drag.pointer_move(Vec2::new(x, y)) {
            self.scene.rotate_world(increment);
        }
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) {
        self.drag.pointer_up(Vec2::new(x, y));
    }

    /// Profile sphere under the client-space point, if any.
    pub fn pick(&self, x: f32, y: f32) -> Option<usize> {
        let ndc = client_to_ndc(x, y, self.viewport.x, self.viewport.y);
        let ray = self.camera.ray_through_ndc(ndc);
        let orientation = self.scene.orientation;
        pick_nearest(
            &ray,
            self.scene
                .spheres
                .iter()
                .map(|s| (s.world_center(orientation), s.radius)),
        )
        .map(|(i, _)| i)
    }

    pub fn click(&mut self, x: f32, y: f32) -> ClickOutcome {
        if !self.drag.is_click() {
            return ClickOutcome::DragRelease;
        }
        if !self.zoom.is_idle() {
            log::debug!("[zoom] click ignored, zoom in progress");
            return ClickOutcome::Busy;
        }
        let Some(i) = self.pick(x, y) else {
            return ClickOutcome::Miss;
        };
        let sphere = &self.scene.spheres[i];
        // Flies to the sphere's own position, not its rotated one.
        let target = sphere.position + Vec3::new(0.0, 0.0, ZOOM_STANDOFF_Z);
        if self
            .zoom
            .request_zoom(i, sphere.video_url, self.camera.eye, target)
        {
            log::info!("[zoom] sphere {} -> {:?}", i, target);
            ClickOutcome::Zooming(i)
        } else {
            ClickOutcome::Busy
        }
    }

    /// Hide the video and start the flight home. False if no video is showing.
    pub fn request_close(&mut self) -> bool {
        match self.zoom.request_close(self.camera.eye, Camera::home()) {
            Some(ev) => {
                log::info!("[zoom] closing video");
                ev.dispatch(&mut self.presenter);
                true
            }
            None => false,
        }
    }

    /// Drain a close request raised from the DOM (Close button, Escape).
    /// The flag is cleared whether or not a video was showing.
    pub fn take_close_request(&mut self, flag: &Cell<bool>) -> bool {
        flag.replace(false) && self.request_close()
    }

    /// Per-frame update: spins, orbit markers, camera tween and any overlay
    /// change the tween completion triggers.
    pub fn tick(&mut self, elapsed_sec: f64, dt_sec: f32) {
        self.scene.advance_spins();
        self.scene.update_markers(elapsed_sec);
        let step = self.zoom.step(dt_sec);
        if let Some(eye) = step.camera {
            self.camera.eye = eye;
        }
        if let Some(ev) = step.event {
            log::info!("[zoom] {:?}", ev);
            ev.dispatch(&mut self.presenter);
        }
    }
}
