// Click-to-video sequencing.
//
// A click on a profile sphere walks the controller through
// `Idle -> Zooming -> Showing -> Returning -> Idle`. Camera motion is a
// [`Tween`] stepped by the render loop; when the zoom-in tween completes the
// controller emits [`ZoomEvent::ShowVideo`], and a close request emits
// [`ZoomEvent::HideVideo`] before the camera flies home. New zoom requests
// are rejected until the controller is back to `Idle`.

use crate::constants::ZOOM_DURATION_SEC;
use crate::tween::Tween;
use glam::Vec3;

/// Presentation-side collaborator that owns the video overlay.
pub trait VideoPresenter {
    fn show(&mut self, url: &str);
    fn hide(&mut self);
}

#[derive(Clone, Debug, PartialEq)]
pub enum ZoomEvent {
    ShowVideo { sphere: usize, url: &'static str },
    HideVideo,
}

impl ZoomEvent {
    pub fn dispatch<P: VideoPresenter + ?Sized>(&self, presenter: &mut P) {
        match self {
            ZoomEvent::ShowVideo { url, .. } => presenter.show(url),
            ZoomEvent::HideVideo => presenter.hide(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ZoomPhase {
    Idle,
    Zooming {
        sphere: usize,
        url: &'static str,
        tween: Tween,
    },
    Showing {
        sphere: usize,
        url: &'static str,
    },
    Returning {
        tween: Tween,
    },
}

/// Result of advancing the controller by one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ZoomStep {
    /// New camera eye while a tween is running.
    pub camera: Option<Vec3>,
    pub event: Option<ZoomEvent>,
}

pub struct ZoomController {
    phase: ZoomPhase,
    duration_sec: f32,
}

impl Default for ZoomController {
    fn default() -> Self {
        Self::new(ZOOM_DURATION_SEC)
    }
}

impl ZoomController {
    pub fn new(duration_sec: f32) -> Self {
        Self {
            phase: ZoomPhase::Idle,
            duration_sec,
        }
    }

    #[inline]
    pub fn phase(&self) -> &ZoomPhase {
        &self.phase
    }

    #[inline]
    pub fn is_idle(&self) -> bool {
        matches!(self.phase, ZoomPhase::Idle)
    }

    #[inline]
    pub fn is_showing(&self) -> bool {
        matches!(self.phase, ZoomPhase::Showing { .. })
    }

    /// Start flying the camera from `from` to `to`. Returns false (and changes
    /// nothing) unless the controller is idle.
    pub fn request_zoom(&mut self, sphere: usize, url: &'static str, from: Vec3, to: Vec3) -> bool {
        if !self.is_idle() {
            return false;
        }
        self.phase = ZoomPhase::Zooming {
            sphere,
            url,
            tween: Tween::new(from, to, self.duration_sec),
        };
        true
    }

    /// Close the video and fly the camera from `from` back to `home`.
    /// Only meaningful while the video is showing.
    pub fn request_close(&mut self, from: Vec3, home: Vec3) -> Option<ZoomEvent> {
        if !self.is_showing() {
            return None;
        }
        self.phase = ZoomPhase::Returning {
            tween: Tween::new(from, home, self.duration_sec),
        };
        Some(ZoomEvent::HideVideo)
    }

    pub fn step(&mut self, dt_sec: f32) -> ZoomStep {
        match &mut self.phase {
            ZoomPhase::Idle | ZoomPhase::Showing { .. } => ZoomStep::default(),
            ZoomPhase::Zooming { sphere, url, tween } => {
                let camera = tween.step(dt_sec);
                if !tween.is_finished() {
                    return ZoomStep {
                        camera: Some(camera),
                        event: None,
                    };
                }
                let (sphere, url) = (*sphere, *url);
                self.phase = ZoomPhase::Showing { sphere, url };
                ZoomStep {
                    camera: Some(camera),
                    event: Some(ZoomEvent::ShowVideo { sphere, url }),
                }
            }
            ZoomPhase::Returning { tween } => {
                let camera = tween.step(dt_sec);
                if tween.is_finished() {
                    self.phase = ZoomPhase::Idle;
                }
                ZoomStep {
                    camera: Some(camera),
                    event: None,
                }
            }
        }
    }
}
