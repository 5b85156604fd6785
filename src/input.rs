use crate::camera::Ray;
use crate::constants::{CLICK_DEAD_ZONE_PX, DRAG_DEG_PER_PIXEL};
use glam::{EulerRot, Quat, Vec2, Vec3};

/// Pointer drag state: idle or dragging, plus what the click handler needs to
/// tell a genuine click from the release at the end of a drag.
#[derive(Default, Clone, Copy, Debug)]
pub struct DragState {
    pub dragging: bool,
    pub last: Vec2,
    pub press_origin: Vec2,
    pub press_travelled: bool,
}

impl DragState {
    pub fn pointer_down(&mut self, pos: Vec2) {
        self.dragging = true;
        self.last = pos;
        self.press_origin = pos;
        self.press_travelled = false;
    }

    /// Returns the world-frame rotation increment to apply, if dragging.
    /// The last pointer position is recorded either way.
    pub fn pointer_move(&mut self, pos: Vec2) -> Option<Quat> {
        let delta = pos - self.last;
        self.last = pos;
        if !self.dragging {
            return None;
        }
        self.note_travel(pos);
        Some(drag_rotation(delta))
    }

    pub fn pointer_up(&mut self, pos: Vec2) {
        if self.dragging {
            self.note_travel(pos);
        }
        self.dragging = false;
    }

    /// True when the most recent press stayed inside the click dead-zone.
    #[inline]
    pub fn is_click(&self) -> bool {
        !self.press_travelled
    }

    fn note_travel(&mut self, pos: Vec2) {
        if pos.distance(self.press_origin) > CLICK_DEAD_ZONE_PX {
            self.press_travelled = true;
        }
    }
}

/// Incremental rotation for a pointer delta in pixels: vertical motion turns
/// about X, horizontal about Y, applied X then Y then Z.
#[inline]
pub fn drag_rotation(delta: Vec2) -> Quat {
    Quat::from_euler(
        EulerRot::XYZ,
        (delta.y * DRAG_DEG_PER_PIXEL).to_radians(),
        (delta.x * DRAG_DEG_PER_PIXEL).to_radians(),
        0.0,
    )
}

/// Distance along a normalized ray to the first intersection in front of the
/// origin. Rays starting inside the sphere report no hit.
#[inline]
pub fn ray_sphere(ray_origin: Vec3, ray_dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let oc = ray_origin - center;
    let b = oc.dot(ray_dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - c;
    if disc < 0.0 {
        return None;
    }
    let t = -b - disc.sqrt();
    (t >= 0.0).then_some(t)
}

/// Nearest sphere hit by `ray` among `(center, radius)` candidates, as
/// `(candidate index, distance)`.
pub fn pick_nearest<I>(ray: &Ray, spheres: I) -> Option<(usize, f32)>
where
    I: IntoIterator<Item = (Vec3, f32)>,
{
    let mut best = None::<(usize, f32)>;
    for (i, (center, radius)) in spheres.into_iter().enumerate() {
        if let Some(t) = ray_sphere(ray.origin, ray.dir, center, radius) {
            match best {
                Some((_, bt)) if t >= bt => {}
                _ => best = Some((i, t)),
            }
        }
    }
    best
}
