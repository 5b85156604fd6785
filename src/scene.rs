// Scene model: the four profile spheres, the four orbit markers and the
// orientation applied to all of them.
//
// Nothing in here touches the browser; the web layer reads transforms from a
// [`Scene`] each frame and the input layer mutates its orientation.

use crate::constants::*;
use glam::{Mat4, Quat, Vec3};
use std::f32::consts::TAU;
use std::f64::consts::FRAC_PI_2;

/// Plane an orbit marker travels in, selected by marker index.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrbitPlane {
    Xy,
    Xz,
    Yz,
    Diagonal,
}

impl OrbitPlane {
    pub fn for_index(index: usize) -> Self {
        match index % MARKER_COUNT {
            0 => OrbitPlane::Xy,
            1 => OrbitPlane::Xz,
            2 => OrbitPlane::Yz,
            _ => OrbitPlane::Diagonal,
        }
    }
}

/// +1 for even markers, -1 for odd ones.
#[inline]
pub fn orbit_direction(index: usize) -> f64 {
    if index % 2 == 0 {
        1.0
    } else {
        -1.0
    }
}

#[inline]
pub fn orbit_angle(index: usize, elapsed_sec: f64) -> f64 {
    elapsed_sec * orbit_direction(index) + index as f64 * FRAC_PI_2
}

/// Scene-space position of marker `index` after `elapsed_sec` seconds.
///
/// Pure in `(index, elapsed_sec)`: markers hold no velocity, so the motion can
/// be recomputed from the clock alone.
pub fn orbit_position(index: usize, elapsed_sec: f64) -> Vec3 {
    let theta = orbit_angle(index, elapsed_sec);
    let r = MARKER_ORBIT_RADIUS as f64;
    let (s, c) = theta.sin_cos();
    let (x, y, z) = match OrbitPlane::for_index(index) {
        OrbitPlane::Xy => (r * c, r * s, 0.0),
        OrbitPlane::Xz => (r * c, 0.0, r * s),
        OrbitPlane::Yz => (0.0, r * c, r * s),
        OrbitPlane::Diagonal => {
            let rd = r * MARKER_DIAGONAL_SCALE as f64;
            (rd * c, rd * s, rd * s)
        }
    };
    Vec3::new(x as f32, y as f32, z as f32)
}

/// Cross layout: top, left, right, bottom.
pub fn cross_positions(offset: f32) -> [Vec3; PROFILE_COUNT] {
    [
        Vec3::new(0.0, offset * 2.0, 0.0),
        Vec3::new(-offset * 2.0, 0.0, 0.0),
        Vec3::new(offset * 2.0, 0.0, 0.0),
        Vec3::new(0.0, -offset * 2.0, 0.0),
    ]
}

#[derive(Clone, Debug)]
pub struct ProfileSphere {
    pub index: usize,
    pub position: Vec3,
    pub radius: f32,
    pub thumbnail: &'static str,
    pub video_url: &'static str,
    /// Rotation about the local Y axis, kept in `[0, 2π)`.
    pub spin: f32,
}

impl ProfileSphere {
    #[inline]
    pub fn spin_step(&self) -> f32 {
        SPIN_STEP_RAD * (self.index as f32 + 1.0)
    }

    pub fn advance_spin(&mut self) {
        self.spin = (self.spin + self.spin_step()).rem_euclid(TAU);
    }

    /// Centre of the sphere once the scene orientation is applied.
    #[inline]
    pub fn world_center(&self, orientation: Quat) -> Vec3 {
        orientation * self.position
    }

    pub fn model_matrix(&self, orientation: Quat) -> Mat4 {
        Mat4::from_quat(orientation)
            * Mat4::from_translation(self.position)
            * Mat4::from_rotation_y(self.spin)
    }
}

#[derive(Clone, Debug)]
pub struct OrbitMarker {
    pub index: usize,
    pub color: [f32; 3],
    pub radius: f32,
    pub emissive_intensity: f32,
    pub position: Vec3,
}

impl OrbitMarker {
    pub fn update(&mut self, elapsed_sec: f64) {
        self.position = orbit_position(self.index, elapsed_sec);
    }

    pub fn model_matrix(&self, orientation: Quat) -> Mat4 {
        Mat4::from_quat(orientation) * Mat4::from_translation(self.position)
    }
}

pub struct Scene {
    pub orientation: Quat,
    pub spheres: [ProfileSphere; PROFILE_COUNT],
    pub markers: [OrbitMarker; MARKER_COUNT],
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        let positions = cross_positions(PROFILE_OFFSET);
        let spheres = std::array::from_fn(|i| ProfileSphere {
            index: i,
            position: positions[i],
            radius: PROFILE_RADIUS,
            thumbnail: THUMBNAIL_IMAGES[i],
            video_url: VIDEO_URLS[i],
            spin: 0.0,
        });
        // Markers start at the origin until the first frame places them.
        let markers = std::array::from_fn(|i| OrbitMarker {
            index: i,
            color: MARKER_COLORS[i],
            radius: MARKER_RADIUS,
            emissive_intensity: MARKER_EMISSIVE_INTENSITY,
            position: Vec3::ZERO,
        });
        Self {
            orientation: Quat::IDENTITY,
            spheres,
            markers,
        }
    }

    pub fn advance_spins(&mut self) {
        for s in self.spheres.iter_mut() {
            s.advance_spin();
        }
    }

    pub fn update_markers(&mut self, elapsed_sec: f64) {
        for m in self.markers.iter_mut() {
            m.update(elapsed_sec);
        }
    }

    /// Left-multiplies the orientation, so `increment` is expressed in the
    /// world frame rather than the already-rotated one.
    pub fn rotate_world(&mut self, increment: Quat) {
        self.orientation = (increment * self.orientation).normalize();
    }

    /// Point light position after the scene orientation is applied.
    pub fn point_light_world(&self) -> Vec3 {
        self.orientation * Vec3::from_array(POINT_LIGHT_POSITION)
    }
}
