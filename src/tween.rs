use glam::Vec3;

/// Quadratic ease-out: fast start, gentle arrival.
#[inline]
pub fn ease_out_quad(u: f32) -> f32 {
    let u = u.clamp(0.0, 1.0);
    1.0 - (1.0 - u) * (1.0 - u)
}

/// Timed interpolation of a position, advanced explicitly by the caller.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub from: Vec3,
    pub to: Vec3,
    pub duration_sec: f32,
    pub elapsed_sec: f32,
}

impl Tween {
    pub fn new(from: Vec3, to: Vec3, duration_sec: f32) -> Self {
        Self {
            from,
            to,
            duration_sec: duration_sec.max(0.0),
            elapsed_sec: 0.0,
        }
    }

    #[inline]
    pub fn progress(&self) -> f32 {
        if self.duration_sec <= 0.0 {
            1.0
        } else {
            (self.elapsed_sec / self.duration_sec).clamp(0.0, 1.0)
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }

    #[inline]
    pub fn value(&self) -> Vec3 {
        if self.is_finished() {
            return self.to;
        }
        self.from.lerp(self.to, ease_out_quad(self.progress()))
    }

    /// Advance by `dt_sec` and return the new value.
    pub fn step(&mut self, dt_sec: f32) -> Vec3 {
        self.elapsed_sec = (self.elapsed_sec + dt_sec.max(0.0)).min(self.duration_sec);
        self.value()
    }
}
