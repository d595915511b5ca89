//! Pan/zoom camera: translate by `(x, y)` then scale by `zoom`.

use crate::layout::Point;

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 5.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    pub x: f64,
    pub y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn screen_to_world(&self, sx: f64, sy: f64) -> Point {
        Point {
            x: (sx - self.x) / self.zoom,
            y: (sy - self.y) / self.zoom,
        }
    }

    pub fn world_to_screen(&self, wx: f64, wy: f64) -> Point {
        Point {
            x: wx * self.zoom + self.x,
            y: wy * self.zoom + self.y,
        }
    }

    /// Multiply zoom by `factor` (clamped) keeping the world point under
    /// `(sx, sy)` fixed on screen.
    pub fn zoom_at(&mut self, sx: f64, sy: f64, factor: f64) {
        self.set_zoom_at(sx, sy, self.zoom * factor);
    }

    pub fn set_zoom_at(&mut self, sx: f64, sy: f64, zoom: f64) {
        if !zoom.is_finite() {
            return;
        }
        let before = self.screen_to_world(sx, sy);
        self.zoom = zoom.clamp(MIN_ZOOM, MAX_ZOOM);
        let after = self.screen_to_world(sx, sy);
        self.x += (after.x - before.x) * self.zoom;
        self.y += (after.y - before.y) * self.zoom;
    }

    /// Translate by a screen-pixel delta, independent of zoom.
    pub fn pan(&mut self, dx: f64, dy: f64) {
        self.x += dx;
        self.y += dy;
    }

    /// `(a, b, c, d, e, f)` canvas transform for this camera on top of `dpr`.
    pub fn transform(&self, dpr: f64) -> [f64; 6] {
        let s = self.zoom * dpr;
        [s, 0.0, 0.0, s, self.x * dpr, self.y * dpr]
    }
}
