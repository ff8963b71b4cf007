//! Camera module for pan/zoom transforms.

use kurbo::{Affine, Point, Vec2};
use serde::{Deserialize, Serialize};

/// Zoom level shown as "100%".
pub const BASE_ZOOM: f64 = 1.0;

/// Zoom in is refused once the zoom reaches this level.
pub const ZOOM_IN_LIMIT: f64 = 3.0;
/// Zoom out is refused once the zoom drops to this level.
pub const ZOOM_OUT_LIMIT: f64 = 0.3;

const ZOOM_IN_FACTOR: f64 = 1.2;
const ZOOM_OUT_FACTOR: f64 = 0.8;

/// View transform of the canvas.
///
/// Converts between screen and world coordinates. Zoom steps are
/// multiplicative and only refused at the limits, so a step can overshoot a
/// limit once (2.88 zooms in to 3.456).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Translation offset (pan) in screen pixels.
    pub offset: Vec2,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: BASE_ZOOM,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World to screen.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to world.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_world(&self, screen_point: Point) -> Point {
        self.inverse_transform() * screen_point
    }

    pub fn world_to_screen(&self, world_point: Point) -> Point {
        self.transform() * world_point
    }

    /// Pan by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Step the zoom up. Returns the new zoom, or `None` at the limit.
    pub fn zoom_in(&mut self) -> Option<f64> {
        if self.zoom >= ZOOM_IN_LIMIT {
            return None;
        }
        self.zoom *= ZOOM_IN_FACTOR;
        Some(self.zoom)
    }

    /// Step the zoom down. Returns the new zoom, or `None` at the limit.
    pub fn zoom_out(&mut self) -> Option<f64> {
        if self.zoom <= ZOOM_OUT_LIMIT {
            return None;
        }
        self.zoom *= ZOOM_OUT_FACTOR;
        Some(self.zoom)
    }

    /// Back to 100% with no pan.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Zoom as a rounded percentage of [`BASE_ZOOM`].
    pub fn zoom_percent(&self) -> u32 {
        (self.zoom / BASE_ZOOM * 100.0).round() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_world_round_trip() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(40.0, -10.0));
        camera.zoom_in();
        let world = Point::new(123.0, 45.0);
        let back = camera.screen_to_world(camera.world_to_screen(world));
        assert!((back.x - world.x).abs() < 1e-9);
        assert!((back.y - world.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_in_stops_at_limit() {
        let mut camera = Camera::new();
        let mut steps = 0;
        while camera.zoom_in().is_some() {
            steps += 1;
            assert!(steps < 100);
        }
        assert!(camera.zoom >= ZOOM_IN_LIMIT);
        let before = camera.zoom;
        assert!(camera.zoom_in().is_none());
        assert!((camera.zoom - before).abs() < f64::EPSILON);
    }

    #[test]
    fn test_zoom_out_stops_at_limit() {
        let mut camera = Camera::new();
        while camera.zoom_out().is_some() {}
        assert!(camera.zoom <= ZOOM_OUT_LIMIT);
        assert!(camera.zoom_out().is_none());
    }

    #[test]
    fn test_zoom_steps() {
        let mut camera = Camera::new();
        assert_eq!(camera.zoom_in(), Some(1.2));
        assert_eq!(camera.zoom_percent(), 120);
        camera.reset();
        assert!((camera.zoom_out().unwrap() - 0.8).abs() < 1e-12);
        assert_eq!(camera.zoom_percent(), 80);
    }

    #[test]
    fn test_reset() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(100.0, 100.0));
        camera.zoom_in();
        camera.reset();
        assert_eq!(camera, Camera::default());
        assert_eq!(camera.zoom_percent(), 100);
    }
}
