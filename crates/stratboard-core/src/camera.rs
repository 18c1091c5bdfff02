//! Stage pan/zoom and the attack/defense side flip.

use kurbo::{Affine, Point, Size, Vec2};
use serde::{Deserialize, Serialize};

/// Convert a raw pointer position into canvas coordinates.
///
/// `pan_offset` is the stage translation and `zoom` its uniform scale.
pub fn screen_to_canvas(raw: Point, pan_offset: Vec2, zoom: f64) -> Point {
    Point::new((raw.x - pan_offset.x) / zoom, (raw.y - pan_offset.y) / zoom)
}

/// Which team's perspective the map is displayed from.
///
/// Element coordinates are always stored in the attack (canonical) frame.
/// On defense the renderer rotates the whole scene 180° around the image
/// center, so pointer positions must be mapped back before they reach the
/// element model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapSide {
    #[default]
    Attack,
    Defense,
}

impl MapSide {
    /// The other side.
    pub fn toggled(self) -> Self {
        match self {
            MapSide::Attack => MapSide::Defense,
            MapSide::Defense => MapSide::Attack,
        }
    }

    /// Map a displayed canvas point to canonical coordinates.
    ///
    /// The mapping is its own inverse, so the same call converts canonical
    /// coordinates back into the flipped frame.
    pub fn to_canonical(self, point: Point, image_size: Size) -> Point {
        match self {
            MapSide::Attack => point,
            MapSide::Defense => Point::new(image_size.width - point.x, image_size.height - point.y),
        }
    }

    /// Transform the renderer applies to canonical coordinates for display.
    pub fn view_transform(self, image_size: Size) -> Affine {
        match self {
            MapSide::Attack => Affine::IDENTITY,
            MapSide::Defense => {
                let center = Point::new(image_size.width / 2.0, image_size.height / 2.0);
                Affine::rotate_about(std::f64::consts::PI, center)
            }
        }
    }
}

/// Stage view transform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camera {
    /// Current translation offset (pan) in screen pixels.
    pub offset: Vec2,
    /// Current zoom level.
    pub zoom: f64,
    /// Minimum allowed zoom level.
    pub min_zoom: f64,
    /// Maximum allowed zoom level.
    pub max_zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
            min_zoom: 0.05,
            max_zoom: 5.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a camera at a known pan/zoom (e.g. a map's initial view).
    pub fn with_view(offset: Vec2, zoom: f64) -> Self {
        Self {
            offset,
            zoom,
            ..Self::default()
        }
    }

    /// Canvas to screen.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    pub fn screen_to_canvas(&self, screen_point: Point) -> Point {
        screen_to_canvas(screen_point, self.offset, self.zoom)
    }

    pub fn canvas_to_screen(&self, canvas_point: Point) -> Point {
        self.transform() * canvas_point
    }

    /// Pan the camera by a delta in screen coordinates.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom the camera, keeping the given screen point fixed.
    pub fn zoom_at(&mut self, screen_point: Point, factor: f64) {
        let new_zoom = (self.zoom * factor).clamp(self.min_zoom, self.max_zoom);
        if (new_zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }

        let anchor = self.screen_to_canvas(screen_point);
        self.zoom = new_zoom;

        let moved = self.canvas_to_screen(anchor);
        self.offset += Vec2::new(screen_point.x - moved.x, screen_point.y - moved.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_to_canvas_with_pan_and_zoom() {
        let p = screen_to_canvas(Point::new(100.0, 200.0), Vec2::new(20.0, 40.0), 2.0);
        assert!((p.x - 40.0).abs() < f64::EPSILON);
        assert!((p.y - 80.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_camera_roundtrip() {
        let camera = Camera::with_view(Vec2::new(30.0, -20.0), 0.4);
        let original = Point::new(123.0, 456.0);
        let back = camera.canvas_to_screen(camera.screen_to_canvas(original));
        assert!((back.x - original.x).abs() < 1e-9);
        assert!((back.y - original.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_at_keeps_anchor_fixed() {
        let mut camera = Camera::new();
        let anchor = Point::new(300.0, 150.0);
        let before = camera.screen_to_canvas(anchor);
        camera.zoom_at(anchor, 2.0);
        let after = camera.screen_to_canvas(anchor);
        assert!((before.x - after.x).abs() < 1e-9);
        assert!((before.y - after.y).abs() < 1e-9);
    }

    #[test]
    fn test_zoom_clamp() {
        let mut camera = Camera::new();
        camera.zoom_at(Point::ZERO, 0.0001);
        assert!((camera.zoom - camera.min_zoom).abs() < f64::EPSILON);
    }

    #[test]
    fn test_side_flip_roundtrip() {
        let size = Size::new(2048.0, 1536.0);
        for p in [Point::new(10.0, 20.0), Point::new(0.25, 1535.75), Point::new(1024.5, 0.0)] {
            let flipped = MapSide::Defense.to_canonical(p, size);
            let back = MapSide::Defense.to_canonical(flipped, size);
            assert_eq!(back, p);
        }
        let p = Point::new(3.0, 4.0);
        assert_eq!(MapSide::Attack.to_canonical(p, size), p);
    }

    #[test]
    fn test_view_transform_matches_canonical_flip() {
        let size = Size::new(100.0, 50.0);
        let p = Point::new(10.0, 5.0);
        let shown = MapSide::Defense.view_transform(size) * p;
        let expected = MapSide::Defense.to_canonical(p, size);
        assert!((shown.x - expected.x).abs() < 1e-9);
        assert!((shown.y - expected.y).abs() < 1e-9);
        assert_eq!(MapSide::Attack.view_transform(size), Affine::IDENTITY);
    }
}
