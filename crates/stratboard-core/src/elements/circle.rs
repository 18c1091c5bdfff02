//! Circle/ellipse element.

use super::{ElementId, ElementPatch, ElementTrait, default_color, default_fill, default_opacity};
use crate::geometry::ellipse_contains;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

fn default_stroke_width() -> f64 {
    1.0
}

/// An axis-aligned ellipse centered on `(x, y)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawCircle")]
pub struct Circle {
    pub id: ElementId,
    pub draggable: bool,
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub fill: String,
    pub color: String,
    pub stroke_width: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
}

/// Wire form accepting the legacy single `radius`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawCircle {
    id: ElementId,
    #[serde(default)]
    draggable: bool,
    #[serde(default = "default_opacity")]
    opacity: f64,
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
    radius: Option<f64>,
    radius_x: Option<f64>,
    radius_y: Option<f64>,
    #[serde(default = "default_fill")]
    fill: String,
    #[serde(default = "default_color")]
    color: String,
    #[serde(default = "default_stroke_width")]
    stroke_width: f64,
    #[serde(default)]
    dash: Option<Vec<f64>>,
}

impl From<RawCircle> for Circle {
    fn from(raw: RawCircle) -> Self {
        let radius_x = raw.radius_x.or(raw.radius).unwrap_or(1.0);
        let radius_y = raw.radius_y.or(raw.radius).unwrap_or(1.0);
        Self {
            id: raw.id,
            draggable: raw.draggable,
            opacity: raw.opacity,
            x: raw.x,
            y: raw.y,
            radius_x,
            radius_y,
            fill: raw.fill,
            color: raw.color,
            stroke_width: raw.stroke_width,
            dash: raw.dash,
        }
    }
}

impl Circle {
    pub fn new(id: impl Into<ElementId>, center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            id: id.into(),
            draggable: false,
            opacity: default_opacity(),
            x: center.x,
            y: center.y,
            radius_x,
            radius_y,
            fill: default_fill(),
            color: default_color(),
            stroke_width: default_stroke_width(),
            dash: None,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl ElementTrait for Circle {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        Rect::new(
            self.x - self.radius_x,
            self.y - self.radius_y,
            self.x + self.radius_x,
            self.y + self.radius_y,
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        ellipse_contains(self.center(), self.radius_x, self.radius_y, point)
    }

    fn opacity(&self) -> f64 {
        self.opacity
    }

    fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    fn draggable(&self) -> bool {
        self.draggable
    }

    fn set_draggable(&mut self, draggable: bool) {
        self.draggable = draggable;
    }

    fn apply(&mut self, patch: &ElementPatch) {
        if let Some(v) = patch.x {
            self.x = v;
        }
        if let Some(v) = patch.y {
            self.y = v;
        }
        if let Some(v) = patch.radius_x {
            self.radius_x = v;
        }
        if let Some(v) = patch.radius_y {
            self.radius_y = v;
        }
        if let Some(v) = &patch.fill {
            self.fill = v.clone();
        }
        if let Some(v) = &patch.color {
            self.color = v.clone();
        }
        if let Some(v) = patch.stroke_width {
            self.stroke_width = v;
        }
        if let Some(v) = patch.opacity {
            self.opacity = v;
        }
        if let Some(v) = patch.draggable {
            self.draggable = v;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_hit_test_inside_and_outside() {
        let circle = Circle::new("c", Point::new(100.0, 100.0), 20.0, 10.0);
        assert!(circle.hit_test(Point::new(105.0, 100.0)));
        assert!(!circle.hit_test(Point::new(125.0, 100.0)));
    }

    #[test]
    fn test_legacy_radius_resolves_both_axes() {
        let circle: Circle =
            serde_json::from_value(json!({"id": "c", "x": 0, "y": 0, "radius": 7})).unwrap();
        assert_eq!((circle.radius_x, circle.radius_y), (7.0, 7.0));
    }

    #[test]
    fn test_explicit_radii_win_over_legacy() {
        let circle: Circle = serde_json::from_value(
            json!({"id": "c", "radius": 7, "radiusX": 3}),
        )
        .unwrap();
        assert_eq!((circle.radius_x, circle.radius_y), (3.0, 7.0));
    }

    #[test]
    fn test_missing_radius_defaults_to_one() {
        let circle: Circle = serde_json::from_value(json!({"id": "c"})).unwrap();
        assert_eq!((circle.radius_x, circle.radius_y), (1.0, 1.0));
    }

    #[test]
    fn test_bounds() {
        let circle = Circle::new("c", Point::new(50.0, 50.0), 30.0, 20.0);
        assert_eq!(circle.bounds(), Rect::new(20.0, 30.0, 80.0, 70.0));
    }
}
