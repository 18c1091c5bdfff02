//! Rectangle element.

use super::{
    ElementId, ElementPatch, ElementTrait, default_color, default_fill, default_opacity,
    rect_contains,
};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

fn default_size() -> f64 {
    100.0
}

fn default_stroke_width() -> f64 {
    1.0
}

/// A rectangle anchored at its top-left corner.
///
/// Width and height may be negative while a drag grows the shape up or left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rectangle {
    pub id: ElementId,
    #[serde(default)]
    pub draggable: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default = "default_size")]
    pub width: f64,
    #[serde(default = "default_size")]
    pub height: f64,
    #[serde(default = "default_fill")]
    pub fill: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Corner radius (0 = sharp corners).
    #[serde(default)]
    pub border_radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
}

impl Rectangle {
    pub fn new(id: impl Into<ElementId>, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            draggable: false,
            opacity: default_opacity(),
            x: position.x,
            y: position.y,
            width,
            height,
            fill: default_fill(),
            color: default_color(),
            stroke_width: default_stroke_width(),
            border_radius: 0.0,
            dash: None,
        }
    }
}

impl ElementTrait for Rectangle {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        Rect::from_points(
            Point::new(self.x, self.y),
            Point::new(self.x + self.width, self.y + self.height),
        )
    }

    fn hit_test(&self, point: Point) -> bool {
        rect_contains(self.bounds(), point)
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
        if let Some(v) = patch.width {
            self.width = v;
        }
        if let Some(v) = patch.height {
            self.height = v;
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
        if let Some(v) = patch.border_radius {
            self.border_radius = v;
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

    #[test]
    fn test_hit_test_inclusive_edges() {
        let rect = Rectangle::new("r", Point::new(10.0, 10.0), 20.0, 10.0);
        assert!(rect.hit_test(Point::new(10.0, 10.0)));
        assert!(rect.hit_test(Point::new(30.0, 20.0)));
        assert!(!rect.hit_test(Point::new(30.1, 15.0)));
    }

    #[test]
    fn test_hit_test_negative_size() {
        let rect = Rectangle::new("r", Point::new(50.0, 50.0), -20.0, -20.0);
        assert!(rect.hit_test(Point::new(40.0, 40.0)));
        assert!(!rect.hit_test(Point::new(55.0, 55.0)));
    }

    #[test]
    fn test_apply_patch() {
        let mut rect = Rectangle::new("r", Point::ZERO, 0.0, 0.0);
        rect.apply(&ElementPatch {
            width: Some(40.0),
            height: Some(30.0),
            text: Some("ignored".into()),
            ..Default::default()
        });
        assert_eq!((rect.width, rect.height), (40.0, 30.0));
    }
}
