//! Arrow strokes (polyline with a head at the last vertex).

use super::line::{apply_stroke_patch, last_point, stroke_hit};
use super::{
    ElementId, ElementPatch, ElementTrait, default_color, default_opacity, even_points, flat_bounds,
};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

fn default_stroke_width() -> f64 {
    2.0
}

fn default_pointer_length() -> f64 {
    10.0
}

fn default_pointer_width() -> f64 {
    8.0
}

/// An arrow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Arrow {
    pub id: ElementId,
    #[serde(default)]
    pub draggable: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default, deserialize_with = "even_points")]
    pub points: Vec<f64>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
    /// Arrowhead length along the stroke.
    #[serde(default = "default_pointer_length")]
    pub pointer_length: f64,
    /// Arrowhead width across the stroke.
    #[serde(default = "default_pointer_width")]
    pub pointer_width: f64,
}

impl Arrow {
    pub fn new(id: impl Into<ElementId>, points: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            draggable: false,
            opacity: default_opacity(),
            points,
            color: default_color(),
            stroke_width: default_stroke_width(),
            dash: None,
            pointer_length: default_pointer_length(),
            pointer_width: default_pointer_width(),
        }
    }

    pub fn push_point(&mut self, p: Point) {
        self.points.push(p.x);
        self.points.push(p.y);
    }

    /// Tip of the arrowhead.
    pub fn tip(&self) -> Option<Point> {
        last_point(&self.points)
    }
}

impl ElementTrait for Arrow {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        flat_bounds(&self.points)
    }

    fn hit_test(&self, point: Point) -> bool {
        stroke_hit(&self.points, self.stroke_width, point)
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
        apply_stroke_patch(&mut self.points, &mut self.color, &mut self.stroke_width, patch);
        if let Some(o) = patch.opacity {
            self.opacity = o;
        }
        if let Some(d) = patch.draggable {
            self.draggable = d;
        }
    }
}
