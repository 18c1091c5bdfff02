//! Freehand and straight line strokes.

use super::{
    ElementId, ElementPatch, ElementTrait, LINE_HIT_PADDING, default_color, default_opacity,
    even_points, flat_bounds,
};
use crate::geometry::point_to_polyline_dist;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

fn default_stroke_width() -> f64 {
    2.0
}

/// A polyline stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Line {
    pub id: ElementId,
    #[serde(default)]
    pub draggable: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Flat `[x0, y0, x1, y1, ..]` coordinates; always even length.
    #[serde(default, deserialize_with = "even_points")]
    pub points: Vec<f64>,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: f64,
    /// Dash segment lengths, solid when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dash: Option<Vec<f64>>,
}

impl Line {
    pub fn new(id: impl Into<ElementId>, points: Vec<f64>) -> Self {
        Self {
            id: id.into(),
            draggable: false,
            opacity: default_opacity(),
            points,
            color: default_color(),
            stroke_width: default_stroke_width(),
            dash: None,
        }
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.points.len() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Append a vertex.
    pub fn push_point(&mut self, p: Point) {
        self.points.push(p.x);
        self.points.push(p.y);
    }

    /// Last vertex, if any.
    pub fn last_point(&self) -> Option<Point> {
        last_point(&self.points)
    }
}

pub(crate) fn last_point(points: &[f64]) -> Option<Point> {
    match points {
        [.., x, y] => Some(Point::new(*x, *y)),
        _ => None,
    }
}

/// Shared polyline hit test: within half the stroke plus padding of any segment.
pub(crate) fn stroke_hit(points: &[f64], stroke_width: f64, point: Point) -> bool {
    point_to_polyline_dist(point, points) <= stroke_width / 2.0 + LINE_HIT_PADDING
}

pub(crate) fn apply_stroke_patch(
    points: &mut Vec<f64>,
    color: &mut String,
    stroke_width: &mut f64,
    patch: &ElementPatch,
) {
    if let Some(p) = &patch.points {
        *points = p.clone();
        if points.len() % 2 == 1 {
            points.pop();
        }
    }
    if let Some(c) = &patch.color {
        *color = c.clone();
    }
    if let Some(w) = patch.stroke_width {
        *stroke_width = w;
    }
}

impl ElementTrait for Line {
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_last_point() {
        let mut line = Line::new("l", vec![]);
        assert!(line.is_empty());
        line.push_point(Point::new(1.0, 2.0));
        line.push_point(Point::new(3.0, 4.0));
        assert_eq!(line.len(), 2);
        assert_eq!(line.last_point(), Some(Point::new(3.0, 4.0)));
    }

    #[test]
    fn test_hit_test_uses_half_stroke_plus_padding() {
        let mut line = Line::new("l", vec![0.0, 0.0, 100.0, 0.0]);
        line.stroke_width = 10.0;
        assert!(line.hit_test(Point::new(50.0, 10.0)));
        assert!(!line.hit_test(Point::new(50.0, 10.5)));
        assert!(line.hit_test(Point::new(-9.0, 0.0)));
    }

    #[test]
    fn test_single_point_line_is_hittable() {
        let line = Line::new("l", vec![10.0, 10.0]);
        assert!(line.hit_test(Point::new(12.0, 10.0)));
        assert!(!line.hit_test(Point::new(30.0, 10.0)));
    }

    #[test]
    fn test_patch_keeps_points_even() {
        let mut line = Line::new("l", vec![0.0, 0.0]);
        line.apply(&ElementPatch {
            points: Some(vec![1.0, 2.0, 3.0]),
            ..Default::default()
        });
        assert_eq!(line.points, vec![1.0, 2.0]);
    }
}
