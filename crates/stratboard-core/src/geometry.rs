//! Pure geometry helpers shared by the element model and the editors.

use kurbo::{Point, Vec2};

/// Brush size at which dash patterns and arrowheads are authored.
pub const BASE_BRUSH_SIZE: f64 = 16.0;

/// Distance from a point to a line segment (a→b).
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline given as flat `[x0, y0, x1, y1, ..]`.
///
/// A single vertex is treated as a zero-length segment. Returns infinity
/// for an empty polyline.
pub fn point_to_polyline_dist(point: Point, flat: &[f64]) -> f64 {
    let vertices = points_from_flat(flat);
    match vertices.len() {
        0 => f64::INFINITY,
        1 => point.distance(vertices[0]),
        _ => vertices
            .windows(2)
            .map(|w| point_to_segment_dist(point, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Whether `point` lies inside (or on) the axis-aligned ellipse.
///
/// Degenerate ellipses contain nothing.
pub fn ellipse_contains(center: Point, radius_x: f64, radius_y: f64, point: Point) -> bool {
    if radius_x == 0.0 || radius_y == 0.0 {
        return false;
    }
    let dx = point.x - center.x;
    let dy = point.y - center.y;
    (dx * dx) / (radius_x * radius_x) + (dy * dy) / (radius_y * radius_y) <= 1.0
}

/// Scale a dash pattern authored for [`BASE_BRUSH_SIZE`] to `brush_size`.
pub fn scale_dash_pattern(pattern: &[f64], brush_size: f64) -> Vec<f64> {
    let factor = brush_size / BASE_BRUSH_SIZE;
    pattern.iter().map(|value| value * factor).collect()
}

/// Hermite smoothstep on `[0, 1]`.
pub fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Linear interpolation, exact at `t = 0` and `t = 1`.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from * (1.0 - t) + to * t
}

/// Group a flat coordinate list into points, ignoring a trailing odd value.
pub fn points_from_flat(flat: &[f64]) -> Vec<Point> {
    flat.chunks_exact(2).map(|c| Point::new(c[0], c[1])).collect()
}
