//! Editable anchors on freehand strokes.
//!
//! A freehand stroke can hold hundreds of vertices, so only every Nth vertex
//! is exposed as a draggable anchor. Dragging an anchor drags the vertices
//! between it and its neighbouring anchors along with it, weighted by a
//! smoothstep falloff so the stroke bends instead of kinking.

use crate::geometry::smoothstep;
use kurbo::Point;

/// Indices (in vertices, not coordinates) of the anchors shown for a stroke.
///
/// Short strokes expose every vertex. Longer ones use a stride of
/// `max(min_step, ceil(count / max_anchors))`; the final vertex is always an
/// anchor, replacing the previous stride anchor when that one sits closer
/// than half a stride to the end. The first vertex is never replaced.
pub fn anchor_indices(point_count: usize, max_anchors: usize, min_step: usize) -> Vec<usize> {
    if point_count <= 2 {
        return (0..point_count).collect();
    }

    let step = min_step.max(point_count.div_ceil(max_anchors.max(1))).max(1);
    if step == 1 && point_count <= max_anchors {
        return (0..point_count).collect();
    }

    let last = point_count - 1;
    let mut indices: Vec<usize> = (0..last).step_by(step).collect();
    let last_added = indices.last().copied().unwrap_or(0);
    let gap = last - last_added;

    if gap > 0 {
        if (gap as f64) < step as f64 / 2.0 && indices.len() > 1 {
            if let Some(slot) = indices.last_mut() {
                *slot = last;
            }
        } else {
            indices.push(last);
        }
    }
    indices
}

/// Drag the anchor at vertex `index` of a flat point list to `target`.
///
/// Returns `false` (leaving `points` untouched) when `index` is not an
/// anchor for the given density settings.
pub fn move_anchor(
    points: &mut [f64],
    index: usize,
    target: Point,
    max_anchors: usize,
    min_step: usize,
) -> bool {
    let count = points.len() / 2;
    if index >= count {
        return false;
    }

    let anchors = anchor_indices(count, max_anchors, min_step);
    let Some(pos) = anchors.iter().position(|&a| a == index) else {
        return false;
    };
    let prev = pos.checked_sub(1).map(|p| anchors[p]);
    let next = anchors.get(pos + 1).copied();

    let dx = target.x - points[index * 2];
    let dy = target.y - points[index * 2 + 1];
    points[index * 2] = target.x;
    points[index * 2 + 1] = target.y;

    if let Some(prev) = prev {
        let span = (index - prev) as f64;
        for i in prev + 1..index {
            let t = smoothstep((i - prev) as f64 / span);
            points[i * 2] += dx * t;
            points[i * 2 + 1] += dy * t;
        }
    }

    if let Some(next) = next {
        let span = (next - index) as f64;
        for i in index + 1..next {
            let t = smoothstep(1.0 - (i - index) as f64 / span);
            points[i * 2] += dx * t;
            points[i * 2 + 1] += dy * t;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn straight(count: usize) -> Vec<f64> {
        (0..count).flat_map(|i| [i as f64, 0.0]).collect()
    }

    #[test]
    fn test_short_strokes_expose_every_vertex() {
        assert_eq!(anchor_indices(0, 10, 10), Vec::<usize>::new());
        assert_eq!(anchor_indices(2, 10, 10), vec![0, 1]);
        assert_eq!(anchor_indices(5, 10, 1), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_stride_and_final_anchor() {
        assert_eq!(anchor_indices(21, 10, 10), vec![0, 10, 20]);
        assert_eq!(anchor_indices(3, 10, 10), vec![0, 2]);
    }

    #[test]
    fn test_close_final_anchor_replaces_previous() {
        // stride 10, last stride anchor 10 is 1 vertex from the end
        assert_eq!(anchor_indices(12, 10, 10), vec![0, 11]);
    }

    #[test]
    fn test_density_limits_anchor_count() {
        let anchors = anchor_indices(200, 10, 1);
        assert!(anchors.len() <= 11);
        assert_eq!(anchors.first(), Some(&0));
        assert_eq!(anchors.last(), Some(&199));
    }

    #[test]
    fn test_move_anchor_smooth_falloff() {
        let mut points = straight(21);
        assert!(move_anchor(&mut points, 10, Point::new(10.0, 10.0), 10, 10));

        assert_eq!(points[10 * 2 + 1], 10.0);
        assert!((points[5 * 2 + 1] - 5.0).abs() < 1e-12);
        assert!((points[15 * 2 + 1] - 5.0).abs() < 1e-12);
        assert_eq!(points[1], 0.0);
        assert_eq!(points[20 * 2 + 1], 0.0);
        // falloff is monotonic toward the dragged anchor
        assert!(points[7 * 2 + 1] > points[3 * 2 + 1]);
    }

    #[test]
    fn test_move_non_anchor_is_noop() {
        let mut points = straight(21);
        let before = points.clone();
        assert!(!move_anchor(&mut points, 4, Point::new(4.0, 50.0), 10, 10));
        assert_eq!(points, before);
        assert!(!move_anchor(&mut points, 99, Point::ZERO, 10, 10));
    }

    #[test]
    fn test_move_endpoint_only_affects_one_side() {
        let mut points = straight(21);
        assert!(move_anchor(&mut points, 0, Point::new(0.0, -4.0), 10, 10));
        assert_eq!(points[1], -4.0);
        assert!(points[5 * 2 + 1] < 0.0);
        assert_eq!(points[10 * 2 + 1], 0.0);
        assert_eq!(points[15 * 2 + 1], 0.0);
    }
}
