//! Pointer gestures for the drawing tools.
//!
//! The controller turns down/move/up events in canonical canvas coordinates
//! into [`Document`] operations. A whole stroke or drag is bracketed in one
//! history batch, so each gesture undoes as a single step.

use crate::document::Document;
use crate::elements::{
    Element, ElementPatch, IconInfo, ShapeKind, create_icon_element, create_line_element,
    create_shape_element, create_text_element,
};
use crate::tools::ToolKind;
use kurbo::Point;

/// Minimum distance between consecutive freehand vertices.
pub const MIN_PEN_STEP: f64 = 5.0;

/// Keyboard modifiers held during a pointer event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    pub shift: bool,
    pub alt: bool,
    pub ctrl: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        alt: false,
        ctrl: false,
    };
}

/// Gesture state that does not live in the document.
#[derive(Debug, Clone, Default)]
pub struct DrawingController {
    /// Where a shape drag started.
    drag_start: Option<Point>,
}

impl DrawingController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Primary button pressed at canonical `pos`.
    pub fn pointer_down(&mut self, doc: &mut Document, pos: Point) {
        let tool = doc.active_tool();
        match tool {
            ToolKind::Pen | ToolKind::Line => {
                let element =
                    create_line_element(&doc.tool_settings().pen, pos, tool == ToolKind::Line);
                doc.start_batch();
                doc.set_is_drawing(true);
                doc.add_element(element);
            }
            ToolKind::Rectangle | ToolKind::Circle => {
                let kind = if tool == ToolKind::Rectangle {
                    ShapeKind::Rectangle
                } else {
                    ShapeKind::Circle
                };
                let element = create_shape_element(&doc.tool_settings().shape, pos, kind);
                doc.start_batch();
                doc.set_is_drawing(true);
                self.drag_start = Some(pos);
                doc.add_element(element);
            }
            ToolKind::Erase => {
                doc.start_batch();
                doc.set_is_drawing(true);
                erase_at(doc, pos);
            }
            ToolKind::Text => {
                let element = create_text_element(&doc.tool_settings().text, pos);
                doc.add_element(element);
                doc.set_active_tool(ToolKind::None);
            }
            ToolKind::None => {
                let hit = doc.topmost_hit(pos).map(|e| e.id().to_string());
                doc.set_selected_element_id(hit);
            }
            // placed through `place_icon` / the image picker
            ToolKind::Image | ToolKind::Icons => {}
        }
    }

    /// Pointer moved to canonical `pos`. Only acts while drawing.
    pub fn pointer_move(&mut self, doc: &mut Document, pos: Point, modifiers: Modifiers) {
        if !doc.is_drawing() {
            return;
        }
        let tool = doc.active_tool();
        if tool == ToolKind::Erase {
            erase_at(doc, pos);
            return;
        }

        let Some(last) = doc.last_element() else {
            return;
        };
        let id = last.id().to_string();

        let patch = match (tool, last) {
            (ToolKind::Pen, Element::Line(_) | Element::Arrow(_)) => {
                let points = last.points().unwrap_or_default();
                if let [.., x, y] = points {
                    if Point::new(*x, *y).distance(pos) < MIN_PEN_STEP {
                        return;
                    }
                }
                let mut points = points.to_vec();
                points.extend([pos.x, pos.y]);
                ElementPatch::points(points)
            }
            (ToolKind::Line, Element::Line(_) | Element::Arrow(_)) => {
                let points = match last.points() {
                    Some([x, y, ..]) => vec![*x, *y, pos.x, pos.y],
                    _ => vec![pos.x, pos.y, pos.x, pos.y],
                };
                ElementPatch::points(points)
            }
            (ToolKind::Rectangle, Element::Rectangle(_)) => {
                let Some(start) = self.drag_start else {
                    return;
                };
                rectangle_drag(start, pos, modifiers)
            }
            (ToolKind::Circle, Element::Circle(_)) => {
                let Some(start) = self.drag_start else {
                    return;
                };
                circle_drag(start, pos, modifiers)
            }
            _ => return,
        };
        doc.update_element(&id, &patch);
    }

    /// Primary button released. Finishes the gesture as one undo step.
    pub fn pointer_up(&mut self, doc: &mut Document) {
        if !doc.is_drawing() {
            return;
        }
        if let Some(id) = doc.last_element().map(|e| e.id().to_string()) {
            doc.update_element(&id, &ElementPatch::draggable(true));
        }
        doc.set_is_drawing(false);
        doc.end_batch();
        self.drag_start = None;
        doc.set_selected_element_id(None);
    }

    /// Abandon an in-progress gesture, keeping what was drawn so far.
    pub fn cancel(&mut self, doc: &mut Document) {
        self.pointer_up(doc);
    }

    /// Drop a character icon centered on `pos`.
    pub fn place_icon(
        &mut self,
        doc: &mut Document,
        icon: &IconInfo,
        pos: Point,
        background: &str,
    ) {
        doc.add_element(create_icon_element(icon, pos, background));
        doc.set_active_tool(ToolKind::None);
    }
}

fn erase_at(doc: &mut Document, pos: Point) {
    if let Some(id) = doc.first_hit(pos).map(|e| e.id().to_string()) {
        doc.remove_element(&id);
    }
}

fn rectangle_drag(start: Point, pos: Point, modifiers: Modifiers) -> ElementPatch {
    let mut width = pos.x - start.x;
    let mut height = pos.y - start.y;

    if modifiers.shift {
        let size = width.abs().max(height.abs());
        width = size * width.signum();
        height = size * height.signum();
    }

    if modifiers.alt {
        ElementPatch {
            x: Some(start.x - width.abs() / 2.0),
            y: Some(start.y - height.abs() / 2.0),
            width: Some(width.abs()),
            height: Some(height.abs()),
            ..ElementPatch::default()
        }
    } else {
        ElementPatch {
            width: Some(width),
            height: Some(height),
            ..ElementPatch::default()
        }
    }
}

fn circle_drag(start: Point, pos: Point, modifiers: Modifiers) -> ElementPatch {
    let (center, mut rx, mut ry) = if modifiers.alt {
        (start, (pos.x - start.x).abs(), (pos.y - start.y).abs())
    } else {
        let w = pos.x - start.x;
        let h = pos.y - start.y;
        (
            Point::new(start.x + w / 2.0, start.y + h / 2.0),
            (w / 2.0).abs(),
            (h / 2.0).abs(),
        )
    };

    if modifiers.shift {
        let r = rx.max(ry);
        rx = r;
        ry = r;
    }

    ElementPatch {
        x: Some(center.x),
        y: Some(center.y),
        radius_x: Some(rx),
        radius_y: Some(ry),
        ..ElementPatch::default()
    }
}
