//! Element construction from tool settings.

use super::{Arrow, Circle, Element, ElementKind, Image, Line, Rectangle, Text};
use crate::geometry::{BASE_BRUSH_SIZE, scale_dash_pattern};
use crate::tools::{PenSettings, ShapeSettings, TextSettings};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Side length of a placed character icon.
pub const ICON_SIZE: f64 = 80.0;

const ICON_BORDER_RADIUS: f64 = 8.0;
const MIN_POINTER_SIZE: f64 = 5.0;

/// A character icon from the palette.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IconInfo {
    /// Stable palette identifier, e.g. `"sova"`.
    pub id: String,
    pub name: String,
    /// Image source for the icon.
    pub src: String,
}

/// Which box shape the shape tools create.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

fn new_id(kind: ElementKind) -> String {
    format!("{}-{}", kind.name(), Uuid::new_v4())
}

/// Start a pen or line stroke at `position`.
///
/// Freehand strokes start with one vertex; straight lines with two identical
/// vertices so the end point can be dragged.
pub fn create_line_element(pen: &PenSettings, position: Point, is_straight: bool) -> Element {
    let points = if is_straight {
        vec![position.x, position.y, position.x, position.y]
    } else {
        vec![position.x, position.y]
    };
    let dash = pen
        .brush_type
        .is_dashed()
        .then(|| scale_dash_pattern(&pen.dash_pattern, pen.brush_size));

    if pen.brush_type.is_arrow() {
        let scale = pen.brush_size / BASE_BRUSH_SIZE;
        let mut arrow = Arrow::new(new_id(ElementKind::Arrow), points);
        arrow.color = pen.color.clone();
        arrow.stroke_width = pen.brush_size;
        arrow.opacity = pen.opacity;
        arrow.dash = dash;
        arrow.pointer_length = (pen.pointer.length * scale).max(MIN_POINTER_SIZE);
        arrow.pointer_width = (pen.pointer.width * scale).max(MIN_POINTER_SIZE);
        Element::Arrow(arrow)
    } else {
        let mut line = Line::new(new_id(ElementKind::Line), points);
        line.color = pen.color.clone();
        line.stroke_width = pen.brush_size;
        line.opacity = pen.opacity;
        line.dash = dash;
        Element::Line(line)
    }
}

/// Start a rectangle (0x0) or circle (radius 1) at `position`.
pub fn create_shape_element(shape: &ShapeSettings, position: Point, kind: ShapeKind) -> Element {
    let dash = shape
        .brush_type
        .is_dashed()
        .then(|| scale_dash_pattern(&shape.dash_pattern, shape.stroke_width));

    match kind {
        ShapeKind::Rectangle => {
            let mut rect = Rectangle::new(new_id(ElementKind::Rectangle), position, 0.0, 0.0);
            rect.fill = shape.fill.clone();
            rect.color = shape.color.clone();
            rect.stroke_width = shape.stroke_width;
            rect.border_radius = shape.border_radius;
            rect.opacity = shape.opacity;
            rect.dash = dash;
            Element::Rectangle(rect)
        }
        ShapeKind::Circle => {
            let mut circle = Circle::new(new_id(ElementKind::Circle), position, 1.0, 1.0);
            circle.fill = shape.fill.clone();
            circle.color = shape.color.clone();
            circle.stroke_width = shape.stroke_width;
            circle.opacity = shape.opacity;
            circle.dash = dash;
            Element::Circle(circle)
        }
    }
}

/// An empty, draggable text box in editing mode.
pub fn create_text_element(settings: &TextSettings, position: Point) -> Element {
    let mut text = Text::new(new_id(ElementKind::Text), position, "");
    text.font_size = settings.font_size;
    text.font_family = settings.font_family.clone();
    text.color = settings.color.clone();
    text.opacity = settings.opacity;
    text.draggable = true;
    text.is_editing = true;
    Element::Text(text)
}

/// A character icon centered on `position`.
pub fn create_icon_element(icon: &IconInfo, position: Point, background: &str) -> Element {
    let half = ICON_SIZE / 2.0;
    let id = format!("hero-{}-{}", icon.id, Uuid::new_v4());
    let mut image = Image::new(
        id,
        Point::new(position.x - half, position.y - half),
        ICON_SIZE,
        ICON_SIZE,
        icon.src.clone(),
    );
    image.border_radius = ICON_BORDER_RADIUS;
    image.background_color = background.to_string();
    image.draggable = true;
    Element::Image(image)
}
