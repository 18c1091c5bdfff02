//! Drawable map annotations.
//!
//! Every element kind is its own struct; [`Element`] is the closed union the
//! document, interpolator and renderer switch over. The JSON form matches
//! the exported `.map` schema: an object tagged by `type` with camelCase
//! fields.

pub mod anchors;
mod arrow;
mod circle;
mod factory;
mod image;
mod line;
mod patch;
mod rectangle;
mod text;

pub use arrow::Arrow;
pub use circle::Circle;
pub use factory::{
    ICON_SIZE, IconInfo, ShapeKind, create_icon_element, create_line_element, create_shape_element,
    create_text_element,
};
pub use image::Image;
pub use line::Line;
pub use patch::ElementPatch;
pub use rectangle::Rectangle;
pub use text::Text;

use kurbo::{Point, Rect};
use peniko::Color;
use serde::{Deserialize, Deserializer, Serialize};

/// Unique identifier for elements within one collection.
pub type ElementId = String;

/// Extra hit distance around line strokes, in canvas units.
pub const LINE_HIT_PADDING: f64 = 5.0;

/// Discriminant of [`Element`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Line,
    Arrow,
    Rectangle,
    Circle,
    Text,
    Image,
}

impl ElementKind {
    /// Lowercase name, also used as the id prefix for new elements.
    pub fn name(self) -> &'static str {
        match self {
            ElementKind::Line => "line",
            ElementKind::Arrow => "arrow",
            ElementKind::Rectangle => "rectangle",
            ElementKind::Circle => "circle",
            ElementKind::Text => "text",
            ElementKind::Image => "image",
        }
    }
}

/// Behaviour shared by every element struct.
pub trait ElementTrait {
    fn id(&self) -> &str;

    /// Axis-aligned bounds in canonical canvas coordinates.
    fn bounds(&self) -> Rect;

    /// Eraser hit test.
    fn hit_test(&self, point: Point) -> bool;

    /// Opacity in percent (0-100).
    fn opacity(&self) -> f64;

    fn set_opacity(&mut self, opacity: f64);

    fn draggable(&self) -> bool;

    fn set_draggable(&mut self, draggable: bool);

    /// Apply the fields of `patch` that exist on this kind.
    fn apply(&mut self, patch: &ElementPatch);
}

/// One drawable annotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Element {
    Line(Line),
    Arrow(Arrow),
    Rectangle(Rectangle),
    Circle(Circle),
    Text(Text),
    #[serde(alias = "hero")]
    Image(Image),
}

macro_rules! dispatch {
    ($self:expr, $el:ident => $body:expr) => {
        match $self {
            Element::Line($el) => $body,
            Element::Arrow($el) => $body,
            Element::Rectangle($el) => $body,
            Element::Circle($el) => $body,
            Element::Text($el) => $body,
            Element::Image($el) => $body,
        }
    };
}

impl Element {
    pub fn id(&self) -> &str {
        dispatch!(self, e => e.id())
    }

    pub fn kind(&self) -> ElementKind {
        match self {
            Element::Line(_) => ElementKind::Line,
            Element::Arrow(_) => ElementKind::Arrow,
            Element::Rectangle(_) => ElementKind::Rectangle,
            Element::Circle(_) => ElementKind::Circle,
            Element::Text(_) => ElementKind::Text,
            Element::Image(_) => ElementKind::Image,
        }
    }

    pub fn bounds(&self) -> Rect {
        dispatch!(self, e => e.bounds())
    }

    /// Whether `point` lies within the element's visual bounds.
    pub fn hit_test(&self, point: Point) -> bool {
        dispatch!(self, e => e.hit_test(point))
    }

    pub fn opacity(&self) -> f64 {
        dispatch!(self, e => e.opacity())
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        dispatch!(self, e => e.set_opacity(opacity))
    }

    pub fn draggable(&self) -> bool {
        dispatch!(self, e => e.draggable())
    }

    pub fn set_draggable(&mut self, draggable: bool) {
        dispatch!(self, e => e.set_draggable(draggable))
    }

    pub fn apply(&mut self, patch: &ElementPatch) {
        dispatch!(self, e => e.apply(patch))
    }

    /// Anchor position for positioned kinds; `None` for polylines.
    pub fn position(&self) -> Option<Point> {
        match self {
            Element::Line(_) | Element::Arrow(_) => None,
            Element::Rectangle(r) => Some(Point::new(r.x, r.y)),
            Element::Circle(c) => Some(Point::new(c.x, c.y)),
            Element::Text(t) => Some(Point::new(t.x, t.y)),
            Element::Image(i) => Some(Point::new(i.x, i.y)),
        }
    }

    /// Move a positioned element. Polylines are left untouched.
    pub fn set_position(&mut self, p: Point) {
        match self {
            Element::Line(_) | Element::Arrow(_) => {}
            Element::Rectangle(r) => (r.x, r.y) = (p.x, p.y),
            Element::Circle(c) => (c.x, c.y) = (p.x, p.y),
            Element::Text(t) => (t.x, t.y) = (p.x, p.y),
            Element::Image(i) => (i.x, i.y) = (p.x, p.y),
        }
    }

    /// Flat point list of a line or arrow.
    pub fn points(&self) -> Option<&[f64]> {
        match self {
            Element::Line(l) => Some(&l.points),
            Element::Arrow(a) => Some(&a.points),
            _ => None,
        }
    }

    /// Whether this is a character icon placement.
    pub fn is_icon(&self) -> bool {
        matches!(self, Element::Image(i) if i.id.starts_with("hero-"))
    }
}

/// Inclusive rectangle containment (kurbo's `contains` is half-open).
pub(crate) fn rect_contains(rect: Rect, point: Point) -> bool {
    point.x >= rect.x0 && point.x <= rect.x1 && point.y >= rect.y0 && point.y <= rect.y1
}

/// Polyline bounds over a flat coordinate list.
pub(crate) fn flat_bounds(flat: &[f64]) -> Rect {
    let mut pts = crate::geometry::points_from_flat(flat).into_iter();
    let Some(first) = pts.next() else {
        return Rect::ZERO;
    };
    pts.fold(Rect::from_points(first, first), |r, p| r.union_pt(p))
}

/// Deserialize a flat coordinate list, dropping an odd trailing value.
pub(crate) fn even_points<'de, D>(deserializer: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let mut points = Vec::<f64>::deserialize(deserializer)?;
    if points.len() % 2 == 1 {
        points.pop();
    }
    Ok(points)
}

pub(crate) fn default_opacity() -> f64 {
    100.0
}

pub(crate) fn default_color() -> String {
    "#000000".to_string()
}

pub(crate) fn default_fill() -> String {
    "#00000000".to_string()
}

/// Parse a CSS hex color (`#rgb`, `#rrggbb`, `#rrggbbaa`) for renderers.
pub fn parse_color(color: &str) -> Option<Color> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |s: &str| u8::from_str_radix(s, 16).ok();
    match hex.len() {
        3 => {
            let r = channel(&hex[0..1])? * 17;
            let g = channel(&hex[1..2])? * 17;
            let b = channel(&hex[2..3])? * 17;
            Some(Color::from_rgba8(r, g, b, 255))
        }
        6 => Some(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            255,
        )),
        8 => Some(Color::from_rgba8(
            channel(&hex[0..2])?,
            channel(&hex[2..4])?,
            channel(&hex[4..6])?,
            channel(&hex[6..8])?,
        )),
        _ => None,
    }
}
