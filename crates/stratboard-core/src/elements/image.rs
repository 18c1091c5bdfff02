//! Image element, used for character icons and dropped pictures.

use super::{ElementId, ElementPatch, ElementTrait, default_opacity, rect_contains};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

fn default_background() -> String {
    "#45556c".to_string()
}

/// An image drawn into a rounded box.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    pub id: ElementId,
    #[serde(default)]
    pub draggable: bool,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    /// Source reference (URL or asset path).
    #[serde(default)]
    pub src: String,
    #[serde(default = "default_background")]
    pub background_color: String,
    #[serde(default)]
    pub border_radius: f64,
}

impl Image {
    pub fn new(
        id: impl Into<ElementId>,
        position: Point,
        width: f64,
        height: f64,
        src: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            draggable: false,
            opacity: default_opacity(),
            x: position.x,
            y: position.y,
            width,
            height,
            src: src.into(),
            background_color: default_background(),
            border_radius: 0.0,
        }
    }
}

impl ElementTrait for Image {
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
