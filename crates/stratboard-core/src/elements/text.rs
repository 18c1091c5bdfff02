//! Text label element.

use super::{ElementId, ElementPatch, ElementTrait, default_color, default_opacity, rect_contains};
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};

/// On-screen scale compensation applied to text boxes by the editor.
pub const TEXT_BOX_SCALE: f64 = 3.0;

fn default_width() -> f64 {
    200.0
}

fn default_font_size() -> f64 {
    16.0
}

fn default_font_family() -> String {
    "Arial".to_string()
}

/// A text label centered on `(x, y)` for hit testing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Text {
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
    pub text: String,
    /// Wrap boundary.
    #[serde(default = "default_width")]
    pub width: f64,
    /// Measured box height in canvas units (already scale-compensated), 0 when unknown.
    #[serde(default)]
    pub height: f64,
    #[serde(default = "default_font_size")]
    pub font_size: f64,
    #[serde(default = "default_font_family")]
    pub font_family: String,
    #[serde(default = "default_color")]
    pub color: String,
    #[serde(default)]
    pub is_editing: bool,
}

impl Text {
    pub fn new(id: impl Into<ElementId>, position: Point, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            draggable: false,
            opacity: default_opacity(),
            x: position.x,
            y: position.y,
            text: text.into(),
            width: default_width(),
            height: 0.0,
            font_size: default_font_size(),
            font_family: default_font_family(),
            color: default_color(),
            is_editing: false,
        }
    }
}

impl ElementTrait for Text {
    fn id(&self) -> &str {
        &self.id
    }

    fn bounds(&self) -> Rect {
        let half_w = self.width * TEXT_BOX_SCALE / 2.0;
        let half_h = self.height / 2.0;
        Rect::new(self.x - half_w, self.y - half_h, self.x + half_w, self.y + half_h)
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
        if let Some(v) = &patch.text {
            self.text = v.clone();
        }
        if let Some(v) = patch.font_size {
            self.font_size = v;
        }
        if let Some(v) = &patch.color {
            self.color = v.clone();
        }
        if let Some(v) = patch.is_editing {
            self.is_editing = v;
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
    fn test_hit_box_is_scaled_horizontally() {
        let mut text = Text::new("t", Point::new(100.0, 100.0), "B site");
        text.width = 20.0;
        text.height = 30.0;
        // half width = 20 * 3 / 2 = 30, half height = 15
        assert!(text.hit_test(Point::new(129.0, 114.0)));
        assert!(text.hit_test(Point::new(71.0, 86.0)));
        assert!(!text.hit_test(Point::new(131.0, 100.0)));
        assert!(!text.hit_test(Point::new(100.0, 116.0)));
    }
}
