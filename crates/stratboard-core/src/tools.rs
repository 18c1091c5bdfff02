//! Active tool and per-tool settings.

use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ToolKind {
    /// No drawing tool; clicks select.
    #[default]
    None,
    Pen,
    Erase,
    Text,
    Image,
    Rectangle,
    Circle,
    Line,
    Icons,
}

impl ToolKind {
    /// Whether pointer-down on the canvas starts a drawing gesture.
    pub fn draws(self) -> bool {
        matches!(
            self,
            ToolKind::Pen
                | ToolKind::Line
                | ToolKind::Rectangle
                | ToolKind::Circle
                | ToolKind::Erase
        )
    }
}

/// Stroke style used by the pen and line tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum BrushType {
    #[default]
    Line,
    DashedLine,
    Arrow,
    DashedArrow,
}

impl BrushType {
    pub fn is_arrow(self) -> bool {
        matches!(self, BrushType::Arrow | BrushType::DashedArrow)
    }

    pub fn is_dashed(self) -> bool {
        matches!(self, BrushType::DashedLine | BrushType::DashedArrow)
    }
}

/// Arrowhead dimensions at the base brush size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSettings {
    pub length: f64,
    pub width: f64,
}

impl Default for PointerSettings {
    fn default() -> Self {
        Self {
            length: 20.0,
            width: 40.0,
        }
    }
}

/// Pen and line tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PenSettings {
    pub brush_type: BrushType,
    pub color: String,
    pub opacity: f64,
    pub brush_size: f64,
    pub dash_pattern: Vec<f64>,
    pub pointer: PointerSettings,
    /// Upper bound on editable anchors per freehand stroke.
    pub max_anchors: usize,
    /// Minimum vertex stride between anchors.
    pub min_anchor_step: usize,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            brush_type: BrushType::Line,
            color: "#000000".to_string(),
            opacity: 100.0,
            brush_size: 16.0,
            dash_pattern: vec![50.0, 15.0],
            pointer: PointerSettings::default(),
            max_anchors: 10,
            min_anchor_step: 10,
        }
    }
}

/// Rectangle and circle tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShapeSettings {
    pub brush_type: BrushType,
    pub color: String,
    pub fill: String,
    pub stroke_width: f64,
    pub border_radius: f64,
    pub opacity: f64,
    pub dash_pattern: Vec<f64>,
}

impl Default for ShapeSettings {
    fn default() -> Self {
        Self {
            brush_type: BrushType::Line,
            color: "#000000".to_string(),
            fill: "#00000000".to_string(),
            stroke_width: 16.0,
            border_radius: 4.0,
            opacity: 100.0,
            dash_pattern: vec![50.0, 15.0],
        }
    }
}

/// Text tool settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TextSettings {
    pub color: String,
    pub font_size: f64,
    pub font_family: String,
    pub opacity: f64,
}

impl Default for TextSettings {
    fn default() -> Self {
        Self {
            color: "#eeeeee".to_string(),
            font_size: 24.0,
            font_family: "Arial".to_string(),
            opacity: 100.0,
        }
    }
}

/// Settings for every tool.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    pub pen: PenSettings,
    pub shape: ShapeSettings,
    pub text: TextSettings,
}
