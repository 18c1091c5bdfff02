//! Partial element updates.

use serde::{Deserialize, Serialize};

/// A partial update over the union of element fields.
///
/// Fields that do not exist on the target element's kind are ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    pub draggable: Option<bool>,
    pub opacity: Option<f64>,
    pub points: Option<Vec<f64>>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub radius_x: Option<f64>,
    pub radius_y: Option<f64>,
    pub color: Option<String>,
    pub fill: Option<String>,
    pub stroke_width: Option<f64>,
    pub border_radius: Option<f64>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub is_editing: Option<bool>,
}

impl ElementPatch {
    /// Replace a polyline's points.
    pub fn points(points: Vec<f64>) -> Self {
        Self {
            points: Some(points),
            ..Self::default()
        }
    }

    /// Move a positioned element.
    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn draggable(draggable: bool) -> Self {
        Self {
            draggable: Some(draggable),
            ..Self::default()
        }
    }
}
