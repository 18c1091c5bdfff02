//! Boundary to the 2D renderer that draws the element collection.

use crate::elements::Element;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Scale of sequence thumbnails relative to the on-screen render.
pub const THUMBNAIL_PIXEL_RATIO: f64 = 0.15;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("no render surface is attached")]
    NoSurface,
    #[error("thumbnail capture failed: {0}")]
    Capture(String),
}

/// Something that can snapshot the current canvas.
///
/// Capture is best-effort; callers log failures and carry on.
pub trait RenderSurface {
    /// Render `elements` at [`THUMBNAIL_PIXEL_RATIO`] and return a data URL.
    fn capture_thumbnail(&mut self, elements: &[Element]) -> Result<String, RenderError>;
}

/// Encode raw image bytes as a `data:` URL.
pub fn data_url(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Surface for headless sessions: the thumbnail is the element list as JSON.
#[derive(Debug, Default)]
pub struct JsonSurface;

impl RenderSurface for JsonSurface {
    fn capture_thumbnail(&mut self, elements: &[Element]) -> Result<String, RenderError> {
        let json = serde_json::to_vec(elements).map_err(|e| RenderError::Capture(e.to_string()))?;
        Ok(data_url("application/json", &json))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_url() {
        assert_eq!(data_url("image/png", b"hi"), "data:image/png;base64,aGk=");
    }

    #[test]
    fn test_json_surface_encodes_elements() {
        let url = JsonSurface.capture_thumbnail(&[]).unwrap();
        assert_eq!(url, "data:application/json;base64,W10=");
    }
}
