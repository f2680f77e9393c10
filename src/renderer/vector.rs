//! SVG renderer.

use super::scene::Scene;
use super::{resolve_fill, IconRenderer, RenderRequest};
use crate::error::RenderError;
use crate::options::IconFormat;

/// Writes the icon as a standalone SVG document.
///
/// The markup uses the same ellipse inset and text placement as
/// [`RasterIconRenderer`](super::RasterIconRenderer), so rasterizing the
/// document reproduces the raster output.
#[derive(Debug)]
pub struct VectorIconRenderer {
    request: RenderRequest,
}

impl VectorIconRenderer {
    pub fn new(request: RenderRequest) -> Self {
        Self { request }
    }
}

impl IconRenderer for VectorIconRenderer {
    fn format(&self) -> IconFormat {
        IconFormat::Svg
    }

    fn render(&self) -> Result<Vec<u8>, RenderError> {
        let scene = Scene {
            size: self.request.size,
            font_name: &self.request.font_name,
            text: self.request.display_text(),
            background: resolve_fill("background", &self.request.background)?,
            foreground: resolve_fill("foreground", &self.request.foreground)?,
        };
        Ok(scene.document().into_bytes())
    }
}
