//! Icon renderers and the factory that picks one per request.
//!
//! # Architecture
//!
//! Every output format is produced by an [`IconRenderer`]:
//!
//! - [`RasterIconRenderer`] draws onto a pixel canvas and encodes PNG, GIF or
//!   ICO.
//! - [`VectorIconRenderer`] writes an SVG document.
//!
//! Both draw the same scene (see `scene`): an ellipse inset one pixel from the
//! canvas edge, and the text centered on the canvas at half the icon size.
//! A renderer is created for one [`RenderRequest`], renders once and is
//! dropped; nothing is cached between requests.

mod raster;
mod scene;
mod vector;

pub use raster::RasterIconRenderer;
pub use vector::VectorIconRenderer;

use crate::color::{ColorResolver, Fill};
use crate::error::RenderError;
use crate::font::FontCatalog;
use crate::options::{IconFormat, IconOptions};

// ============================================================================
// RenderRequest
// ============================================================================

/// Everything needed to render one icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderRequest {
    /// Text drawn on the icon. `None` or blank renders the background only.
    pub text: Option<String>,
    /// Edge length in pixels.
    pub size: u32,
    pub font_name: String,
    pub background: String,
    pub foreground: String,
    pub format: IconFormat,
}

impl RenderRequest {
    /// Copies the defaults from `options`; only the text varies per request.
    pub fn from_options(options: &IconOptions, text: Option<String>) -> Self {
        Self {
            text,
            size: options.default_size(),
            font_name: options.font_name().to_string(),
            background: options.default_background().to_string(),
            foreground: options.default_foreground().to_string(),
            format: options.format(),
        }
    }

    /// The text to draw, trimmed, or `None` if there is nothing to draw.
    pub fn display_text(&self) -> Option<&str> {
        self.text
            .as_deref()
            .map(str::trim)
            .filter(|text| !text.is_empty())
    }
}

// ============================================================================
// IconRenderer
// ============================================================================

/// Produces the encoded bytes of one icon.
///
/// Implementations own their request and touch no shared mutable state, so
/// independent renderers may run concurrently on any thread.
pub trait IconRenderer: Send {
    /// The encoding this renderer produces.
    fn format(&self) -> IconFormat;

    /// Draws and encodes the icon.
    fn render(&self) -> Result<Vec<u8>, RenderError>;
}

// ============================================================================
// RendererFactory
// ============================================================================

/// Maps a format to its renderer and hands it the shared font catalog.
#[derive(Debug, Clone)]
pub struct RendererFactory {
    fonts: FontCatalog,
}

impl RendererFactory {
    pub fn new(fonts: FontCatalog) -> Self {
        Self { fonts }
    }

    pub fn fonts(&self) -> &FontCatalog {
        &self.fonts
    }

    /// Creates the renderer for `request.format`.
    pub fn create(&self, request: RenderRequest) -> Box<dyn IconRenderer> {
        match request.format {
            IconFormat::Ico | IconFormat::Png | IconFormat::Gif => {
                Box::new(RasterIconRenderer::new(request, self.fonts.clone()))
            }
            IconFormat::Svg => Box::new(VectorIconRenderer::new(request)),
        }
    }
}

/// Resolves a color setting, naming `field` in the error.
pub(crate) fn resolve_fill(field: &'static str, spec: &str) -> Result<Fill, RenderError> {
    ColorResolver::new()
        .resolve(spec)
        .ok_or_else(|| RenderError::InvalidConfiguration {
            field,
            reason: format!("`{spec}` is not a valid {field}"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(format: IconFormat) -> RenderRequest {
        let options = IconOptions::default();
        RenderRequest {
            format,
            ..RenderRequest::from_options(&options, Some("DI".into()))
        }
    }

    #[test]
    fn request_copies_option_defaults() {
        let options = IconOptions::default();
        let request = RenderRequest::from_options(&options, None);

        assert_eq!(request.size, 64);
        assert_eq!(request.background, "#00137F");
        assert_eq!(request.foreground, "#FFFFFF");
        assert_eq!(request.font_name, "sans-serif");
        assert_eq!(request.format, IconFormat::Png);
        assert_eq!(request.text, None);
    }

    #[test]
    fn display_text_trims_and_skips_blank() {
        let mut request = request(IconFormat::Png);
        assert_eq!(request.display_text(), Some("DI"));

        request.text = Some("  AB ".into());
        assert_eq!(request.display_text(), Some("AB"));

        request.text = Some("   ".into());
        assert_eq!(request.display_text(), None);

        request.text = None;
        assert_eq!(request.display_text(), None);
    }

    #[test]
    fn factory_dispatches_on_format() {
        let factory = RendererFactory::new(FontCatalog::empty());
        for format in IconFormat::ALL {
            let renderer = factory.create(request(format));
            assert_eq!(renderer.format(), format);
        }
    }

    #[test]
    fn unresolvable_color_names_field() {
        let err = resolve_fill("foreground", "bogus").unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidConfiguration { field: "foreground", .. }
        ));
    }
}
