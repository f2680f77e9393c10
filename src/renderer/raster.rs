//! Pixel renderer for PNG, GIF and ICO output.

use std::io::Cursor;

use image::{Rgba, RgbaImage};
use resvg::tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, Rect, Transform};
use resvg::usvg::{Options, Tree};

use super::scene::{EllipseBounds, Scene};
use super::{resolve_fill, IconRenderer, RenderRequest};
use crate::color::Fill;
use crate::error::RenderError;
use crate::font::FontCatalog;
use crate::options::IconFormat;

/// Draws the icon onto a `size x size` anti-aliased canvas and encodes it.
#[derive(Debug)]
pub struct RasterIconRenderer {
    request: RenderRequest,
    fonts: FontCatalog,
}

impl RasterIconRenderer {
    pub fn new(request: RenderRequest, fonts: FontCatalog) -> Self {
        Self { request, fonts }
    }

    /// Draws the scene and returns the unencoded image.
    pub fn draw(&self) -> Result<RgbaImage, RenderError> {
        let size = self.request.size;
        let scene = Scene {
            size,
            font_name: &self.request.font_name,
            text: self.request.display_text(),
            background: resolve_fill("background", &self.request.background)?,
            foreground: resolve_fill("foreground", &self.request.foreground)?,
        };

        let mut pixmap = Pixmap::new(size, size).ok_or(RenderError::Canvas { size })?;
        fill_ellipse(&mut pixmap, EllipseBounds::inscribed(size), &scene.background)?;

        if let Some(svg) = scene.text_document() {
            let options = Options {
                fontdb: self.fonts.database(),
                ..Options::default()
            };
            let tree = Tree::from_str(&svg, &options)?;
            resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());
        }

        Ok(pixmap_to_rgba_image(&pixmap))
    }
}

impl IconRenderer for RasterIconRenderer {
    fn format(&self) -> IconFormat {
        self.request.format
    }

    fn render(&self) -> Result<Vec<u8>, RenderError> {
        let image = self.draw()?;
        encode(&image, self.request.format)
    }
}

fn fill_ellipse(pixmap: &mut Pixmap, bounds: EllipseBounds, fill: &Fill) -> Result<(), RenderError> {
    let size = pixmap.width();
    let invalid = || RenderError::Canvas { size };
    let rect = Rect::from_xywh(bounds.x, bounds.y, bounds.width, bounds.height).ok_or_else(invalid)?;
    let path = PathBuilder::from_oval(rect).ok_or_else(invalid)?;

    let [r, g, b, a] = fill.rgba();
    let mut paint = Paint::default();
    paint.set_color_rgba8(r, g, b, a);
    paint.anti_alias = true;

    pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
    Ok(())
}

/// Converts a premultiplied tiny-skia pixmap into a straight-alpha image.
fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut image = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in image.pixels_mut().zip(pixmap.pixels()) {
        let color = src.demultiply();
        *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
    }
    image
}

fn encode(image: &RgbaImage, format: IconFormat) -> Result<Vec<u8>, RenderError> {
    let target = format.image_format().ok_or_else(|| RenderError::InvalidConfiguration {
        field: "format",
        reason: format!("{format} is not a raster format"),
    })?;

    let mut bytes = Vec::new();
    image.write_to(&mut Cursor::new(&mut bytes), target)?;
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::installed_fonts;
    use crate::options::IconOptions;
    use resvg::usvg::fontdb::Family;

    fn request(format: IconFormat, size: u32, text: Option<&str>) -> RenderRequest {
        RenderRequest {
            size,
            format,
            ..RenderRequest::from_options(&IconOptions::default(), text.map(String::from))
        }
    }

    fn render(request: RenderRequest) -> Result<Vec<u8>, RenderError> {
        RasterIconRenderer::new(request, FontCatalog::empty()).render()
    }

    #[test]
    fn png_has_requested_dimensions() {
        for size in [32, 33, 64, 100, 512] {
            let bytes = render(request(IconFormat::Png, size, Some("DI"))).unwrap();
            let image = image::load_from_memory_with_format(&bytes, image::ImageFormat::Png).unwrap();
            assert_eq!((image.width(), image.height()), (size, size));
        }
    }

    #[test]
    fn gif_and_ico_have_requested_dimensions() {
        for format in [IconFormat::Gif, IconFormat::Ico] {
            let bytes = render(request(format, 48, Some("AB"))).unwrap();
            let image = image::load_from_memory(&bytes).unwrap();
            assert_eq!((image.width(), image.height()), (48, 48), "{format}");
        }
    }

    #[test]
    fn ico_above_256_fails_to_encode() {
        let err = render(request(IconFormat::Ico, 512, None)).unwrap_err();
        assert!(matches!(err, RenderError::Encode(_)));
    }

    #[test]
    fn rendering_is_deterministic() {
        for format in [IconFormat::Png, IconFormat::Gif, IconFormat::Ico] {
            let first = render(request(format, 64, Some("DI"))).unwrap();
            let second = render(request(format, 64, Some("DI"))).unwrap();
            assert_eq!(first, second, "{format}");
        }
    }

    #[test]
    fn background_fills_inset_circle() {
        let renderer = RasterIconRenderer::new(request(IconFormat::Png, 64, None), FontCatalog::empty());
        let image = renderer.draw().unwrap();

        assert_eq!(image.get_pixel(32, 32).0, [0x00, 0x13, 0x7F, 0xFF]);
        assert_eq!(image.get_pixel(0, 0).0[3], 0, "corners stay transparent");
        assert_eq!(image.get_pixel(63, 32).0[3], 0, "ellipse ends before the right edge");
    }

    #[test]
    fn blank_text_draws_background_only() {
        let blank = RasterIconRenderer::new(request(IconFormat::Png, 64, Some("  ")), FontCatalog::empty());
        let none = RasterIconRenderer::new(request(IconFormat::Png, 64, None), FontCatalog::empty());
        assert_eq!(blank.draw().unwrap(), none.draw().unwrap());
    }

    #[test]
    fn invalid_background_is_reported() {
        let mut request = request(IconFormat::Png, 64, None);
        request.background = "not-a-color".into();
        let err = render(request).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidConfiguration { field: "background", .. }
        ));
    }

    #[test]
    fn invalid_foreground_is_reported() {
        let mut request = request(IconFormat::Gif, 64, Some("DI"));
        request.foreground = "#GGGGGG".into();
        let err = render(request).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidConfiguration { field: "foreground", .. }
        ));
    }

    #[test]
    fn hex_without_hash_matches_hex_with_hash() {
        let mut plain = request(IconFormat::Png, 32, None);
        plain.background = "C0FFEE".into();
        let mut hashed = plain.clone();
        hashed.background = "#C0FFEE".into();
        assert_eq!(render(plain).unwrap(), render(hashed).unwrap());
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of the near-white pixels.
    fn foreground_bounds(image: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        image
            .enumerate_pixels()
            .filter(|(_, _, px)| px.0[..3].iter().all(|&c| c > 200))
            .fold(None, |bounds, (x, y, _)| match bounds {
                None => Some((x, y, x, y)),
                Some((x0, y0, x1, y1)) => Some((x0.min(x), y0.min(y), x1.max(x), y1.max(y))),
            })
    }

    fn assert_centered_text(fonts: FontCatalog, font_name: &str) {
        let mut request = request(IconFormat::Png, 128, Some("DI"));
        request.font_name = font_name.to_string();
        let image = RasterIconRenderer::new(request, fonts).draw().unwrap();

        let (x0, y0, x1, y1) =
            foreground_bounds(&image).unwrap_or_else(|| panic!("no glyphs drawn with {font_name}"));
        let (mid_x, mid_y) = ((x0 + x1) / 2, (y0 + y1) / 2);
        assert!(mid_x.abs_diff(64) <= 16, "{font_name}: text centered at x {mid_x}");
        assert!(mid_y.abs_diff(64) <= 16, "{font_name}: text centered at y {mid_y}");
    }

    #[test]
    fn default_family_draws_centered_text() {
        let Some(fonts) = installed_fonts() else { return };
        assert_centered_text(fonts, IconOptions::default().font_name());
    }

    #[test]
    fn named_family_draws_centered_text() {
        let Some(fonts) = installed_fonts() else { return };
        let family = fonts.database().family_name(&Family::SansSerif).to_string();
        assert_centered_text(fonts, &family);
    }

    #[test]
    fn no_text_leaves_no_foreground() {
        let Some(fonts) = installed_fonts() else { return };
        let image = RasterIconRenderer::new(request(IconFormat::Png, 128, None), fonts)
            .draw()
            .unwrap();
        assert_eq!(foreground_bounds(&image), None);
    }
}
