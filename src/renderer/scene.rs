//! SVG markup for the icon scene, shared by both renderers.
//!
//! The vector renderer writes the whole document. The raster renderer paints
//! the background itself and only hands the text document to `usvg`, which
//! lays the glyphs out and turns them into outlines.

use crate::color::Fill;
use crate::font::is_generic_family;

// ============================================================================
// Geometry
// ============================================================================

/// Bounds of the background ellipse: origin `(1, 1)`, both sides `size - 3`.
///
/// The inset keeps anti-aliased edges from being clipped by the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct EllipseBounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl EllipseBounds {
    pub fn inscribed(size: u32) -> Self {
        let side = size.saturating_sub(3) as f32;
        Self {
            x: 1.0,
            y: 1.0,
            width: side,
            height: side,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn radii(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

// ============================================================================
// Scene
// ============================================================================

/// One icon's drawable content.
pub(crate) struct Scene<'a> {
    pub size: u32,
    pub font_name: &'a str,
    pub text: Option<&'a str>,
    pub background: Fill,
    pub foreground: Fill,
}

impl Scene<'_> {
    /// Complete SVG document: background ellipse plus text.
    pub fn document(&self) -> String {
        let mut svg = self.open_document();
        svg.push_str(&self.background_element());
        if let Some(text) = self.text_element() {
            svg.push_str(&text);
        }
        svg.push_str("</svg>");
        svg
    }

    /// SVG document holding only the text, or `None` if there is no text.
    pub fn text_document(&self) -> Option<String> {
        let text = self.text_element()?;
        let mut svg = self.open_document();
        svg.push_str(&text);
        svg.push_str("</svg>");
        Some(svg)
    }

    fn open_document(&self) -> String {
        let size = self.size;
        format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        )
    }

    fn background_element(&self) -> String {
        let bounds = EllipseBounds::inscribed(self.size);
        let (cx, cy) = bounds.center();
        let (rx, ry) = bounds.radii();
        let (fill, opacity) = self.background.svg_paint();
        format!(
            r#"<ellipse cx="{cx}" cy="{cy}" rx="{rx}" ry="{ry}" fill="{fill}" fill-opacity="{opacity}"/>"#
        )
    }

    fn text_element(&self) -> Option<String> {
        let text = self.text?;
        let center = self.size as f32 / 2.0;
        let font_size = self.size / 2;
        let (fill, opacity) = self.foreground.svg_paint();

        Some(format!(
            r#"<text x="{center}" y="{center}" font-family="{family}" font-size="{font_size}" text-anchor="middle" dominant-baseline="central" fill="{fill}" fill-opacity="{opacity}">{text}</text>"#,
            family = font_family(self.font_name),
            text = escape_xml(text),
        ))
    }
}

/// `font-family` attribute value: generic families bare, other names quoted.
///
/// CSS string escapes are not unescaped by the SVG parser, so a name holding
/// an apostrophe is wrapped in double quotes instead.
fn font_family(name: &str) -> String {
    let name = name.trim();
    if is_generic_family(name) {
        name.to_ascii_lowercase()
    } else if name.contains('\'') {
        format!("&quot;{}&quot;", escape_xml(name))
    } else {
        format!("'{}'", escape_xml(name))
    }
}

/// Escapes the five XML special characters.
fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            c => escaped.push(c),
        }
    }
    escaped
}
