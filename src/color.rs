//! Turning color settings into something a renderer can paint with.

use std::str::FromStr;

use palette::{Srgb, Srgba, WithAlpha};

/// A resolved paint for the background or foreground of an icon.
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Fill {
    /// A single opaque or translucent color.
    Solid(Srgba<u8>),
}

impl Fill {
    /// The fill color as `#rrggbb` plus an opacity in `0.0..=1.0`, ready for
    /// SVG `fill` / `fill-opacity` attributes.
    pub fn svg_paint(&self) -> (String, f32) {
        match self {
            Fill::Solid(color) => (
                format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue),
                f32::from(color.alpha) / 255.0,
            ),
        }
    }

    /// The fill color as RGBA bytes.
    pub fn rgba(&self) -> [u8; 4] {
        match self {
            Fill::Solid(color) => [color.red, color.green, color.blue, color.alpha],
        }
    }
}

/// Resolves color specification strings.
///
/// Accepted forms:
/// - hex codes `#rgb` / `#rrggbb`, with or without the leading `#`
/// - CSS color names, case-insensitive (`navy`, `RebeccaPurple`)
///
/// Anything else is offered to the image-fill hook, which is where
/// non-color backgrounds would plug in. No image source exists yet, so such
/// specs are rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorResolver;

impl ColorResolver {
    pub fn new() -> Self {
        Self
    }

    /// Returns the fill for `spec`, or `None` if it names neither a color nor
    /// an image.
    pub fn resolve(&self, spec: &str) -> Option<Fill> {
        parse_color(spec)
            .map(Fill::Solid)
            .or_else(|| self.image_fill(spec))
    }

    /// Image-based backgrounds are not supported.
    fn image_fill(&self, _spec: &str) -> Option<Fill> {
        None
    }
}

/// Parses a hex code or CSS color name into an opaque sRGB color.
pub fn parse_color(spec: &str) -> Option<Srgba<u8>> {
    let spec = spec.trim();
    if spec.is_empty() {
        return None;
    }

    let rgb = Srgb::<u8>::from_str(spec)
        .ok()
        .or_else(|| palette::named::from_str(&spec.to_ascii_lowercase()))?;
    Some(rgb.with_alpha(u8::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_with_and_without_hash_match() {
        let with_hash = parse_color("#C0FFEE").unwrap();
        let without_hash = parse_color("C0FFEE").unwrap();
        assert_eq!(with_hash, without_hash);
        assert_eq!(
            (with_hash.red, with_hash.green, with_hash.blue, with_hash.alpha),
            (0xC0, 0xFF, 0xEE, 0xFF)
        );
    }

    #[test]
    fn short_hex() {
        let color = parse_color("#fff").unwrap();
        assert_eq!((color.red, color.green, color.blue), (255, 255, 255));
    }

    #[test]
    fn named_colors_are_case_insensitive() {
        let lower = parse_color("navy").unwrap();
        let mixed = parse_color("Navy").unwrap();
        assert_eq!(lower, mixed);
        assert_eq!((lower.red, lower.green, lower.blue), (0, 0, 128));
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_color("").is_none());
        assert!(parse_color("not-a-color").is_none());
        assert!(parse_color("#12345").is_none());
    }

    #[test]
    fn resolver_falls_through_image_hook() {
        let resolver = ColorResolver::new();
        assert_eq!(
            resolver.resolve("#00137F").map(|fill| fill.rgba()),
            Some([0x00, 0x13, 0x7F, 0xFF])
        );
        assert!(resolver.resolve("https://example.com/bg.png").is_none());
    }

    #[test]
    fn svg_paint() {
        let fill = ColorResolver::new().resolve("DEADB0").unwrap();
        let (color, opacity) = fill.svg_paint();
        assert_eq!(color, "#deadb0");
        assert_eq!(opacity, 1.0);
    }
}
