//! The validated engine configuration.
//!
//! [`IconOptions`] is assembled once (from [`IconOptions::default`] or through
//! [`IconOptionsBuilder`](crate::IconOptionsBuilder)) and then shared
//! read-only by every request. Nothing in this module is re-checked per
//! request.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::OptionsError;

/// Smallest icon edge, in pixels, the engine will ever produce.
pub const MINIMUM_SIZE: u32 = 32;

/// Largest icon edge, in pixels, the engine will ever produce.
pub const MAXIMUM_SIZE: u32 = 4096;

/// Values used for every option that is not configured explicitly.
pub mod defaults {
    use std::time::Duration;

    use super::IconFormat;

    pub const ROUTE: &str = "/images/dynamicicon";
    pub const BACKGROUND: &str = "#00137F";
    pub const FOREGROUND: &str = "#FFFFFF";
    /// Generic family, mapped by [`FontCatalog`](crate::FontCatalog) onto an installed face.
    pub const FONT: &str = "sans-serif";
    pub const SIZE: u32 = 64;
    pub const FORMAT: IconFormat = IconFormat::Png;
    /// One tropical year.
    pub const CACHE: Duration = Duration::from_secs(31_556_926);
}

// ============================================================================
// IconFormat
// ============================================================================

/// Output encoding of a rendered icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum IconFormat {
    Ico = 1,
    Png = 2,
    Gif = 3,
    Svg = 4,
}

impl IconFormat {
    /// Every defined format, in ordinal order.
    pub const ALL: [IconFormat; 4] = [Self::Ico, Self::Png, Self::Gif, Self::Svg];

    /// Lowercase name, also used as the file extension.
    pub fn name(self) -> &'static str {
        match self {
            Self::Ico => "ico",
            Self::Png => "png",
            Self::Gif => "gif",
            Self::Svg => "svg",
        }
    }

    /// Media type written to the `Content-Type` header.
    pub fn content_type(self) -> &'static str {
        match self {
            Self::Ico => "image/vnd.microsoft.icon",
            Self::Png => "image/png",
            Self::Gif => "image/gif",
            Self::Svg => "image/svg+xml",
        }
    }

    /// Returns true for pixel formats, false for the vector format.
    pub fn is_raster(self) -> bool {
        self.image_format().is_some()
    }

    /// The `image` crate encoder target, for raster formats only.
    pub fn image_format(self) -> Option<image::ImageFormat> {
        match self {
            Self::Ico => Some(image::ImageFormat::Ico),
            Self::Png => Some(image::ImageFormat::Png),
            Self::Gif => Some(image::ImageFormat::Gif),
            Self::Svg => None,
        }
    }
}

impl fmt::Display for IconFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for IconFormat {
    type Error = OptionsError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|format| *format as u8 == value)
            .ok_or_else(|| OptionsError::out_of_range("format", format!("{value} is not a defined format")))
    }
}

impl FromStr for IconFormat {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|format| format.name().eq_ignore_ascii_case(name))
            .ok_or_else(|| OptionsError::out_of_range("format", format!("`{s}` is not a defined format")))
    }
}

impl TryFrom<&str> for IconFormat {
    type Error = OptionsError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Infallible> for OptionsError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}

// ============================================================================
// IconOptions
// ============================================================================

/// Validated, immutable engine configuration.
///
/// Every instance satisfies
/// `MINIMUM_SIZE <= minimum_size <= default_size <= maximum_size <= MAXIMUM_SIZE`,
/// has non-blank route, color and font strings, and names a font family that
/// was present when it was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IconOptions {
    pub(crate) route: String,
    pub(crate) minimum_size: u32,
    pub(crate) maximum_size: u32,
    pub(crate) default_size: u32,
    pub(crate) default_background: String,
    pub(crate) default_foreground: String,
    pub(crate) format: IconFormat,
    pub(crate) font_name: String,
    pub(crate) cache_duration: Option<Duration>,
}

impl Default for IconOptions {
    fn default() -> Self {
        Self {
            route: defaults::ROUTE.to_string(),
            minimum_size: MINIMUM_SIZE,
            maximum_size: MAXIMUM_SIZE,
            default_size: defaults::SIZE,
            default_background: defaults::BACKGROUND.to_string(),
            default_foreground: defaults::FOREGROUND.to_string(),
            format: defaults::FORMAT,
            font_name: defaults::FONT.to_string(),
            cache_duration: Some(defaults::CACHE),
        }
    }
}

impl IconOptions {
    /// The single request path icons are served on.
    pub fn route(&self) -> &str {
        &self.route
    }

    pub fn minimum_size(&self) -> u32 {
        self.minimum_size
    }

    pub fn maximum_size(&self) -> u32 {
        self.maximum_size
    }

    /// Edge length, in pixels, of every rendered icon.
    pub fn default_size(&self) -> u32 {
        self.default_size
    }

    pub fn default_background(&self) -> &str {
        &self.default_background
    }

    pub fn default_foreground(&self) -> &str {
        &self.default_foreground
    }

    pub fn format(&self) -> IconFormat {
        self.format
    }

    pub fn font_name(&self) -> &str {
        &self.font_name
    }

    /// How long clients may cache an icon. `None` or zero disables the
    /// cache headers.
    pub fn cache_duration(&self) -> Option<Duration> {
        self.cache_duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options() {
        let options = IconOptions::default();

        assert_eq!(options.route(), "/images/dynamicicon");
        assert_eq!(options.default_background(), "#00137F");
        assert_eq!(options.default_foreground(), "#FFFFFF");
        assert_eq!(options.format(), IconFormat::Png);
        assert_eq!(options.font_name(), "sans-serif");
        assert_eq!(options.minimum_size(), MINIMUM_SIZE);
        assert_eq!(options.default_size(), 64);
        assert_eq!(options.maximum_size(), MAXIMUM_SIZE);
        assert_eq!(options.cache_duration(), Some(Duration::from_secs(31_556_926)));
    }

    #[test]
    fn format_from_ordinal() {
        assert_eq!(IconFormat::try_from(1u8).unwrap(), IconFormat::Ico);
        assert_eq!(IconFormat::try_from(4u8).unwrap(), IconFormat::Svg);

        let err = IconFormat::try_from(0u8).unwrap_err();
        assert!(matches!(err, OptionsError::OutOfRange { field: "format", .. }));
        assert!(IconFormat::try_from(5u8).is_err());
    }

    #[test]
    fn format_from_name() {
        assert_eq!("PNG".parse::<IconFormat>().unwrap(), IconFormat::Png);
        assert_eq!(" gif ".parse::<IconFormat>().unwrap(), IconFormat::Gif);
        assert!(matches!(
            "bmp".parse::<IconFormat>(),
            Err(OptionsError::OutOfRange { .. })
        ));
    }

    #[test]
    fn format_media_types() {
        assert_eq!(IconFormat::Png.content_type(), "image/png");
        assert_eq!(IconFormat::Gif.content_type(), "image/gif");
        assert_eq!(IconFormat::Ico.content_type(), "image/vnd.microsoft.icon");
        assert_eq!(IconFormat::Svg.content_type(), "image/svg+xml");

        assert!(IconFormat::Ico.is_raster());
        assert!(!IconFormat::Svg.is_raster());
    }

    #[test]
    fn format_serializes_lowercase() {
        let json = serde_json::to_string(&IconFormat::Ico).unwrap();
        assert_eq!(json, "\"ico\"");
        let format: IconFormat = serde_json::from_str("\"svg\"").unwrap();
        assert_eq!(format, IconFormat::Svg);
    }
}
