//! Serializable options profile for configuration files.
//!
//! An [`OptionsProfile`] mirrors the builder settings in a JSON-friendly
//! shape. Every field is optional; missing fields keep the defaults. Loading
//! goes through [`IconOptionsBuilder`], so a profile is validated exactly like
//! code-built options.
//!
//! # Example
//!
//! ```
//! use letter_icon::{FontCatalog, IconFormat, OptionsProfile};
//!
//! let json = r#"{ "route": "/avatar", "defaultSize": 128, "format": "svg" }"#;
//! let options = OptionsProfile::from_json(json)
//!     .unwrap()
//!     .build(&FontCatalog::empty())
//!     .unwrap();
//!
//! assert_eq!(options.route(), "/avatar");
//! assert_eq!(options.default_size(), 128);
//! assert_eq!(options.format(), IconFormat::Svg);
//! ```

use serde::{Deserialize, Serialize};

use crate::builder::IconOptionsBuilder;
use crate::error::ProfileError;
use crate::font::FontCatalog;
use crate::options::{IconFormat, IconOptions};

/// All option settings, each `None` when not configured.
///
/// # JSON Format
///
/// ```json
/// {
///   "route": "/images/dynamicicon",
///   "minimumSize": 32,
///   "maximumSize": 4096,
///   "defaultSize": 64,
///   "defaultBackground": "#00137F",
///   "defaultForeground": "#FFFFFF",
///   "format": "png",
///   "fontName": "sans-serif",
///   "cacheSeconds": 31556926
/// }
/// ```
///
/// `cacheSeconds: 0` turns cache headers off.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "jsonschema", derive(schemars::JsonSchema))]
#[serde(rename_all = "camelCase")]
pub struct OptionsProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub minimum_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub maximum_size: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_size: Option<u32>,

    /// Hex or named color.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_background: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_foreground: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<IconFormat>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_name: Option<String>,

    /// Signed so that negative values reach validation instead of failing
    /// as a type error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_seconds: Option<i64>,
}

impl OptionsProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_route(mut self, route: impl Into<String>) -> Self {
        self.route = Some(route.into());
        self
    }

    pub fn with_sizes(mut self, minimum: u32, maximum: u32, default: u32) -> Self {
        self.minimum_size = Some(minimum);
        self.maximum_size = Some(maximum);
        self.default_size = Some(default);
        self
    }

    pub fn with_default_size(mut self, size: u32) -> Self {
        self.default_size = Some(size);
        self
    }

    pub fn with_colors(mut self, background: impl Into<String>, foreground: impl Into<String>) -> Self {
        self.default_background = Some(background.into());
        self.default_foreground = Some(foreground.into());
        self
    }

    pub fn with_format(mut self, format: IconFormat) -> Self {
        self.format = Some(format);
        self
    }

    pub fn with_font_name(mut self, font: impl Into<String>) -> Self {
        self.font_name = Some(font.into());
        self
    }

    pub fn with_cache_seconds(mut self, seconds: i64) -> Self {
        self.cache_seconds = Some(seconds);
        self
    }

    /// Serializes the profile to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serializes the profile to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserializes a profile from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Applies the configured fields to `builder`, leaving others untouched.
    pub fn apply(&self, mut builder: IconOptionsBuilder) -> IconOptionsBuilder {
        if let Some(route) = &self.route {
            builder = builder.use_route(route.as_str());
        }
        if let Some(size) = self.minimum_size {
            builder = builder.use_minimum_size(size);
        }
        if let Some(size) = self.maximum_size {
            builder = builder.use_maximum_size(size);
        }
        if let Some(size) = self.default_size {
            builder = builder.use_default_size(size);
        }
        if let Some(color) = &self.default_background {
            builder = builder.use_default_background(color.as_str());
        }
        if let Some(color) = &self.default_foreground {
            builder = builder.use_default_foreground(color.as_str());
        }
        if let Some(format) = self.format {
            builder = builder.use_default_format(format);
        }
        if let Some(font) = &self.font_name {
            builder = builder.use_font_name(font.as_str());
        }
        if let Some(seconds) = self.cache_seconds {
            builder = builder.use_cache_seconds(Some(seconds));
        }
        builder
    }

    /// Validates the profile and produces options.
    pub fn build(&self, fonts: &FontCatalog) -> Result<IconOptions, ProfileError> {
        Ok(self.apply(IconOptionsBuilder::new(fonts.clone())).build()?)
    }
}

impl From<&IconOptions> for OptionsProfile {
    fn from(options: &IconOptions) -> Self {
        let cache_seconds = options
            .cache_duration()
            .map_or(0, |d| i64::try_from(d.as_secs()).unwrap_or(i64::MAX));
        Self {
            route: Some(options.route().to_string()),
            minimum_size: Some(options.minimum_size()),
            maximum_size: Some(options.maximum_size()),
            default_size: Some(options.default_size()),
            default_background: Some(options.default_background().to_string()),
            default_foreground: Some(options.default_foreground().to_string()),
            format: Some(options.format()),
            font_name: Some(options.font_name().to_string()),
            cache_seconds: Some(cache_seconds),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OptionsError;
    use crate::font::installed_fonts;
    use std::time::Duration;

    fn fonts() -> FontCatalog {
        FontCatalog::empty()
    }

    #[test]
    fn empty_profile_builds_defaults() {
        let options = OptionsProfile::from_json("{}").unwrap().build(&fonts()).unwrap();
        assert_eq!(options, IconOptions::default());
    }

    #[test]
    fn profile_json_format() {
        let profile = OptionsProfile::new()
            .with_default_size(128)
            .with_format(IconFormat::Gif)
            .with_cache_seconds(60);

        let json = profile.to_json_pretty().unwrap();

        assert!(json.contains("\"defaultSize\": 128"));
        assert!(json.contains("\"format\": \"gif\""));
        assert!(json.contains("\"cacheSeconds\": 60"));
        assert!(!json.contains("\"route\""), "unset fields are skipped");
    }

    #[test]
    fn profile_fields_reach_options() {
        let options = OptionsProfile::new()
            .with_route("/avatar")
            .with_sizes(16 * 4, 1024, 256)
            .with_colors("navy", "C0FFEE")
            .with_format(IconFormat::Ico)
            .with_cache_seconds(3600)
            .build(&fonts())
            .unwrap();

        assert_eq!(options.route(), "/avatar");
        assert_eq!(options.minimum_size(), 64);
        assert_eq!(options.maximum_size(), 1024);
        assert_eq!(options.default_size(), 256);
        assert_eq!(options.default_background(), "navy");
        assert_eq!(options.default_foreground(), "C0FFEE");
        assert_eq!(options.format(), IconFormat::Ico);
        assert_eq!(options.cache_duration(), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn export_matches_options() {
        let options = IconOptions::default();
        let profile = OptionsProfile::from(&options);

        assert_eq!(profile.cache_seconds, Some(31_556_926));
        assert_eq!(profile.format, Some(IconFormat::Png));
        assert_eq!(profile.font_name.as_deref(), Some("sans-serif"));

        // The exported font is validated again on load.
        let Some(fonts) = installed_fonts() else { return };
        let restored = OptionsProfile::from_json(&profile.to_json().unwrap())
            .unwrap()
            .build(&fonts)
            .unwrap();
        assert_eq!(restored, options);
    }

    #[test]
    fn negative_cache_seconds_is_out_of_range() {
        let err = OptionsProfile::new()
            .with_cache_seconds(-1)
            .build(&fonts())
            .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Options(OptionsError::OutOfRange { field: "cache_time", .. })
        ));
    }

    #[test]
    fn inconsistent_sizes_are_rejected() {
        let err = OptionsProfile::new()
            .with_sizes(512, 128, 256)
            .build(&fonts())
            .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Options(OptionsError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn unknown_format_is_a_json_error() {
        let err = OptionsProfile::from_json(r#"{ "format": "bmp" }"#).unwrap_err();
        assert!(err.is_data());
    }

    #[test]
    fn font_name_reaches_options() {
        let Some(fonts) = installed_fonts() else { return };
        let options = OptionsProfile::from_json(r#"{ "fontName": "Monospace" }"#)
            .unwrap()
            .build(&fonts)
            .unwrap();
        assert_eq!(options.font_name(), "monospace");
    }

    #[test]
    fn unknown_font_is_rejected() {
        let err = OptionsProfile::new()
            .with_font_name("No Such Family")
            .build(&fonts())
            .unwrap_err();
        assert!(matches!(
            err,
            ProfileError::Options(OptionsError::InvalidArgument { field: "font", .. })
        ));
    }
}
