//! Fluent, order-independent assembly of [`IconOptions`].
//!
//! Each `use_*` call validates its own argument straight away. The first
//! rejected argument is remembered and returned by [`IconOptionsBuilder::build`],
//! which also fills in defaults and checks the constraints between fields.
//!
//! # Example
//!
//! ```
//! use letter_icon::{FontCatalog, IconFormat, IconOptionsBuilder};
//!
//! let options = IconOptionsBuilder::new(FontCatalog::empty())
//!     .use_route("/avatar")
//!     .use_default_format(IconFormat::Svg)
//!     .use_minimum_size(64)
//!     .use_default_size(128)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(options.route(), "/avatar");
//! assert_eq!(options.default_size(), 128);
//! ```

use std::time::Duration;

use crate::error::OptionsError;
use crate::font::FontCatalog;
use crate::options::{defaults, IconFormat, IconOptions, MAXIMUM_SIZE, MINIMUM_SIZE};

/// Builder for [`IconOptions`]. Unset fields take the values in
/// [`defaults`](crate::options::defaults).
#[derive(Debug, Clone)]
pub struct IconOptionsBuilder {
    fonts: FontCatalog,
    route: Option<String>,
    default_background: Option<String>,
    default_foreground: Option<String>,
    font_name: Option<String>,
    minimum_size: Option<u32>,
    maximum_size: Option<u32>,
    default_size: Option<u32>,
    format: Option<IconFormat>,
    cache_duration: Option<Option<Duration>>,
    error: Option<OptionsError>,
}

impl IconOptionsBuilder {
    /// Creates a builder that validates font names against `fonts`.
    pub fn new(fonts: FontCatalog) -> Self {
        Self {
            fonts,
            route: None,
            default_background: None,
            default_foreground: None,
            font_name: None,
            minimum_size: None,
            maximum_size: None,
            default_size: None,
            format: None,
            cache_duration: None,
            error: None,
        }
    }

    pub fn use_route<'a>(mut self, route: impl Into<Option<&'a str>>) -> Self {
        if let Some(route) = self.accept(required_text("route", route.into())) {
            self.route = Some(route);
        }
        self
    }

    pub fn use_default_background<'a>(mut self, background: impl Into<Option<&'a str>>) -> Self {
        if let Some(background) = self.accept(required_text("background", background.into())) {
            self.default_background = Some(background);
        }
        self
    }

    pub fn use_default_foreground<'a>(mut self, foreground: impl Into<Option<&'a str>>) -> Self {
        if let Some(foreground) = self.accept(required_text("foreground", foreground.into())) {
            self.default_foreground = Some(foreground);
        }
        self
    }

    /// Sets the font family. The family must resolve to an installed face in
    /// the builder's [`FontCatalog`]; the installed spelling is kept.
    pub fn use_font_name<'a>(mut self, font: impl Into<Option<&'a str>>) -> Self {
        let result = required_text("font", font.into()).and_then(|font| {
            self.fonts
                .resolve_family(&font)
                .ok_or_else(|| OptionsError::InvalidArgument {
                    field: "font",
                    reason: format!("no installed font family is named `{font}`"),
                })
        });
        if let Some(font) = self.accept(result) {
            self.font_name = Some(font);
        }
        self
    }

    pub fn use_minimum_size(mut self, size: u32) -> Self {
        if let Some(size) = self.accept(bounded_size("minimum_size", size)) {
            self.minimum_size = Some(size);
        }
        self
    }

    pub fn use_maximum_size(mut self, size: u32) -> Self {
        if let Some(size) = self.accept(bounded_size("maximum_size", size)) {
            self.maximum_size = Some(size);
        }
        self
    }

    pub fn use_default_size(mut self, size: u32) -> Self {
        if let Some(size) = self.accept(bounded_size("default_size", size)) {
            self.default_size = Some(size);
        }
        self
    }

    /// Sets the output format from an [`IconFormat`], its ordinal (`1..=4`)
    /// or its name.
    pub fn use_default_format<F>(mut self, format: F) -> Self
    where
        F: TryInto<IconFormat>,
        F::Error: Into<OptionsError>,
    {
        if let Some(format) = self.accept(format.try_into().map_err(Into::into)) {
            self.format = Some(format);
        }
        self
    }

    /// Sets how long responses may be cached. `None` disables cache headers.
    pub fn use_cache_time(mut self, cache_time: Option<Duration>) -> Self {
        self.cache_duration = Some(cache_time);
        self
    }

    /// Signed variant of [`use_cache_time`](Self::use_cache_time) for values
    /// read from configuration; negative values are rejected.
    pub fn use_cache_seconds(mut self, seconds: Option<i64>) -> Self {
        let result = match seconds {
            None => Ok(None),
            Some(s) => u64::try_from(s)
                .map(|s| Some(Duration::from_secs(s)))
                .map_err(|_| OptionsError::out_of_range("cache_time", format!("{s} seconds is negative"))),
        };
        if let Some(cache) = self.accept(result) {
            self.cache_duration = Some(cache);
        }
        self
    }

    /// The first argument rejected so far, if any.
    pub fn error(&self) -> Option<&OptionsError> {
        self.error.as_ref()
    }

    /// Produces the options, or the first error encountered.
    pub fn build(self) -> Result<IconOptions, OptionsError> {
        if let Some(err) = self.error {
            return Err(err);
        }

        let options = IconOptions {
            route: self.route.unwrap_or_else(|| defaults::ROUTE.to_string()),
            minimum_size: self.minimum_size.unwrap_or(MINIMUM_SIZE),
            maximum_size: self.maximum_size.unwrap_or(MAXIMUM_SIZE),
            default_size: self.default_size.unwrap_or(defaults::SIZE),
            default_background: self
                .default_background
                .unwrap_or_else(|| defaults::BACKGROUND.to_string()),
            default_foreground: self
                .default_foreground
                .unwrap_or_else(|| defaults::FOREGROUND.to_string()),
            format: self.format.unwrap_or(defaults::FORMAT),
            font_name: self.font_name.unwrap_or_else(|| defaults::FONT.to_string()),
            cache_duration: self.cache_duration.unwrap_or(Some(defaults::CACHE)),
        };

        if options.minimum_size > options.maximum_size {
            return Err(OptionsError::InvalidConfiguration(format!(
                "minimum size {} is greater than maximum size {}",
                options.minimum_size, options.maximum_size
            )));
        }
        if options.default_size < options.minimum_size {
            return Err(OptionsError::InvalidConfiguration(format!(
                "default size {} is less than minimum size {}",
                options.default_size, options.minimum_size
            )));
        }
        if options.default_size > options.maximum_size {
            return Err(OptionsError::InvalidConfiguration(format!(
                "default size {} is greater than maximum size {}",
                options.default_size, options.maximum_size
            )));
        }

        if !self.fonts.has_family(&options.font_name) {
            tracing::warn!(
                font = %options.font_name,
                "font family has no installed face, icon text will not be drawn"
            );
        }

        tracing::info!(
            route = %options.route,
            format = %options.format,
            size = options.default_size,
            font = %options.font_name,
            "icon options built"
        );
        Ok(options)
    }

    /// Keeps the first error; later errors are dropped.
    fn accept<T>(&mut self, result: Result<T, OptionsError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(error = %err, "rejected icon option");
                self.error.get_or_insert(err);
                None
            }
        }
    }
}

fn required_text(field: &'static str, value: Option<&str>) -> Result<String, OptionsError> {
    match value {
        None => Err(OptionsError::NullArgument { field }),
        Some(v) if v.trim().is_empty() => Err(OptionsError::out_of_range(field, "value is blank")),
        Some(v) => Ok(v.to_string()),
    }
}

fn bounded_size(field: &'static str, size: u32) -> Result<u32, OptionsError> {
    if (MINIMUM_SIZE..=MAXIMUM_SIZE).contains(&size) {
        Ok(size)
    } else {
        Err(OptionsError::out_of_range(
            field,
            format!("{size} is outside {MINIMUM_SIZE}..={MAXIMUM_SIZE}"),
        ))
    }
}
