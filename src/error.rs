//! Error types for configuration and rendering.
//!
//! Configuration problems are reported once, while the engine is being
//! assembled ([`OptionsError`]). Rendering problems only ever affect the
//! request that triggered them ([`RenderError`]).

use resvg::usvg;
use thiserror::Error;

/// A configuration value was rejected while assembling [`IconOptions`].
///
/// [`IconOptions`]: crate::IconOptions
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// A required value was not supplied.
    #[error("`{field}` must be provided")]
    NullArgument { field: &'static str },

    /// A value is outside its allowed bounds, or a string is blank.
    #[error("`{field}` is out of range: {reason}")]
    OutOfRange { field: &'static str, reason: String },

    /// A value is well-formed but names something that does not exist.
    #[error("`{field}` is invalid: {reason}")]
    InvalidArgument { field: &'static str, reason: String },

    /// Individually valid fields contradict each other.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
}

impl OptionsError {
    pub(crate) fn out_of_range(field: &'static str, reason: impl Into<String>) -> Self {
        Self::OutOfRange {
            field,
            reason: reason.into(),
        }
    }

    /// Returns the name of the offending field, if the error concerns one.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::NullArgument { field }
            | Self::OutOfRange { field, .. }
            | Self::InvalidArgument { field, .. } => Some(field),
            Self::InvalidConfiguration(_) => None,
        }
    }
}

/// Rendering a single icon failed.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A color or font setting could not be used for drawing.
    #[error("`{field}` cannot be rendered: {reason}")]
    InvalidConfiguration { field: &'static str, reason: String },

    /// The drawing surface could not be allocated.
    #[error("cannot allocate a {size}x{size} canvas")]
    Canvas { size: u32 },

    /// The generated SVG markup was rejected by the parser.
    #[error("svg: {0}")]
    Svg(#[from] usvg::Error),

    /// The raster image could not be encoded in the requested format.
    #[error("encode: {0}")]
    Encode(#[from] image::ImageError),

    /// The blocking render task panicked or was cancelled.
    #[error("render task failed: {0}")]
    Join(String),
}

/// A configuration profile could not be loaded.
#[derive(Debug, Error)]
pub enum ProfileError {
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Options(#[from] OptionsError),
}
