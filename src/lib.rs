//! letter-icon: letter avatar icons rendered on demand
//!
//! This crate renders small square icons (a colored disc with a few letters
//! centered on it) and serves them over HTTP from a single configured route.
//!
//! # Example
//!
//! ```
//! use letter_icon::{FontCatalog, IconFormat, IconOptionsBuilder, RenderRequest, RendererFactory};
//!
//! let fonts = FontCatalog::empty();
//! let options = IconOptionsBuilder::new(fonts.clone())
//!     .use_default_size(128)
//!     .use_default_background("teal")
//!     .use_default_format(IconFormat::Svg)
//!     .build()
//!     .unwrap();
//!
//! let renderer = RendererFactory::new(fonts)
//!     .create(RenderRequest::from_options(&options, Some("DI".into())));
//! let svg = renderer.render().unwrap();
//! assert!(svg.starts_with(b"<svg"));
//! ```
//!
//! # Serving
//!
//! [`IconMiddleware`] answers `GET`/`HEAD` on the configured route with the
//! encoded icon for the `t` query parameter and forwards every other request
//! to the next handler:
//!
//! ```
//! use letter_icon::{FontCatalog, IconMiddleware};
//!
//! # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
//! let middleware = IconMiddleware::configure(FontCatalog::empty(), |options| options).unwrap();
//!
//! let request = http::Request::get("/images/dynamicicon?t=DI").body(()).unwrap();
//! let response = middleware
//!     .handle(request, |_| async { http::Response::new(Vec::new()) })
//!     .await;
//! assert_eq!(response.headers()["content-type"], "image/png");
//! # });
//! ```
//!
//! # Configuration Profiles
//!
//! Options can also be loaded from JSON with [`OptionsProfile`]; see the
//! `profile` module for the format.

mod builder;
mod color;
mod error;
mod font;
mod middleware;
mod options;
mod profile;
mod renderer;

pub use builder::IconOptionsBuilder;
pub use color::{parse_color, ColorResolver, Fill};
pub use error::{OptionsError, ProfileError, RenderError};
pub use font::FontCatalog;
pub use middleware::{IconMiddleware, RouteDecision, TEXT_PARAMETER};
pub use options::{defaults, IconFormat, IconOptions, MAXIMUM_SIZE, MINIMUM_SIZE};
pub use profile::OptionsProfile;
pub use renderer::{
    IconRenderer, RasterIconRenderer, RenderRequest, RendererFactory, VectorIconRenderer,
};
