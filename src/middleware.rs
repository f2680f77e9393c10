//! Request routing: serve icons on one path, pass everything else on.
//!
//! [`IconMiddleware`] sits in front of another handler. For each request it
//! makes a [`RouteDecision`]:
//!
//! ```text
//! path != route ──────────────► PassThrough       next(request), untouched
//! path == route, not GET/HEAD ► MethodNotAllowed  405 "Method Not Allowed"
//! path == route, GET/HEAD ────► Render { text }   200 + encoded icon
//! ```
//!
//! Rendering is CPU-bound, so it runs on tokio's blocking pool; the
//! middleware itself keeps no per-request state and can be cloned into every
//! connection task.

use std::future::Future;
use std::sync::Arc;
use std::time::{Instant, SystemTime};

use http::header::{ALLOW, CACHE_CONTROL, CONTENT_LENGTH, CONTENT_TYPE, EXPIRES};
use http::{HeaderValue, Method, Request, Response, StatusCode};
use tracing::{debug, error, warn};

use crate::builder::IconOptionsBuilder;
use crate::error::{OptionsError, RenderError};
use crate::font::FontCatalog;
use crate::options::{IconFormat, IconOptions};
use crate::renderer::{RenderRequest, RendererFactory};

/// Name of the query parameter carrying the icon text.
pub const TEXT_PARAMETER: &str = "t";

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

/// What the middleware does with one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Not the icon route; hand the request to the next handler.
    PassThrough,
    /// The icon route, but with a method other than GET or HEAD.
    MethodNotAllowed,
    /// Render an icon with the given text.
    Render { text: Option<String> },
}

/// Serves letter icons on a single configured route.
#[derive(Debug, Clone)]
pub struct IconMiddleware {
    options: Arc<IconOptions>,
    factory: RendererFactory,
}

impl IconMiddleware {
    /// Creates the middleware from validated options.
    pub fn new(options: IconOptions, fonts: FontCatalog) -> Self {
        Self {
            options: Arc::new(options),
            factory: RendererFactory::new(fonts),
        }
    }

    /// Builds the options with `configure` and creates the middleware.
    ///
    /// ```
    /// use letter_icon::{FontCatalog, IconFormat, IconMiddleware};
    ///
    /// let middleware = IconMiddleware::configure(FontCatalog::empty(), |options| {
    ///     options.use_route("/avatar").use_default_format(IconFormat::Svg)
    /// })
    /// .unwrap();
    /// assert_eq!(middleware.options().route(), "/avatar");
    /// ```
    pub fn configure<F>(fonts: FontCatalog, configure: F) -> Result<Self, OptionsError>
    where
        F: FnOnce(IconOptionsBuilder) -> IconOptionsBuilder,
    {
        let options = configure(IconOptionsBuilder::new(fonts.clone())).build()?;
        Ok(Self::new(options, fonts))
    }

    pub fn options(&self) -> &IconOptions {
        &self.options
    }

    /// Decides how `request` is handled. Path matching is exact.
    pub fn route<B>(&self, request: &Request<B>) -> RouteDecision {
        if request.uri().path() != self.options.route() {
            return RouteDecision::PassThrough;
        }
        if request.method() != Method::GET && request.method() != Method::HEAD {
            return RouteDecision::MethodNotAllowed;
        }
        RouteDecision::Render {
            text: query_text(request.uri().query()),
        }
    }

    /// Answers icon requests and forwards every other request to `next`.
    ///
    /// Must be called from within a tokio runtime.
    pub async fn handle<B, N, Fut>(&self, request: Request<B>, next: N) -> Response<Vec<u8>>
    where
        N: FnOnce(Request<B>) -> Fut,
        Fut: Future<Output = Response<Vec<u8>>>,
    {
        match self.route(&request) {
            RouteDecision::PassThrough => {
                debug!(path = request.uri().path(), "not an icon request, passing through");
                next(request).await
            }
            RouteDecision::MethodNotAllowed => {
                warn!(method = %request.method(), path = request.uri().path(), "method not allowed on icon route");
                let mut response = plain_text(StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed");
                response
                    .headers_mut()
                    .insert(ALLOW, HeaderValue::from_static("GET, HEAD"));
                response
            }
            RouteDecision::Render { text } => self.render_icon(text).await,
        }
    }

    /// Renders an icon with the configured defaults and `text`.
    pub async fn render_icon(&self, text: Option<String>) -> Response<Vec<u8>> {
        let renderer = self
            .factory
            .create(RenderRequest::from_options(&self.options, text));
        let format = renderer.format();
        let started = Instant::now();

        let rendered = tokio::task::spawn_blocking(move || renderer.render())
            .await
            .map_err(|err| RenderError::Join(err.to_string()))
            .and_then(|result| result);

        match rendered {
            Ok(bytes) => {
                debug!(
                    %format,
                    bytes = bytes.len(),
                    elapsed_us = started.elapsed().as_micros() as u64,
                    "rendered icon"
                );
                self.icon_response(format, bytes)
            }
            Err(err) => {
                error!(error = %err, %format, "icon rendering failed");
                plain_text(StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
        }
    }

    fn icon_response(&self, format: IconFormat, bytes: Vec<u8>) -> Response<Vec<u8>> {
        let length = bytes.len();
        let mut response = Response::new(bytes);
        let headers = response.headers_mut();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static(format.content_type()));
        headers.insert(CONTENT_LENGTH, HeaderValue::from(length));

        if let Some(duration) = self.options.cache_duration().filter(|d| !d.is_zero()) {
            if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", duration.as_secs())) {
                headers.insert(CACHE_CONTROL, value);
            }
            let expires = SystemTime::now()
                .checked_add(duration)
                .map(httpdate::fmt_http_date)
                .and_then(|date| HeaderValue::from_str(&date).ok());
            if let Some(value) = expires {
                headers.insert(EXPIRES, value);
            }
        }
        response
    }
}

/// First value of the text parameter, percent-decoded.
fn query_text(query: Option<&str>) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .find(|(name, _)| name == TEXT_PARAMETER)
        .map(|(_, value)| value.into_owned())
}

fn plain_text(status: StatusCode, body: &'static str) -> Response<Vec<u8>> {
    let mut response = Response::new(body.as_bytes().to_vec());
    *response.status_mut() = status;
    let headers = response.headers_mut();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static(TEXT_PLAIN));
    headers.insert(CONTENT_LENGTH, HeaderValue::from(body.len()));
    response
}
