//! Serving adapter: Scalar documentation UI and spec endpoints for axum.
//!
//! Everything here is explicit composition - the setup functions take an
//! [`axum::Router`], add routes, and hand it back. Nothing is patched onto
//! the framework and no global state is involved; callers decide where and
//! whether to mount the documentation.

use crate::markdown::markdown_endpoint;
use crate::openapi::{OpenApiDocument, Server};
use axum::http::request::Parts;
use axum::response::Html;
use axum::routing::get;
use axum::{Json, Router};
use log::debug;
use serde_json::{Map, Value};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// Default mount point for the documentation UI.
pub const DEFAULT_DOCS_PATH: &str = "/docs";
/// Default mount point for the JSON spec endpoint.
pub const DEFAULT_SPEC_PATH: &str = "/openapi.json";
/// Default mount point for the Markdown export.
pub const DEFAULT_MARKDOWN_PATH: &str = "/llms.txt";

const DEFAULT_CDN: &str = "https://cdn.jsdelivr.net/npm/@scalar/api-reference";

/// CSS variables for the bundled default theme, applied when
/// [`Theme::Ocean`] is selected.
const OCEAN_THEME_CSS: &str = "
  .scalar-app {
    --scalar-color-1: #0b4f6c;
    --scalar-color-2: #01395c;
    --scalar-color-3: #145c8e;
    --scalar-color-accent: #f18f01;
    --scalar-background-1: #ffffff;
    --scalar-background-2: #f7fafc;
    --scalar-background-3: #e3ecf2;
    --scalar-border-color: #dbe6ee;
  }

  .dark .scalar-app {
    --scalar-background-1: #0d1b26;
    --scalar-background-2: #16293a;
    --scalar-background-3: #20394f;
    --scalar-border-color: #335166;
  }
";

/// Scalar UI theme selection.
///
/// [`Theme::Ocean`] is the crate's bundled theme; it renders as the Scalar
/// theme `none` with [`OCEAN_THEME_CSS`] injected, so user CSS layers on
/// top. The remaining variants map to Scalar's built-in theme names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Ocean,
    Default,
    Alternate,
    Moon,
    Purple,
    Solarized,
    Elysia,
    None,
}

impl Theme {
    fn scalar_name(self) -> &'static str {
        match self {
            Theme::Ocean | Theme::None => "none",
            Theme::Default => "default",
            Theme::Alternate => "alternate",
            Theme::Moon => "moon",
            Theme::Purple => "purple",
            Theme::Solarized => "solarized",
            Theme::Elysia => "elysia",
        }
    }
}

/// A resolved spec: either a URL the UI should fetch, or inline document
/// content.
#[derive(Debug, Clone, PartialEq)]
pub enum SpecPayload {
    Url(String),
    Document(Value),
}

/// Future type produced by a dynamic spec resolver.
pub type SpecResolverFuture = Pin<Box<dyn Future<Output = SpecPayload> + Send>>;

/// Per-request spec resolver; receives the request head and produces the
/// payload to render, potentially after awaiting I/O.
pub type SpecResolver = Arc<dyn Fn(Parts) -> SpecResolverFuture + Send + Sync>;

/// Where the OpenAPI spec comes from.
#[derive(Clone)]
pub enum SpecSource {
    /// A literal spec URL (absolute, or relative to the serving app).
    Url(String),
    /// A spec document passed directly.
    Document(Value),
    /// A resolver invoked once per request, immediately before rendering.
    /// The render is deferred until resolution completes; cancellation
    /// follows the request lifecycle.
    Resolver(SpecResolver),
}

impl SpecSource {
    /// Wrap an async closure as a per-request resolver.
    pub fn resolver<F, Fut>(resolve: F) -> Self
    where
        F: Fn(Parts) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = SpecPayload> + Send + 'static,
    {
        Self::Resolver(Arc::new(move |parts| Box::pin(resolve(parts))))
    }

    /// Resolve this source to a concrete payload for one request.
    pub(crate) async fn resolve(&self, parts: Parts) -> SpecPayload {
        match self {
            SpecSource::Url(url) => SpecPayload::Url(url.clone()),
            SpecSource::Document(doc) => SpecPayload::Document(doc.clone()),
            SpecSource::Resolver(resolve) => resolve(parts).await,
        }
    }
}

impl fmt::Debug for SpecSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpecSource::Url(url) => f.debug_tuple("Url").field(url).finish(),
            SpecSource::Document(_) => f.debug_tuple("Document").finish(),
            SpecSource::Resolver(_) => f.debug_tuple("Resolver").finish(),
        }
    }
}

impl From<&str> for SpecSource {
    fn from(url: &str) -> Self {
        SpecSource::Url(url.to_string())
    }
}

impl From<String> for SpecSource {
    fn from(url: String) -> Self {
        SpecSource::Url(url)
    }
}

impl From<Value> for SpecSource {
    fn from(doc: Value) -> Self {
        SpecSource::Document(doc)
    }
}

impl From<&OpenApiDocument> for SpecSource {
    fn from(doc: &OpenApiDocument) -> Self {
        // Serializing the typed document model cannot fail.
        let value = serde_json::to_value(doc).expect("OpenAPI document serializes to JSON");
        SpecSource::Document(value)
    }
}

/// Configuration for the documentation UI and its companion endpoints.
#[derive(Debug, Clone)]
pub struct ScalarConfig {
    /// Whether to mount anything at all.
    pub enabled: bool,
    /// Documentation UI path.
    pub path: String,
    /// Spec source fed to the UI (and to the Markdown export).
    pub spec: Option<SpecSource>,
    /// Page title.
    pub title: String,
    pub theme: Theme,
    /// Override for the Scalar CDN bundle URL.
    pub cdn: Option<String>,
    /// Proxy URL for working around CORS during development.
    pub proxy_url: Option<String>,
    pub servers: Option<Vec<Server>>,
    pub custom_css: Option<String>,
    /// Whether to also mount the Markdown export endpoint.
    pub enable_markdown: bool,
    /// Markdown export path.
    pub markdown_path: String,
}

impl Default for ScalarConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            path: DEFAULT_DOCS_PATH.to_string(),
            spec: None,
            title: "API Documentation".to_string(),
            theme: Theme::default(),
            cdn: None,
            proxy_url: None,
            servers: None,
            custom_css: None,
            enable_markdown: false,
            markdown_path: DEFAULT_MARKDOWN_PATH.to_string(),
        }
    }
}

impl ScalarConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spec(mut self, spec: impl Into<SpecSource>) -> Self {
        self.spec = Some(spec.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn cdn(mut self, cdn: impl Into<String>) -> Self {
        self.cdn = Some(cdn.into());
        self
    }

    pub fn proxy_url(mut self, proxy_url: impl Into<String>) -> Self {
        self.proxy_url = Some(proxy_url.into());
        self
    }

    pub fn servers(mut self, servers: Vec<Server>) -> Self {
        self.servers = Some(servers);
        self
    }

    pub fn custom_css(mut self, custom_css: impl Into<String>) -> Self {
        self.custom_css = Some(custom_css.into());
        self
    }

    pub fn markdown(mut self, enable: bool) -> Self {
        self.enable_markdown = enable;
        self
    }

    pub fn markdown_path(mut self, markdown_path: impl Into<String>) -> Self {
        self.markdown_path = markdown_path.into();
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

/// Register a GET route serving the generated document as JSON.
pub fn serve_document(router: Router, path: &str, document: OpenApiDocument) -> Router {
    debug!("Serving OpenAPI document at {path}");
    let document = Arc::new(document);
    router.route(
        path,
        get(move || {
            let document = document.clone();
            async move { Json(document.as_ref().clone()) }
        }),
    )
}

/// Mount the Scalar documentation UI (and, when enabled, the Markdown
/// export) onto a router.
///
/// Returns the router untouched when `config.enabled` is false, or when
/// Markdown export is requested without a spec source to export.
pub fn setup_scalar(router: Router, config: ScalarConfig) -> Router {
    if !config.enabled {
        debug!("Scalar documentation disabled, skipping setup");
        return router;
    }

    let render = Arc::new(RenderOptions {
        title: config.title,
        theme: config.theme,
        cdn: config.cdn,
        proxy_url: config.proxy_url,
        servers: config.servers,
        custom_css: config.custom_css,
    });
    debug!("Mounting Scalar UI at {}", config.path);

    let ui_spec = config.spec.clone();
    let mut router = router.route(
        &config.path,
        get(move |parts: Parts| {
            let render = render.clone();
            let spec = ui_spec.clone();
            async move {
                let payload = match &spec {
                    Some(source) => Some(source.resolve(parts).await),
                    None => None,
                };
                Html(render_scalar_html(&render, payload.as_ref()))
            }
        }),
    );

    if config.enable_markdown {
        if let Some(source) = config.spec {
            debug!("Mounting Markdown export at {}", config.markdown_path);
            router = router.route(
                &config.markdown_path,
                get(move |parts: Parts| {
                    let source = source.clone();
                    async move { markdown_endpoint(source, parts).await }
                }),
            );
        }
    }

    router
}

struct RenderOptions {
    title: String,
    theme: Theme,
    cdn: Option<String>,
    proxy_url: Option<String>,
    servers: Option<Vec<Server>>,
    custom_css: Option<String>,
}

/// Render the Scalar HTML shell for one resolved payload.
fn render_scalar_html(options: &RenderOptions, payload: Option<&SpecPayload>) -> String {
    let mut configuration = Map::new();
    configuration.insert(
        "theme".to_string(),
        Value::String(options.theme.scalar_name().to_string()),
    );

    let custom_css = match (options.theme, &options.custom_css) {
        (Theme::Ocean, Some(css)) => Some(format!("{OCEAN_THEME_CSS}\n{css}")),
        (Theme::Ocean, None) => Some(OCEAN_THEME_CSS.to_string()),
        (_, css) => css.clone(),
    };
    if let Some(css) = custom_css {
        configuration.insert("customCss".to_string(), Value::String(css));
    }
    if let Some(proxy_url) = &options.proxy_url {
        configuration.insert("proxyUrl".to_string(), Value::String(proxy_url.clone()));
    }
    if let Some(servers) = &options.servers {
        configuration.insert(
            "servers".to_string(),
            serde_json::to_value(servers).unwrap_or_default(),
        );
    }

    let mut inline_spec = String::new();
    match payload {
        Some(SpecPayload::Url(url)) => {
            configuration.insert("url".to_string(), Value::String(url.clone()));
        }
        Some(SpecPayload::Document(doc)) => {
            inline_spec = script_safe(&doc.to_string());
        }
        None => {}
    }

    let configuration = attribute_escape(&Value::Object(configuration).to_string());
    let title = text_escape(&options.title);
    let cdn = options.cdn.as_deref().unwrap_or(DEFAULT_CDN);

    format!(
        "<!doctype html>\n\
         <html>\n\
         <head>\n\
         <title>{title}</title>\n\
         <meta charset=\"utf-8\" />\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\" />\n\
         </head>\n\
         <body>\n\
         <script id=\"api-reference\" type=\"application/json\" \
         data-configuration=\"{configuration}\">{inline_spec}</script>\n\
         <script src=\"{cdn}\"></script>\n\
         </body>\n\
         </html>\n"
    )
}

fn text_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn attribute_escape(input: &str) -> String {
    text_escape(input).replace('"', "&quot;")
}

/// Keep inline JSON from terminating the surrounding script element.
fn script_safe(input: &str) -> String {
    input.replace("</", "<\\/")
}
