//! Trimmer middleware.
//! Serves translation and template payloads, forwards everything else.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    body::Body,
    extract::{Query, State},
    http::{Request, Uri},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Router,
};

use crate::config::TrimmerConfig;
use crate::error::TrimmerResult;
use crate::http::request::request_id;
use crate::http::response::javascript;
use crate::i18n::{validate_locale, AllowedKeys, CatalogError, StaticCatalog};
use crate::i18n::{TranslationResolver, TranslationStore};
use crate::observability::metrics;
use crate::routing::{RouteMatch, RouteTable};
use crate::templates::{TemplateCompiler, TemplateEngine};

/// Shared, immutable middleware state.
#[derive(Clone, Debug)]
pub struct Trimmer {
    inner: Arc<TrimmerState>,
}

#[derive(Debug)]
struct TrimmerState {
    routes: RouteTable,
    allowed_keys: AllowedKeys,
    resolver: TranslationResolver,
    compiler: TemplateCompiler,
}

/// Query parameter carrying the client's key filter.
const ALLOWED_KEYS_PARAM: &str = "allowed_keys";

impl Trimmer {
    /// Build the middleware around an existing translation store.
    pub fn new(config: &TrimmerConfig, store: Arc<dyn TranslationStore>) -> Self {
        let engine = TemplateEngine::new(Arc::clone(&store), config.renderer_scope.clone());

        Self {
            inner: Arc::new(TrimmerState {
                routes: RouteTable::new(config.mount_path.clone()),
                allowed_keys: config.allowed_keys.clone(),
                resolver: TranslationResolver::new(store),
                compiler: TemplateCompiler::new(&config.templates_path, engine, config.mode),
            }),
        }
    }

    /// Build the middleware, loading the catalog from `locales_path`.
    pub fn from_config(config: &TrimmerConfig) -> Result<Self, CatalogError> {
        let catalog = match &config.locales_path {
            Some(dir) => StaticCatalog::load_dir(dir, config.default_locale.as_str())?,
            None => StaticCatalog::new(config.default_locale.as_str()),
        };

        tracing::info!(
            templates_path = %config.templates_path.display(),
            mode = ?config.mode,
            mount_path = %config.mount_path,
            "Trimmer initialized"
        );
        Ok(Self::new(config, Arc::new(catalog)))
    }

    /// Put the middleware in front of `downstream`.
    pub fn wrap(self, downstream: Router) -> Router {
        downstream.layer(middleware::from_fn_with_state(self, trimmer_middleware))
    }

    /// Classify a request path; `None` means passthrough.
    pub fn classify(&self, path: &str) -> Option<RouteMatch> {
        self.inner.routes.classify(path)
    }

    /// Produce the JavaScript body for a matched route.
    ///
    /// The locale is validated before any work is done.
    pub fn generate(&self, route: &RouteMatch, requested_keys: Option<&str>) -> TrimmerResult<String> {
        validate_locale(route.locale())?;

        match route {
            RouteMatch::Translations { locale, .. } => {
                self.translations_js(locale.as_deref(), requested_keys)
            }
            RouteMatch::Templates { locale, .. } => self.inner.compiler.to_js(Some(locale)),
            RouteMatch::Resources { locale, .. } => {
                let translations = self.translations_js(Some(locale), requested_keys)?;
                let templates = self.inner.compiler.to_js(Some(locale))?;
                Ok(format!("{translations}\n{templates}"))
            }
        }
    }

    /// `generate` on the blocking pool.
    pub async fn respond(&self, route: RouteMatch, requested_keys: Option<String>) -> TrimmerResult<String> {
        let trimmer = self.clone();
        tokio::task::spawn_blocking(move || trimmer.generate(&route, requested_keys.as_deref())).await?
    }

    fn translations_js(&self, locale: Option<&str>, requested_keys: Option<&str>) -> TrimmerResult<String> {
        self.inner
            .resolver
            .to_js(locale, &self.inner.allowed_keys, requested_keys)
    }
}

pub async fn trimmer_middleware(
    State(trimmer): State<Trimmer>,
    req: Request<Body>,
    next: Next,
) -> Response {
    // 1. Not a trimmer path: hand over untouched.
    let Some(route) = trimmer.classify(req.uri().path()) else {
        return next.run(req).await;
    };

    let start_time = Instant::now();
    let request_id = request_id(&req).unwrap_or("unknown").to_string();
    let kind = route.kind();

    tracing::debug!(
        request_id = %request_id,
        route = kind,
        locale = ?route.locale(),
        "Serving trimmer payload"
    );

    // 2. Generate the payload off the async workers.
    match trimmer.respond(route, requested_keys(req.uri())).await {
        Ok(body) => {
            metrics::record_request(kind, 200, start_time);
            javascript(body)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, route = kind, error = %e, "Trimmer payload failed");
            metrics::record_request(kind, 500, start_time);
            e.into_response()
        }
    }
}

/// `?allowed_keys=` from the query string.
///
/// A repeated parameter keeps its last value. A query that cannot be parsed
/// yields an empty filter, so nothing is exported.
fn requested_keys(uri: &Uri) -> Option<String> {
    match Query::<Vec<(String, String)>>::try_from_uri(uri) {
        Ok(Query(pairs)) => pairs
            .into_iter()
            .filter(|(name, _)| name == ALLOWED_KEYS_PARAM)
            .map(|(_, value)| value)
            .last(),
        Err(e) => {
            tracing::warn!(error = %e, "Malformed query string, exporting no keys");
            Some(String::new())
        }
    }
}
