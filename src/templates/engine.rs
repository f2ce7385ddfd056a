//! Single-file template rendering.
//!
//! Files are rendered with minijinja. Every render sees the configured
//! rendering scope plus a `locale` variable, and can call `t(key, **vars)`
//! to pull a translation for that locale:
//!
//! ```text
//! <h1>{{ t("views.home.title", name=user) }}</h1>
//! ```
//!
//! Undefined variables are render errors. Client-side template sources
//! (`.mustache`, `.hbs`, `.handlebars`) are passed through unrendered.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use minijinja::value::Kwargs;
use minijinja::{AutoEscape, Environment, Error, ErrorKind, State, UndefinedBehavior};
use serde_json::{Map, Value};

use crate::error::{TrimmerError, TrimmerResult};
use crate::i18n::catalog::TranslationStore;
use crate::templates::cache::RenderCache;

/// Extensions of templates rendered on the client, served as written.
const VERBATIM_EXTENSIONS: &[&str] = &["mustache", "hbs", "handlebars"];

/// Output options for a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Keep block tags' surrounding whitespace. When false, newlines after
    /// blocks and indentation before them are stripped.
    pub pretty: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Renders template files against a fixed scope and translation store.
#[derive(Debug, Clone)]
pub struct TemplateEngine {
    store: Arc<dyn TranslationStore>,
    scope: Arc<Value>,
}

impl TemplateEngine {
    pub fn new(store: Arc<dyn TranslationStore>, scope: Value) -> Self {
        Self {
            store,
            scope: Arc::new(scope),
        }
    }

    /// A fresh environment with the `t` function registered.
    pub fn environment(&self, options: RenderOptions) -> Environment<'static> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        if !options.pretty {
            env.set_trim_blocks(true);
            env.set_lstrip_blocks(true);
        }

        let store = Arc::clone(&self.store);
        env.add_function("t", move |state: &State, key: String, vars: Kwargs| {
            translate(store.as_ref(), state, &key, &vars)
        });
        env
    }

    /// Render the file at `path` for `locale`.
    ///
    /// With a cache the compiled template is reused across calls; the cache's
    /// own options apply. Without one the source is compiled from scratch.
    pub fn render(
        &self,
        path: &Path,
        locale: Option<&str>,
        options: RenderOptions,
        cache: Option<&mut RenderCache>,
    ) -> TrimmerResult<String> {
        if is_verbatim(path) {
            return read_source(path);
        }
        let ctx = self.context(locale);

        match cache {
            Some(cache) => cache.render(path, ctx),
            None => {
                let source = read_source(path)?;
                self.environment(options)
                    .render_str(&source, ctx)
                    .map_err(|source| render_error(path, source))
            }
        }
    }

    fn context(&self, locale: Option<&str>) -> minijinja::Value {
        let locale = locale
            .filter(|l| !l.is_empty())
            .unwrap_or_else(|| self.store.default_locale());

        let mut ctx = match self.scope.as_ref() {
            Value::Object(scope) => scope.clone(),
            _ => Map::new(),
        };
        ctx.insert("locale".to_string(), Value::String(locale.to_string()));
        minijinja::Value::from_serialize(&ctx)
    }
}

fn is_verbatim(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| VERBATIM_EXTENSIONS.contains(&ext))
}

pub(crate) fn render_error(path: &Path, source: Error) -> TrimmerError {
    TrimmerError::TemplateRender {
        path: path.to_path_buf(),
        source,
    }
}

pub(crate) fn read_source(path: &Path) -> TrimmerResult<String> {
    fs::read_to_string(path).map_err(|source| TrimmerError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Backing for the `t` template function.
fn translate(
    store: &dyn TranslationStore,
    state: &State,
    key: &str,
    vars: &Kwargs,
) -> Result<String, Error> {
    let default_locale = store.default_locale();
    let locale = state
        .lookup("locale")
        .and_then(|value| value.as_str().map(str::to_string))
        .unwrap_or_else(|| default_locale.to_string());

    let found = match store.lookup(&locale, key).map_err(catalog_error)? {
        Some(value) => Some(value),
        None => store.lookup(default_locale, key).map_err(catalog_error)?,
    };

    let text = match found {
        Some(Value::String(text)) => text,
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => {
            return Err(Error::new(
                ErrorKind::InvalidOperation,
                format!("translation missing: {locale}.{key}"),
            ))
        }
    };

    interpolate(text, vars)
}

/// Replace `%{name}` placeholders with keyword arguments.
fn interpolate(mut text: String, vars: &Kwargs) -> Result<String, Error> {
    for name in vars.args() {
        let value: minijinja::Value = vars.get(name)?;
        text = text.replace(&format!("%{{{name}}}"), &value.to_string());
    }
    Ok(text)
}

fn catalog_error(err: crate::i18n::catalog::CatalogError) -> Error {
    Error::new(ErrorKind::InvalidOperation, "translation lookup failed").with_source(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::catalog::StaticCatalog;
    use serde_json::json;

    fn engine() -> TemplateEngine {
        let catalog = StaticCatalog::from_value(
            "en",
            json!({
                "en": { "hello": "Hello %{name}", "bye": "Bye", "count": 3 },
                "fr": { "hello": "Bonjour %{name}" }
            }),
        )
        .unwrap();
        TemplateEngine::new(Arc::new(catalog), json!({ "site": "Example" }))
    }

    fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_renders_scope_and_locale() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "page.html", "{{ site }}/{{ locale }}");

        let engine = engine();
        let out = engine.render(&path, Some("fr"), RenderOptions::default(), None).unwrap();
        assert_eq!(out, "Example/fr");

        let out = engine.render(&path, None, RenderOptions::default(), None).unwrap();
        assert_eq!(out, "Example/en");
    }

    #[test]
    fn test_translate_with_fallback_and_interpolation() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(
            dir.path(),
            "greet.html",
            r#"{{ t("hello", name="Ana") }} {{ t("bye") }} {{ t("count") }}"#,
        );

        let out = engine().render(&path, Some("fr"), RenderOptions::default(), None).unwrap();
        assert_eq!(out, "Bonjour Ana Bye 3");
    }

    #[test]
    fn test_missing_translation_fails_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "broken.html", r#"{{ t("nope") }}"#);

        match engine().render(&path, Some("fr"), RenderOptions::default(), None) {
            Err(TrimmerError::TemplateRender { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("expected render error, got {other:?}"),
        }
    }

    #[test]
    fn test_syntax_error_fails_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "bad.html", "{% if %}");

        assert!(matches!(
            engine().render(&path, None, RenderOptions::default(), None),
            Err(TrimmerError::TemplateRender { .. })
        ));
    }

    #[test]
    fn test_client_templates_are_not_rendered() {
        let dir = tempfile::tempdir().unwrap();
        let engine = engine();

        for name in ["row.mustache", "row.hbs", "row.handlebars"] {
            let path = write(dir.path(), name, "<li>{{name}}</li>");
            let out = engine.render(&path, Some("fr"), RenderOptions::default(), None).unwrap();
            assert_eq!(out, "<li>{{name}}</li>", "{name}");
        }
    }

    #[test]
    fn test_undefined_variable_fails_render() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "row.html", "<li>{{name}}</li>");

        assert!(matches!(
            engine().render(&path, None, RenderOptions::default(), None),
            Err(TrimmerError::TemplateRender { .. })
        ));
    }

    #[test]
    fn test_non_pretty_trims_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = write(dir.path(), "list.html", "<ul>\n  {% if true %}\n<li>x</li>\n  {% endif %}\n</ul>");

        let engine = engine();
        let compact = engine
            .render(&path, None, RenderOptions { pretty: false }, None)
            .unwrap();
        assert_eq!(compact, "<ul>\n<li>x</li>\n</ul>");

        let pretty = engine.render(&path, None, RenderOptions::default(), None).unwrap();
        assert_ne!(pretty, compact);
    }
}
