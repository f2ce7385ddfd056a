//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use tempfile::TempDir;
use tower::ServiceExt;

use trimmer::config::ServerConfig;
use trimmer::http::HttpServer;
use trimmer::i18n::AllowedKeys;

pub const EN_LOCALE: &str = r#"{
    "en": {
        "a": "A",
        "b": "B",
        "date": { "short": "%d/%m", "long": "%d %B" },
        "time": { "short": "%H:%M" }
    }
}"#;

pub const FR_LOCALE: &str = r#"{
    "fr": {
        "a": "A-fr",
        "date": { "short": "%d.%m" }
    }
}"#;

/// A temp directory holding `templates/` and `locales/`, plus a config
/// pointing at them.
pub struct Fixture {
    pub dir: TempDir,
    pub config: ServerConfig,
}

impl Fixture {
    pub fn templates(&self) -> std::path::PathBuf {
        self.dir.path().join("templates")
    }

    /// Write `contents` at `relative` below the templates root.
    pub fn add_template(&self, relative: &str, contents: &str) {
        write(&self.templates().join(relative), contents);
    }

    /// Write a catalog file below the locales root.
    pub fn add_locale(&self, file: &str, contents: &str) {
        write(&self.dir.path().join("locales").join(file), contents);
    }

    pub fn router(&self) -> Router {
        HttpServer::new(self.config.clone())
            .expect("fixture catalog loads")
            .router()
    }
}

/// `greeting.txt` ("Hello") and `parts/footer.txt` ("Bye"), with `en` and
/// `fr` catalogs and `en` as the default locale.
pub fn fixture() -> Fixture {
    let dir = tempfile::tempdir().unwrap();
    write(&dir.path().join("templates/greeting.txt"), "Hello");
    write(&dir.path().join("templates/parts/footer.txt"), "Bye");
    write(&dir.path().join("locales/en.json"), EN_LOCALE);
    write(&dir.path().join("locales/fr.json"), FR_LOCALE);

    let mut config = ServerConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.trimmer.templates_path = dir.path().join("templates");
    config.trimmer.locales_path = Some(dir.path().join("locales"));
    config.trimmer.default_locale = "en".into();

    Fixture { dir, config }
}

/// Same as [`fixture`] but with `allowed_keys` restricted to `prefixes`.
pub fn fixture_with_keys(prefixes: &[&str]) -> Fixture {
    let mut fixture = fixture();
    fixture.config.trimmer.allowed_keys = AllowedKeys::prefixes(prefixes.iter().copied());
    fixture
}

/// Send a GET through the router and collect the whole response.
pub async fn get(router: Router, uri: &str) -> (StatusCode, HeaderMap, String) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, headers, String::from_utf8(bytes.to_vec()).unwrap())
}

/// The translations snippet for a given JSON object literal.
pub fn translations_js(json: &str) -> String {
    format!("if(typeof(I18n) == 'undefined') {{ I18n = {{}}; }};\nI18n.translations = ({json});")
}

fn write(path: &Path, contents: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}
