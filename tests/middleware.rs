//! In-process tests of the trimmer middleware through the full router.

use axum::http::{header, StatusCode};
use trimmer::http::{downstream_app, Trimmer};

mod common;

use common::{fixture, fixture_with_keys, get, translations_js};

const TEMPLATES_JS: &str = r#"Templates = ({"greeting":"Hello","parts":{"footer":"Bye"}});"#;

#[tokio::test]
async fn test_translations_without_locale_use_default() {
    let fixture = fixture();
    let (status, headers, body) = get(fixture.router(), "/trimmer/translations.js").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/javascript");
    assert_eq!(
        body,
        translations_js(
            r#"{"a":"A","b":"B","date":{"long":"%d %B","short":"%d/%m"},"time":{"short":"%H:%M"}}"#
        )
    );
}

#[tokio::test]
async fn test_translations_merge_requested_locale_over_default() {
    let fixture = fixture();
    let (status, _, body) = get(fixture.router(), "/trimmer/fr/translations.js").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        translations_js(
            r#"{"a":"A-fr","b":"B","date":{"long":"%d %B","short":"%d.%m"},"time":{"short":"%H:%M"}}"#
        )
    );
}

#[tokio::test]
async fn test_unknown_locale_falls_back_to_default() {
    let fixture = fixture();
    let (_, _, default) = get(fixture.router(), "/trimmer/translations.js").await;
    let (status, _, body) = get(fixture.router(), "/trimmer/de/translations.js").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, default);
}

#[tokio::test]
async fn test_configured_keys_limit_translations() {
    let fixture = fixture_with_keys(&["date"]);
    let (_, _, body) = get(fixture.router(), "/trimmer/fr/translations.js").await;

    assert_eq!(
        body,
        translations_js(r#"{"date":{"long":"%d %B","short":"%d.%m"}}"#)
    );
}

#[tokio::test]
async fn test_query_keys_are_intersected_with_configured_keys() {
    let fixture = fixture_with_keys(&["date", "time"]);
    let (status, _, body) = get(
        fixture.router(),
        "/trimmer/fr/translations.js?allowed_keys=date.short,other",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, translations_js(r#"{"date":{"short":"%d.%m"}}"#));
}

#[tokio::test]
async fn test_repeated_query_keys_use_last_value() {
    let fixture = fixture_with_keys(&["date", "time"]);
    let (status, _, body) = get(
        fixture.router(),
        "/trimmer/fr/translations.js?allowed_keys=time&allowed_keys=date.short",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, translations_js(r#"{"date":{"short":"%d.%m"}}"#));
}

#[tokio::test]
async fn test_query_keys_cannot_reach_outside_configured_keys() {
    let fixture = fixture_with_keys(&["date"]);
    fixture.add_locale("secret.json", r#"{ "en": { "date_secret": { "k": "S" } } }"#);

    let (_, _, body) = get(fixture.router(), "/trimmer/translations.js?allowed_keys=date_secret").await;
    assert_eq!(body, translations_js("{}"));

    let (_, _, body) = get(fixture.router(), "/trimmer/translations.js").await;
    assert_eq!(body, translations_js(r#"{"date":{"long":"%d %B","short":"%d/%m"}}"#));
}

#[tokio::test]
async fn test_query_keys_with_wildcard_config() {
    let fixture = fixture();
    let (_, _, body) = get(fixture.router(), "/trimmer/translations.js?allowed_keys=a,time").await;

    assert_eq!(body, translations_js(r#"{"a":"A","time":{"short":"%H:%M"}}"#));
}

#[tokio::test]
async fn test_templates_tree() {
    let fixture = fixture();
    let (status, headers, body) = get(fixture.router(), "/trimmer/en/templates.js").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/javascript");
    assert_eq!(body, TEMPLATES_JS);
}

#[tokio::test]
async fn test_templates_render_in_requested_locale() {
    let fixture = fixture();
    fixture.add_template("parts/label.html", r#"{{ locale }}:{{ t("a") }}"#);

    let (_, _, body) = get(fixture.router(), "/trimmer/fr/templates.js").await;
    assert_eq!(
        body,
        r#"Templates = ({"greeting":"Hello","parts":{"footer":"Bye","label":"fr:A-fr"}});"#
    );
}

#[tokio::test]
async fn test_client_side_templates_are_served_unrendered() {
    let fixture = fixture();
    fixture.add_template("row.mustache", "<li>{{name}}</li>");

    let (status, _, body) = get(fixture.router(), "/trimmer/en/templates.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"Templates = ({"greeting":"Hello","parts":{"footer":"Bye"},"row":"<li>{{name}}</li>"});"#
    );
}

#[tokio::test]
async fn test_undefined_template_variable_is_server_error() {
    let fixture = fixture();
    fixture.add_template("row.html", "<li>{{name}}</li>");

    let (status, _, _) = get(fixture.router(), "/trimmer/en/templates.js").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn test_resources_concatenate_translations_and_templates() {
    let fixture = fixture();
    let router = fixture.router();

    let (_, _, translations) = get(router.clone(), "/trimmer/fr/translations.js").await;
    let (status, _, body) = get(router, "/trimmer/fr.js").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, format!("{translations}\n{TEMPLATES_JS}"));
}

#[tokio::test]
async fn test_other_paths_pass_through() {
    let fixture = fixture();

    let (status, headers, body) = get(fixture.router(), "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "ok");
    assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), "text/plain; charset=utf-8");
    // The server's request-id layer is the only addition.
    let mut names: Vec<&str> = headers
        .keys()
        .map(|name| name.as_str())
        .filter(|name| *name != "content-length")
        .collect();
    names.sort_unstable();
    assert_eq!(names, ["content-type", trimmer::http::X_REQUEST_ID]);

    let (status, _, body) = get(fixture.router(), "/trimmer/fr/other.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "Not Found");
}

#[tokio::test]
async fn test_middleware_returns_downstream_response_unchanged() {
    let fixture = fixture();
    let wrapped = Trimmer::from_config(&fixture.config.trimmer)
        .unwrap()
        .wrap(downstream_app());

    for uri in ["/health", "/missing", "/trimmer/fr/other.js"] {
        let direct = get(downstream_app(), uri).await;
        let through = get(wrapped.clone(), uri).await;
        assert_eq!(through, direct, "{uri}");
    }
}

#[tokio::test]
async fn test_invalid_locale_is_server_error() {
    let fixture = fixture();

    for uri in ["/trimmer/!!!/translations.js", "/trimmer/!!!/templates.js", "/trimmer/!!!.js"] {
        let (status, _, body) = get(fixture.router(), uri).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, "Internal Server Error");
    }
}

#[tokio::test]
async fn test_broken_template_is_server_error() {
    let fixture = fixture();
    fixture.add_template("broken.html", "{% if %}");

    let (status, _, body) = get(fixture.router(), "/trimmer/en/templates.js").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, "Internal Server Error");
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let fixture = fixture();
    let (_, headers, _) = get(fixture.router(), "/trimmer/translations.js").await;

    assert!(headers.contains_key(trimmer::http::X_REQUEST_ID));
}

#[tokio::test]
async fn test_mount_path_prefixes_routes() {
    let mut fixture = fixture();
    fixture.config.trimmer.mount_path = "/assets".into();

    let (status, _, body) = get(fixture.router(), "/assets/trimmer/en/templates.js").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, TEMPLATES_JS);

    let (status, _, _) = get(fixture.router(), "/trimmer/en/templates.js").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
