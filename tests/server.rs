use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use tempfile::TempDir;
use tower::ServiceExt;

use portfolio::config::Config;
use portfolio::server::{build_router, AppState};

fn test_app() -> (TempDir, Router) {
    let tmp = TempDir::new().unwrap();
    let mut config = Config::minimal();
    config.theme.store_path = tmp.path().join("prefs.json");
    let state = AppState::new(config).unwrap();
    (tmp, build_router(state))
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let (status, body) = get(app, uri).await;
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn test_health() {
    let (_tmp, app) = test_app();
    let (status, v) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["status"], "ok");
    assert_eq!(v["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_tags_start_with_all() {
    let (_tmp, app) = test_app();
    let (status, v) = get_json(&app, "/api/tags").await;
    assert_eq!(status, StatusCode::OK);
    let tags = v["tags"].as_array().unwrap();
    assert_eq!(tags[0]["value"], "all");
    assert_eq!(tags[0]["label"], "All tags");
    assert_eq!(tags.len(), 9);
}

#[tokio::test]
async fn test_projects_by_tag() {
    let (_tmp, app) = test_app();
    let (status, v) = get_json(&app, "/api/projects?tag=Computer%20Vision").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(v["count"], 1);
    assert_eq!(
        v["projects"][0]["title"],
        "Skin Lesion Classification and Segmentation"
    );
}

#[tokio::test]
async fn test_projects_by_text() {
    let (_tmp, app) = test_app();
    let (_, v) = get_json(&app, "/api/projects?q=segmentation&tag=all").await;
    assert_eq!(v["count"], 1);

    let (_, v) = get_json(&app, "/api/projects?q=zzz-nomatch").await;
    assert_eq!(v["count"], 0);
    assert!(v["html"].as_str().unwrap().contains("No projects found"));
}

#[tokio::test]
async fn test_unknown_tag_is_bad_request() {
    let (_tmp, app) = test_app();
    let (status, v) = get_json(&app, "/api/projects?tag=Rust").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(v["error"]["code"], "bad_request");
    assert_eq!(v["error"]["message"], "unknown tag: Rust");

    let (status, _) = get(&app, "/?tag=Rust").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_page_renders_filtered_grid() {
    let (_tmp, app) = test_app();
    let (status, html) = get(&app, "/?q=diabetes").await;
    assert_eq!(status, StatusCode::OK);
    assert!(html.contains("<h3>Diabetes Risk Classification Using ML Algorithms</h3>"));
    assert!(!html.contains("<h3>Skin Lesion"));
    assert!(html.contains("value=\"diabetes\""));
}

#[tokio::test]
async fn test_theme_toggle_persists() {
    let (tmp, app) = test_app();
    let (_, v) = get_json(&app, "/api/theme").await;
    assert_eq!(v["theme"], "light");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/theme/toggle")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");

    let (_, v) = get_json(&app, "/api/theme").await;
    assert_eq!(v["theme"], "dark");
    assert_eq!(v["label"], "Dark");

    let (_, html) = get(&app, "/").await;
    assert!(html.contains("data-theme=\"dark\""));

    let saved = std::fs::read_to_string(tmp.path().join("prefs.json")).unwrap();
    assert!(saved.contains("dark"));
}

async fn post(app: &Router, uri: &str) -> axum::response::Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_theme_toggle_keeps_filter() {
    let (_tmp, app) = test_app();
    let response = post(&app, "/theme/toggle?tag=Computer%20Vision&q=lesion").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers()["location"],
        "/?tag=Computer%20Vision&q=lesion"
    );

    let response = post(&app, "/theme/toggle?tag=&q=").await;
    assert_eq!(response.headers()["location"], "/");
}

#[tokio::test]
async fn test_failed_theme_save_is_not_reported() {
    let tmp = TempDir::new().unwrap();
    let blocker = tmp.path().join("blocker");
    std::fs::write(&blocker, "").unwrap();
    let mut config = Config::minimal();
    config.theme.store_path = blocker.join("prefs.json");
    let app = build_router(AppState::new(config).unwrap());

    let response = post(&app, "/theme/toggle").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let (_, v) = get_json(&app, "/api/theme").await;
    assert_eq!(v["theme"], "light");
    assert_eq!(v["label"], "Light");

    let (_, html) = get(&app, "/").await;
    assert!(html.contains("data-theme=\"light\""));
}
