use super::*;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, header};
use tower::ServiceExt;

use crate::config::ServerConfig;

fn state() -> AppState {
    AppState::new(ServerConfig { api_message: "Work in progress".to_owned(), ..ServerConfig::default() })
}

async fn get_json(router: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = router
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
}

#[tokio::test]
async fn root_serves_message() {
    let (status, body) = get_json(app(state()), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "Message": "Work in progress" }));
}

#[tokio::test]
async fn data_serves_sample_series() {
    let (status, body) = get_json(app(state()), "/data").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!({ "Data": [12, 12, 12] }));
}

#[tokio::test]
async fn healthz_is_ok() {
    let (status, _) = get_json(app(state()), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let (status, _) = get_json(app(state()), "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn cors_allows_any_origin() {
    let response = app(state())
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/data")
                .header(header::ORIGIN, "https://example.org")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).map(|v| v.to_str().unwrap()),
        Some("*")
    );
}

#[test]
fn site_error_names_leptos_configuration() {
    let err = SiteError::LeptosConfig("Cargo.toml has no leptos metadata".to_owned());
    assert_eq!(
        err.to_string(),
        "leptos configuration unavailable: Cargo.toml has no leptos metadata"
    );
}
