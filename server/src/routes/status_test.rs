use super::*;
use crate::config::ServerConfig;

#[tokio::test]
async fn root_returns_configured_message() {
    let state = AppState::new(ServerConfig { api_message: "Hello".to_owned(), ..ServerConfig::default() });
    let Json(body) = root(State(state)).await;
    assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({ "Message": "Hello" }));
}

#[tokio::test]
async fn data_returns_sample_series() {
    let Json(body) = data().await;
    assert_eq!(serde_json::to_value(body).unwrap(), serde_json::json!({ "Data": [12, 12, 12] }));
}
