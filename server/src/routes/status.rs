//! Public status / data endpoints.
//!
//! Field names are capitalized (`Message`, `Data`) because existing front-end
//! consumers read them that way.

use axum::extract::State;
use axum::response::Json;
use serde::Serialize;

use crate::state::AppState;

/// Sample series served by `GET /data`.
pub const SAMPLE_DATA: [u32; 3] = [12, 12, 12];

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    #[serde(rename = "Message")]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct DataResponse {
    #[serde(rename = "Data")]
    pub data: Vec<u32>,
}

/// `GET /`: service banner.
pub async fn root(State(state): State<AppState>) -> Json<MessageResponse> {
    Json(MessageResponse { message: state.config.api_message.clone() })
}

/// `GET /data`
pub async fn data() -> Json<DataResponse> {
    Json(DataResponse { data: SAMPLE_DATA.to_vec() })
}

#[cfg(test)]
#[path = "status_test.rs"]
mod tests;
