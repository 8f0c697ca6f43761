//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON status API and stitches it with Leptos SSR rendering under a
//! single Axum router. With the Leptos app mounted the page routes own `/`, so
//! the API moves under [`API_PREFIX`]; in API-only mode it is served at the
//! root exactly as legacy consumers expect.

pub mod status;

use std::path::PathBuf;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::get;
use leptos::prelude::*;
use leptos_axum::{LeptosRoutes, generate_route_list};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Mount point for the JSON API when the Leptos app is served.
pub const API_PREFIX: &str = "/api";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteError {
    /// No usable `[[workspace.metadata.leptos]]` section or `LEPTOS_*` env.
    #[error("leptos configuration unavailable: {0}")]
    LeptosConfig(String),
}

/// JSON API routes. Any origin, method and header is allowed.
fn api_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(status::root))
        .route("/data", get(status::data))
        .layer(cors)
        .with_state(state)
}

/// API-only router: status routes at the root plus `/healthz`.
pub fn app(state: AppState) -> Router {
    api_routes(state)
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
}

/// Full router: API under [`API_PREFIX`], Leptos SSR pages, and `/pkg` assets.
///
/// # Errors
///
/// Returns an error if the Leptos configuration cannot be loaded (missing or
/// malformed `[[workspace.metadata.leptos]]` section and no `LEPTOS_*` env).
pub fn leptos_app(state: AppState) -> Result<Router, SiteError> {
    let conf = get_configuration(None).map_err(|e| SiteError::LeptosConfig(e.to_string()))?;
    let leptos_options = conf.leptos_options;
    let routes = generate_route_list(client::app::App);

    let leptos_router = Router::new()
        .leptos_routes(&leptos_options, routes, {
            let opts = leptos_options.clone();
            move || client::app::shell(opts.clone())
        })
        .with_state(leptos_options.clone());

    // Serve Leptos static assets (WASM, CSS, JS) from the site root /pkg directory.
    let site_root_path = PathBuf::from(leptos_options.site_root.as_ref());

    Ok(Router::new()
        .nest(API_PREFIX, api_routes(state))
        .route("/healthz", get(healthz))
        .merge(leptos_router)
        .nest_service("/pkg", ServeDir::new(site_root_path.join("pkg")))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http()))
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
