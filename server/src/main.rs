mod config;
mod routes;
mod state;

use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => eprintln!("ignoring unreadable .env: {e}"),
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
        .init();

    let config = match config::ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid server configuration");
            std::process::exit(2);
        }
    };
    let addr = config.socket_addr();
    let state = state::AppState::new(config);

    // Leptos SSR is optional: without its configuration only the API is served.
    let app = match routes::leptos_app(state.clone()) {
        Ok(app) => {
            tracing::info!(prefix = routes::API_PREFIX, "serving Leptos app with JSON API");
            app
        }
        Err(e) => {
            tracing::warn!(error = %e, "Leptos app not configured; serving API only");
            routes::app(state)
        }
    };

    let listener = tokio::net::TcpListener::bind(addr).await.expect("failed to bind");

    tracing::info!(%addr, "govx listening");
    axum::serve(listener, app).await.expect("server failed");
}
