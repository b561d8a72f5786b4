use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

mod api;
mod config;
mod error;
mod state;

use crate::api::create_api_routes;
pub use config::ServerConfig;
pub use error::FarmGraphServerError;
pub use state::AppState;

/// Binds to `config.bind` and serves the API until the process is stopped.
pub async fn serve(config: ServerConfig) -> anyhow::Result<()> {
    let app = create_router(AppState::new(config.advisor), config.cors);

    let listener = TcpListener::bind(config.bind.as_str()).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening");
    Ok(axum::serve(listener, app).await?)
}

/// Creates the router of the API.
pub fn create_router(state: AppState, cors: bool) -> Router {
    let app = Router::new()
        .nest("/api", create_api_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if cors {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
