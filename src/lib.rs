pub mod api;
pub mod app_state;
pub mod config;
pub mod error;
pub mod order;

use axum::Router;
use axum::extract::Extension;
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeFile;
use tower_http::trace::TraceLayer;
use tracing::info;

//
// Re-export
//
pub use api::{health, log_request_errors, not_found, place_order};
pub use app_state::AppState;
pub use config::Config;
pub use error::AppError;
pub use order::{
    OrderClient, OrderRequest, OrderRoute, ROUTES, Target, UpstreamError, extract_username,
    extract_video_id, find_route,
};

/// Build the relay router on top of `state`.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let index = ServeFile::new(state.static_dir().join("index.html"));

    Router::new()
        .route_service("/", index)
        .route("/api/health", get(health))
        .route("/api/{platform}/{action}", post(place_order))
        .fallback(not_found)
        .layer(axum::middleware::from_fn(api::log_request_errors))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(Extension(state))
}

pub async fn run(config: Config) -> anyhow::Result<()> {
    let state = AppState::new(&config)?;

    for route in ROUTES {
        info!(path = %route.path(), service = route.service, "Order route registered");
    }

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr).await?;
    info!("Boost relay listening on {addr}");

    axum::serve(listener, app(state)).await?;
    Ok(())
}
