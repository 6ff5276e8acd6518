use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::api::error::ServerError;
use crate::api::registrations;
use crate::config::Config;
use crate::db::store::Store;

pub struct AppState {
    pub store: Store,
}

pub fn router(state: Arc<AppState>, public_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/api/register", post(registrations::register))
        .route("/api/registrations", get(registrations::list))
        .fallback_service(ServeDir::new(public_dir))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn start_server(config: Config) -> Result<(), ServerError> {
    let store = Store::new(&config.db_file);
    store.initialize().await?;
    tracing::info!("Using database file {:?}", store.path());

    let state = Arc::new(AppState { store });
    let app = router(state, &config.public_dir);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind {
            port: config.port,
            source,
        })?;

    tracing::info!("Server running on port {}", config.port);

    axum::serve(listener, app).await.map_err(ServerError::Serve)
}
