pub mod api;
pub mod config;
pub mod db;

use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("signup_backend=info,tower_http=info")),
        )
        .init();

    tracing::info!("Starting signup backend...");

    let result = match Config::from_env() {
        Ok(config) => api::server::start_server(config).await,
        Err(e) => Err(e.into()),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
