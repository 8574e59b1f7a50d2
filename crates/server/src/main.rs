mod api;
mod config;
mod dto;
mod state;

use crate::{config::Config, state::AppState};
use axum::routing::{get, post};
use museo::catalog::Catalog;
use std::{sync::Arc, time::Instant};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().init();

    info!("Starting server...");
    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };

    info!("Loading museums from {}...", config.data_path.display());
    let now = Instant::now();
    let catalog = match Catalog::from_path(&config.data_path) {
        Ok(catalog) => catalog,
        Err(err) => {
            error!("Failed to load museum export: {err}");
            std::process::exit(1);
        }
    };
    info!("Loading {} museums took {:?}", catalog.len(), now.elapsed());
    let state = Arc::new(AppState::new(catalog));

    let app = axum::Router::new()
        .route("/health", get(api::health))
        .route("/search", get(api::search))
        .route("/museums", get(api::in_bounds))
        .route("/near", get(api::near))
        .route("/route", post(api::routing))
        .with_state(state);

    let address = match config.address() {
        Ok(address) => address,
        Err(err) => {
            error!("{err}");
            std::process::exit(1);
        }
    };
    let listener = match tokio::net::TcpListener::bind(address).await {
        Ok(listener) => listener,
        Err(err) => {
            error!("Failed to bind {address}: {err}");
            std::process::exit(1);
        }
    };
    info!("Listening on {address}");
    if let Err(err) = axum::serve(listener, app).await {
        error!("Server stopped: {err}");
        std::process::exit(1);
    }
}
