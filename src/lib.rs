//! Documentation of a small home menu service.
//!
//! Manages a list of dish names persisted to a JSON file, with a random
//! "what should we eat" draw.
//!
//!
//!
//! # General Infrastructure
//! - Single process, single JSON file as the source of truth
//! - Every request reads the file fresh; nothing is cached between requests
//! - Every overwrite first copies the prior file into `data/backups/`
//! - Backups are never pruned; disk growth is accepted at this scale
//!
//!
//!
//! # API
//!
//! | Route | Method | Purpose |
//! |---|---|---|
//! | `/api/menu` | GET | list the menu |
//! | `/api/menu` | POST | add a dish |
//! | `/api/menu/{name}` | DELETE | remove a dish |
//! | `/api/menu/{name}` | PUT | rename a dish |
//! | `/api/random` | POST | draw N dishes without replacement |
//! | `/api/backup` | GET | download the raw menu file |
//! | `/api/stats` | GET | dish count, last update, backup count |
//!
//! Rule violations (empty name, duplicate, unknown dish, empty menu) answer
//! 200 with `{"success": false, "message": ...}` so the frontend only ever
//! branches on the flag.
//!
//!
//!
//! # Notes
//!
//! ## Races
//! Mutating requests are serialized behind an in-process lock. The data file
//! itself carries no lock, so two server processes sharing a directory can
//! still interleave read-modify-write cycles. Known limitation.
//!
//!
//!
//! # Setup
//!
//! View current docs.
//! ```sh
//! cargo doc --open
//! ```
//!
//! Run with debug logging.
//! ```sh
//! RUST_LOG=menu=debug cargo run
//! ```
use std::time::Duration;

use axum::{
    Router,
    http::{Method, header::CONTENT_TYPE},
    routing::{delete, get, post},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod backup;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod selector;
pub mod state;
pub mod store;
pub mod utils;

use routes::{
    add_dish_handler, backup_handler, delete_dish_handler, menu_handler, random_handler,
    stats_handler, update_dish_handler,
};
use state::AppState;

pub async fn start_server() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Initializing state...");
    let state = AppState::new();

    info!("Starting server...");

    let cors = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let app = Router::new()
        .route("/api/menu", get(menu_handler).post(add_dish_handler))
        .route(
            "/api/menu/{name}",
            delete(delete_dish_handler).put(update_dish_handler),
        )
        .route("/api/random", post(random_handler))
        .route("/api/backup", get(backup_handler))
        .route("/api/stats", get(stats_handler))
        .layer(cors)
        .with_state(state.clone());

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await.unwrap();
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .unwrap();

    println!("Server shutting down...");
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
