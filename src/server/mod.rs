//! HTTP surface: shared state, router wiring, CORS, graceful shutdown.

pub mod error;
pub mod handlers;

use std::sync::{Arc, Mutex};

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::{Any, CorsLayer};

use crate::config::Config;
use crate::counter::CounterStore;
use crate::store::StoreError;
use crate::voting::engine::VotingEngine;

use handlers::{get_subjects, increment_counter, login, record_vote};

/// Shared application state handed to every handler.
///
/// The engine and the counter store sit behind mutexes so each request's
/// read-modify-write runs to completion before the next begins. There is no
/// document-level locking beyond that.
pub struct AppState {
    pub engine: Mutex<VotingEngine>,
    pub counters: Mutex<CounterStore>,
}

impl AppState {
    /// Opens every backing document under the configured data directory,
    /// seeding defaults on first use.
    pub fn open(config: &Config) -> Result<Arc<Self>, StoreError> {
        Ok(Arc::new(Self {
            engine: Mutex::new(VotingEngine::open(&config.data_dir)?),
            counters: Mutex::new(CounterStore::open(&config.data_dir)?),
        }))
    }
}

/// Builds the application router. Preflight OPTIONS requests are answered by
/// the CORS layer, mirroring the wide-open headers of the original handlers.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/subjects", get(get_subjects))
        .route("/vote", post(record_vote))
        .route("/login", post(login))
        .route("/api/v1/counter/increment", post(increment_counter))
        .layer(cors)
        .with_state(state)
}

/// Binds and serves until ctrl-c or SIGTERM.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    info!("Initializing state from {}", config.data_dir.display());
    let state = AppState::open(&config)?;
    let app = router(state);

    let address = format!("0.0.0.0:{}", config.port);
    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
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
