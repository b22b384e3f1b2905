//! # Backend Module
//!
//! Everything the bill splitter server does, independent of how it is started.
//!
//! ## Architecture
//!
//! The backend follows a layered architecture:
//! ```text
//! Browser (index_bill.html)
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (calculator, bill service, edit access)
//!     ↓
//! Storage Layer (bills.json)
//! ```
//!
//! ## Key Responsibilities
//!
//! - Initialize the application state from an [`AppConfig`]
//! - Set up the REST router with CORS and static file serving

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::future::Future;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{error, info, warn};

use crate::backend::config::AppConfig;
use crate::backend::domain::{BillCalculator, BillService, EditAccessService};
use crate::backend::storage::{BillRepository, BillStorage, JsonConnection};

/// Page served for any path that is neither an API route nor a static file
pub const INDEX_PAGE: &str = "index_bill.html";

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub bill_service: BillService,
    pub calculator: BillCalculator,
    pub edit_access_service: EditAccessService,
}

impl AppState {
    /// Wire the services on top of an arbitrary storage backend
    pub fn from_storage(storage: Arc<dyn BillStorage>, config: &AppConfig) -> Self {
        Self {
            bill_service: BillService::new(storage, config.default_roster.clone()),
            calculator: BillCalculator::new(),
            edit_access_service: EditAccessService::with_password(config.edit_password.clone()),
        }
    }
}

/// Initialize the backend with all required services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up bill store in {}", config.data_dir.display());
    let connection = JsonConnection::new(&config.data_dir)?;
    let storage: Arc<dyn BillStorage> = Arc::new(BillRepository::new(connection));

    info!("Setting up application state");
    Ok(AppState::from_storage(storage, config))
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Result<Router> {
    let cors = cors_layer(config)?;

    let mut router = Router::new()
        .merge(io::bill_apis::router())
        .merge(io::calculation_apis::router())
        .merge(io::edit_access_apis::router());

    if let Some(static_dir) = &config.static_dir {
        if !static_dir.is_dir() {
            warn!("Static directory {} does not exist", static_dir.display());
        }
        info!("Serving static files from {}", static_dir.display());
        let index = ServeFile::new(static_dir.join(INDEX_PAGE));
        router = router.fallback_service(ServeDir::new(static_dir).fallback(index));
    }

    Ok(router.layer(cors).with_state(app_state))
}

/// Resolve once `signal` fires. If the signal handler could not be
/// installed the failure is logged and the server keeps running.
pub async fn wait_for_shutdown<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => info!("Shutdown requested"),
        Err(e) => {
            error!("Failed to install shutdown signal handler: {}", e);
            std::future::pending::<()>().await;
        }
    }
}

fn cors_layer(config: &AppConfig) -> Result<CorsLayer> {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);

    match &config.cors_origin {
        Some(origin) => {
            let origin = origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{}'", origin))?;
            info!("CORS restricted to {:?}", origin);
            Ok(cors.allow_origin([origin]))
        }
        None => Ok(cors.allow_origin(Any)),
    }
}
