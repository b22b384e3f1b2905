use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use bill_splitter_server::backend::wait_for_shutdown;
use bill_splitter_server::{create_router, initialize_backend, AppConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging, RUST_LOG overrides the default level
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = AppConfig::load()?;
    let app_state = initialize_backend(&config)?;
    let app = create_router(app_state, &config)?;

    let addr = config.bind_address();
    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown(tokio::signal::ctrl_c()))
        .await?;

    info!("Server stopped");
    Ok(())
}
