pub mod api;
pub mod config;
pub mod model;
pub mod store;

// Export API types
pub use api::routes;

// Export all model types
pub use model::*;

// Export store types
pub use store::{MemoryStore, PostgresStore, Store, StoreError};

use log::{info, warn};
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::api::{create_router, AppState};
use crate::config::AppConfig;

/// Bind and serve the API until Ctrl-C or SIGTERM
pub async fn run_server(config: AppConfig) -> anyhow::Result<()> {
    if config.uses_default_credentials() {
        warn!(
            "Using default database credentials (user '{}', empty password); for local development only",
            config.db_user
        );
    }

    let postgres_store = PostgresStore::from_config(&config);
    if config.run_migrations {
        info!("Applying bundled schema...");
        postgres_store.migrate().await?;
    }

    let state = AppState::new(Arc::new(postgres_store), &config);
    let app = create_router(state);

    let bind_address = config.server_address();
    let listener = TcpListener::bind(&bind_address).await?;
    info!(
        "Storefront API running on http://{} (database {}@{}:{}/{})",
        bind_address, config.db_user, config.db_host, config.db_port, config.db_name
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received Ctrl+C, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
