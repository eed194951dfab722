use log::{debug, warn};
use sqlx::postgres::{PgConnectOptions, PgConnection};
use sqlx::Connection;

use crate::config::AppConfig;
use crate::store::error::{StoreError, StoreResult};

/// Opens a fresh connection for every store call.
///
/// The returned `PgConnection` is owned by the caller. Hand it back through
/// [`Connector::release`] once the statement has finished so the server sees
/// an orderly disconnect; if the call unwinds early the connection is still
/// closed when dropped.
#[derive(Debug, Clone)]
pub struct Connector {
    options: PgConnectOptions,
}

impl Connector {
    pub fn new(options: PgConnectOptions) -> Self {
        Self { options }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.connect_options())
    }

    pub async fn acquire(&self) -> StoreResult<PgConnection> {
        debug!(
            "Opening connection to {}:{}/{}",
            self.options.get_host(),
            self.options.get_port(),
            self.options.get_database().unwrap_or_default()
        );
        PgConnection::connect_with(&self.options)
            .await
            .map_err(StoreError::connect)
    }

    /// Close a connection gracefully. Failures are logged; the statement
    /// outcome has already been decided.
    pub async fn release(&self, conn: PgConnection) {
        if let Err(e) = conn.close().await {
            warn!("Failed to close database connection cleanly: {}", e);
        }
    }
}
