use serde::Serialize;
use std::sync::Arc;

use crate::api::error::ApiError;
use crate::config::AppConfig;
use crate::model::Id;
use crate::store::StoreError;

/// Shared, read-only state handed to every handler
pub struct AppState<S> {
    pub store: Arc<S>,
    pub expose_errors: bool,
}

impl<S> Clone for AppState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
            expose_errors: self.expose_errors,
        }
    }
}

impl<S> AppState<S> {
    pub fn new(store: Arc<S>, config: &AppConfig) -> Self {
        Self {
            store,
            expose_errors: config.debug,
        }
    }

    /// Wrap a store failure for the HTTP layer
    pub fn reject(&self, source: StoreError) -> ApiError {
        ApiError::Store {
            source,
            expose: self.expose_errors,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub message: &'static str,
    pub id: Id,
}

/// GET / - liveness
pub async fn index() -> &'static str {
    "API is running!"
}
