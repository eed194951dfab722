use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Json,
    Json as RequestJson,
};
use log::{debug, info};

use crate::api::error::ApiResult;
use crate::api::handlers::{AppState, MessageResponse};
use crate::model::{Id, ProductListing, ProductPayload};
use crate::store::traits::Store;

/// GET /api/products
pub async fn list_products<S: Store>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<Vec<ProductListing>>> {
    let products = state
        .store
        .list_products()
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(products))
}

/// POST /api/products
pub async fn create_product<S: Store>(
    State(state): State<AppState<S>>,
    payload: Result<RequestJson<ProductPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let RequestJson(payload) = payload?;
    let id = state
        .store
        .create_product(payload)
        .await
        .map_err(|e| state.reject(e))?;

    info!("Created product {}", id);
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Product created",
        }),
    ))
}

/// PUT /api/products/:id
pub async fn update_product<S: Store>(
    State(state): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
    payload: Result<RequestJson<ProductPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let RequestJson(payload) = payload?;
    let updated = state
        .store
        .update_product(id, payload)
        .await
        .map_err(|e| state.reject(e))?;

    if updated == 0 {
        debug!("Update matched no product with id {}", id);
    } else {
        info!("Updated product {}", id);
    }
    Ok(Json(MessageResponse {
        message: "Product updated",
    }))
}

/// DELETE /api/products/:id
pub async fn delete_product<S: Store>(
    State(state): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let deleted = state
        .store
        .delete_product(id)
        .await
        .map_err(|e| state.reject(e))?;

    if deleted == 0 {
        debug!("Delete matched no product with id {}", id);
    } else {
        info!("Deleted product {}", id);
    }
    Ok(Json(MessageResponse {
        message: "Product deleted",
    }))
}
