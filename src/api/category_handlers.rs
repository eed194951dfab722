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

use crate::api::error::{ApiError, ApiResult};
use crate::api::handlers::{AppState, MessageResponse};
use crate::model::{Category, CategoryPayload, Id};
use crate::store::traits::Store;

/// GET /api/categories
pub async fn list_categories<S: Store>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<Vec<Category>>> {
    let categories = state
        .store
        .list_categories()
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(categories))
}

/// GET /api/categories/:id
pub async fn get_category<S: Store>(
    State(state): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<Category>> {
    let Path(id) = id?;
    match state.store.get_category(id).await {
        Ok(Some(category)) => Ok(Json(category)),
        Ok(None) => Err(ApiError::NotFound("Category not found")),
        Err(e) => Err(state.reject(e)),
    }
}

/// POST /api/categories
///
/// Responds with the stored row so clients see the generated id and
/// creation timestamp.
pub async fn create_category<S: Store>(
    State(state): State<AppState<S>>,
    payload: Result<RequestJson<CategoryPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let RequestJson(payload) = payload?;
    let category = state
        .store
        .create_category(payload)
        .await
        .map_err(|e| state.reject(e))?;

    info!("Created category {} ({})", category.id, category.name);
    Ok((StatusCode::CREATED, Json(category)))
}

/// PUT /api/categories/:id
pub async fn update_category<S: Store>(
    State(state): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
    payload: Result<RequestJson<CategoryPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let RequestJson(payload) = payload?;
    let updated = state
        .store
        .update_category(id, payload)
        .await
        .map_err(|e| state.reject(e))?;

    if updated == 0 {
        debug!("Update matched no category with id {}", id);
    } else {
        info!("Updated category {}", id);
    }
    Ok(Json(MessageResponse {
        message: "Category updated",
    }))
}

/// DELETE /api/categories/:id
pub async fn delete_category<S: Store>(
    State(state): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let deleted = state
        .store
        .delete_category(id)
        .await
        .map_err(|e| state.reject(e))?;

    if deleted == 0 {
        debug!("Delete matched no category with id {}", id);
    } else {
        info!("Deleted category {}", id);
    }
    Ok(Json(MessageResponse {
        message: "Category deleted",
    }))
}
