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
use crate::api::handlers::{AppState, CreatedResponse, MessageResponse};
use crate::model::{Branch, BranchPayload, Id};
use crate::store::traits::Store;

/// GET /api/branches
pub async fn list_branches<S: Store>(
    State(state): State<AppState<S>>,
) -> ApiResult<Json<Vec<Branch>>> {
    let branches = state
        .store
        .list_branches()
        .await
        .map_err(|e| state.reject(e))?;
    Ok(Json(branches))
}

/// POST /api/branches
pub async fn create_branch<S: Store>(
    State(state): State<AppState<S>>,
    payload: Result<RequestJson<BranchPayload>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreatedResponse>)> {
    let RequestJson(payload) = payload?;
    let id = state
        .store
        .create_branch(payload)
        .await
        .map_err(|e| state.reject(e))?;

    info!("Created branch {}", id);
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            message: "Branch created",
            id,
        }),
    ))
}

/// PUT /api/branches/:id
pub async fn update_branch<S: Store>(
    State(state): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
    payload: Result<RequestJson<BranchPayload>, JsonRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let RequestJson(payload) = payload?;
    let updated = state
        .store
        .update_branch(id, payload)
        .await
        .map_err(|e| state.reject(e))?;

    if updated == 0 {
        debug!("Update matched no branch with id {}", id);
    } else {
        info!("Updated branch {}", id);
    }
    Ok(Json(MessageResponse {
        message: "Branch updated",
    }))
}

/// DELETE /api/branches/:id
pub async fn delete_branch<S: Store>(
    State(state): State<AppState<S>>,
    id: Result<Path<Id>, PathRejection>,
) -> ApiResult<Json<MessageResponse>> {
    let Path(id) = id?;
    let deleted = state
        .store
        .delete_branch(id)
        .await
        .map_err(|e| state.reject(e))?;

    if deleted == 0 {
        debug!("Delete matched no branch with id {}", id);
    } else {
        info!("Deleted branch {}", id);
    }
    Ok(Json(MessageResponse {
        message: "Branch deleted",
    }))
}
