//! Handlers for the `/records` resource.
//!
//! Every handler requires an authenticated user; ownership checks, validation
//! and pagination all happen in the catalog engine.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use cinelog_core::catalog::{CatalogPage, MovieShow};
use cinelog_core::error::CoreError;
use cinelog_core::types::DbId;

use crate::error::AppResult;
use crate::extract::{ApiPath, ApiQuery, RecordPayload};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::MessageResponse;
use crate::state::AppState;

/// Acknowledgement returned by a successful delete.
pub const DELETED_MESSAGE: &str = "Movie/Show deleted successfully";

/// GET /api/v1/records
pub async fn list(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiQuery(params): ApiQuery<ListParams>,
) -> AppResult<Json<CatalogPage>> {
    let query = params.resolve()?;
    let page = state.catalog.list(auth_user.user_id, &query).await?;
    Ok(Json(page))
}

/// GET /api/v1/records/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<MovieShow>> {
    let record = state.catalog.get(auth_user.user_id, id).await?;
    Ok(Json(record))
}

/// POST /api/v1/records
///
/// Accepts a JSON object or a multipart form with an optional `poster` file.
pub async fn create(
    State(state): State<AppState>,
    auth_user: AuthUser,
    payload: RecordPayload,
) -> AppResult<(StatusCode, Json<MovieShow>)> {
    let poster = store_poster(&state, &payload).await?;

    let result = state
        .catalog
        .create(auth_user.user_id, payload.fields, poster.clone())
        .await;
    let record = discard_on_error(&state, poster, result).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// PUT /api/v1/records/{id}
///
/// Re-validates the full record. Optional fields left out keep their stored
/// values; a new poster file replaces the stored poster path.
pub async fn update(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
    payload: RecordPayload,
) -> AppResult<Json<MovieShow>> {
    let poster = store_poster(&state, &payload).await?;

    let result = state
        .catalog
        .update(auth_user.user_id, id, payload.fields, poster.clone())
        .await;
    let record = discard_on_error(&state, poster, result).await?;
    Ok(Json(record))
}

/// DELETE /api/v1/records/{id}
pub async fn delete(
    State(state): State<AppState>,
    auth_user: AuthUser,
    ApiPath(id): ApiPath<DbId>,
) -> AppResult<Json<MessageResponse>> {
    state.catalog.delete(auth_user.user_id, id).await?;
    Ok(Json(MessageResponse::new(DELETED_MESSAGE)))
}

async fn store_poster(state: &AppState, payload: &RecordPayload) -> AppResult<Option<String>> {
    match &payload.poster {
        Some(file) => state.posters.save(file).await.map(Some),
        None => Ok(None),
    }
}

/// Remove a just-stored poster when the write it belonged to failed.
async fn discard_on_error(
    state: &AppState,
    poster: Option<String>,
    result: Result<MovieShow, CoreError>,
) -> AppResult<MovieShow> {
    if result.is_err() {
        if let Some(path) = poster {
            state.posters.discard(&path).await;
        }
    }
    Ok(result?)
}
