//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the service
//! layer for validation and persistence.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{DeleteResponse, HealthResponse, Post, PostId, PostPayload};
use super::error::AppError;
use super::state::AppState;
use crate::db::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Parse a path segment into a positive post id.
///
/// The id is extracted as a raw string so that non-integer values produce the
/// same JSON-bodied 400 as every other client error.
fn parse_post_id(raw: &str) -> Result<PostId, AppError> {
    raw.parse::<i32>()
        .ok()
        .map(PostId::new)
        .filter(PostId::is_valid)
        .ok_or_else(|| AppError::BadRequest("Invalid post ID".to_string()))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Health check endpoint to verify the service is running and the database is
/// accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected",
        Ok(false) => "disconnected",
        Err(e) => {
            // Log the detail server-side; the client only learns the state.
            tracing::error!(error = %e, "database health check failed");
            "error"
        }
    }
    .to_string();

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Post CRUD
// =============================================================================

/// GET /posts
///
/// List all posts, oldest first. An empty table yields `[]`.
pub async fn list_posts(State(state): State<AppState>) -> HandlerResult<Vec<Post>> {
    let posts = services::list_posts(state.repository.as_ref()).await?;
    Ok(Json(posts))
}

/// GET /post/{id}
///
/// Fetch a single post by id.
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<Post> {
    let id = parse_post_id(&id)?;
    let post = services::get_post(state.repository.as_ref(), id).await?;
    Ok(Json(post))
}

/// POST /post
///
/// Create a new post. Responds 201 with the stored post including its
/// assigned id.
pub async fn create_post(
    State(state): State<AppState>,
    payload: Result<Json<PostPayload>, JsonRejection>,
) -> Result<(StatusCode, Json<Post>), AppError> {
    let Json(payload) = payload?;
    let post = services::create_post(state.repository.as_ref(), &payload.into()).await?;
    Ok((StatusCode::CREATED, Json(post)))
}

/// PUT /post/{id}
///
/// Replace title, body and author of an existing post. Responds 404 when the
/// id matches no row.
pub async fn update_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PostPayload>, JsonRejection>,
) -> HandlerResult<Post> {
    let id = parse_post_id(&id)?;
    let Json(payload) = payload?;
    let updated =
        services::update_post(state.repository.as_ref(), &payload.into_post(id)).await?;
    Ok(Json(updated))
}

/// DELETE /post/{id}
///
/// Delete a post by id. Deleting an already-absent id still succeeds.
pub async fn delete_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> HandlerResult<DeleteResponse> {
    let id = parse_post_id(&id)?;
    services::delete_post(state.repository.as_ref(), id).await?;
    Ok(Json(DeleteResponse::success()))
}
