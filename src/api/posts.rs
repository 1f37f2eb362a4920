//! Post API endpoints.
//!
//! Bodies are decoded from the raw bytes whatever the `Content-Type`, and
//! any decoding failure is answered with 400 before the store is touched.

use axum::{body::Bytes, extract::State, http::StatusCode, Json};

use crate::errors::AppError;
use crate::models::{DeletePostRequest, Post, PostDraft, SavePostRequest};
use crate::AppState;

/// GET /get - List all posts, unsorted.
pub async fn list_posts(State(state): State<AppState>) -> Json<Vec<Post>> {
    Json(state.posts.list().await)
}

/// POST /save - Create a post, or update the one named by `id`.
pub async fn save_post(State(state): State<AppState>, body: Bytes) -> Result<StatusCode, AppError> {
    let request: SavePostRequest = serde_json::from_slice(&body)?;

    let post = state.posts.upsert(PostDraft::from(request)).await?;
    tracing::debug!("Saved post {} ({})", post.id, post.date);

    Ok(StatusCode::OK)
}

/// POST /delete - Delete the post with `id`. Unknown ids succeed.
pub async fn delete_post(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let request: DeletePostRequest = serde_json::from_slice(&body)?;

    match request.id {
        Some(id) => {
            state.posts.delete(id).await?;
        }
        None => tracing::debug!("Delete request without id, nothing to remove"),
    }

    Ok(StatusCode::OK)
}
