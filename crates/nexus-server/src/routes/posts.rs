//! Post Routes - Feed, trending and focus
//!
//! Read side of the forum. Handlers go straight to the post store.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use uuid::Uuid;

use nexus::domain::{trending as top_voted, TRENDING_LIMIT};
use nexus::PostRepository;

use crate::models::{FeedParams, FocusRequest, FocusResponse, PersonaResponse, PostResponse};
use crate::AppState;

/// List posts
#[utoipa::path(
    get,
    path = "/nexus/posts",
    params(FeedParams),
    responses(
        (status = 200, description = "Filtered and sorted feed", body = Vec<PostResponse>),
        (status = 400, description = "Unknown category or sort"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Posts"
)]
pub async fn list_posts(
    State(state): State<AppState>,
    Query(params): Query<FeedParams>,
) -> Result<Json<Vec<PostResponse>>, (StatusCode, String)> {
    let query = params
        .into_query()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let posts = state
        .repo
        .find_all()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        query.apply(posts).into_iter().map(Into::into).collect(),
    ))
}

/// Get post by ID
#[utoipa::path(
    get,
    path = "/nexus/posts/{id}",
    params(
        ("id" = Uuid, Path, description = "Post ID")
    ),
    responses(
        (status = 200, description = "Post found", body = PostResponse),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Posts"
)]
pub async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<PostResponse>, (StatusCode, String)> {
    let post = state
        .repo
        .find_by_id(id)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
        .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))?;

    Ok(Json(post.into()))
}

/// Trending posts
#[utoipa::path(
    get,
    path = "/nexus/trending",
    responses(
        (status = 200, description = "Highest-voted posts", body = Vec<PostResponse>),
        (status = 500, description = "Internal server error")
    ),
    tag = "Posts"
)]
pub async fn trending(
    State(state): State<AppState>,
) -> Result<Json<Vec<PostResponse>>, (StatusCode, String)> {
    let posts = state
        .repo
        .find_all()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(
        top_voted(&posts, TRENDING_LIMIT)
            .into_iter()
            .map(Into::into)
            .collect(),
    ))
}

/// List personas
#[utoipa::path(
    get,
    path = "/nexus/personas",
    responses(
        (status = 200, description = "The synthetic cast", body = Vec<PersonaResponse>)
    ),
    tag = "Posts"
)]
pub async fn list_personas(State(state): State<AppState>) -> Json<Vec<PersonaResponse>> {
    Json(
        state
            .scheduler
            .generator()
            .registry()
            .all()
            .iter()
            .map(Into::into)
            .collect(),
    )
}

/// Set the focused post
#[utoipa::path(
    put,
    path = "/nexus/focus",
    request_body = FocusRequest,
    responses(
        (status = 200, description = "Focus updated", body = FocusResponse),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Posts"
)]
pub async fn set_focus(
    State(state): State<AppState>,
    Json(payload): Json<FocusRequest>,
) -> Result<Json<FocusResponse>, (StatusCode, String)> {
    if let Some(id) = payload.post_id {
        state
            .repo
            .find_by_id(id)
            .await
            .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?
            .ok_or((StatusCode::NOT_FOUND, "Post not found".to_string()))?;
    }

    state.ui.set_focus(payload.post_id);
    Ok(Json(FocusResponse {
        post_id: payload.post_id,
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/nexus/posts", get(list_posts))
        .route("/nexus/posts/:id", get(get_post))
        .route("/nexus/trending", get(trending))
        .route("/nexus/personas", get(list_personas))
        .route("/nexus/focus", put(set_focus))
}
