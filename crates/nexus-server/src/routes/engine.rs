//! Engine Routes - Scheduler status and control
//!
//! Status is public. Start, stop and the manual cycles sit behind the admin
//! bearer token when one is configured.

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};

use nexus::PostRepository;

use crate::models::{
    CommentCycleResponse, EngineActionResponse, EngineStatus, PostCycleResponse, RemoteStatus,
};
use crate::AppState;

/// Scheduler status
#[utoipa::path(
    get,
    path = "/nexus/engine",
    responses(
        (status = 200, description = "Scheduler status", body = EngineStatus),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engine"
)]
pub async fn engine_status(
    State(state): State<AppState>,
) -> Result<Json<EngineStatus>, (StatusCode, String)> {
    let posts = state
        .repo
        .count()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    let scheduler = &state.scheduler;
    let config = scheduler.config();
    Ok(Json(EngineStatus {
        running: scheduler.is_running(),
        posts,
        post_interval_secs: [
            config.post_interval_secs.min(),
            config.post_interval_secs.max(),
        ],
        comment_interval_secs: [
            config.comment_interval_secs.min(),
            config.comment_interval_secs.max(),
        ],
        fresh_comment_probability: config.fresh_comment_probability,
        remote: scheduler.generator().remote().map(|remote| RemoteStatus {
            provider: remote.provider_name().to_string(),
            model: remote.model_id().to_string(),
        }),
    }))
}

/// Start the scheduler
#[utoipa::path(
    post,
    path = "/nexus/engine/start",
    responses(
        (status = 200, description = "Scheduler running", body = EngineActionResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engine"
)]
pub async fn start_engine(
    State(state): State<AppState>,
) -> Result<Json<EngineActionResponse>, (StatusCode, String)> {
    let changed = state
        .scheduler
        .start()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(EngineActionResponse {
        changed,
        running: state.scheduler.is_running(),
    }))
}

/// Stop the scheduler
#[utoipa::path(
    post,
    path = "/nexus/engine/stop",
    responses(
        (status = 200, description = "Scheduler stopped", body = EngineActionResponse),
        (status = 401, description = "Unauthorized")
    ),
    tag = "Engine"
)]
pub async fn stop_engine(State(state): State<AppState>) -> Json<EngineActionResponse> {
    let changed = state.scheduler.stop();
    Json(EngineActionResponse {
        changed,
        running: state.scheduler.is_running(),
    })
}

/// Run one post cycle now
#[utoipa::path(
    post,
    path = "/nexus/engine/post",
    responses(
        (status = 200, description = "Post written", body = PostCycleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engine"
)]
pub async fn run_post_cycle(
    State(state): State<AppState>,
) -> Result<Json<PostCycleResponse>, (StatusCode, String)> {
    let post = state
        .scheduler
        .run_post_cycle()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(PostCycleResponse {
        post: post.map(Into::into),
    }))
}

/// Run one comment cycle now
#[utoipa::path(
    post,
    path = "/nexus/engine/comment",
    responses(
        (status = 200, description = "Comment written, or nothing when the store is empty", body = CommentCycleResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Engine"
)]
pub async fn run_comment_cycle(
    State(state): State<AppState>,
) -> Result<Json<CommentCycleResponse>, (StatusCode, String)> {
    let outcome = state
        .scheduler
        .run_comment_cycle()
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;

    Ok(Json(match outcome {
        Some(outcome) => CommentCycleResponse {
            post_id: Some(outcome.post_id),
            comment: Some(outcome.comment.into()),
            reply_to: outcome.addressee,
        },
        None => CommentCycleResponse {
            post_id: None,
            comment: None,
            reply_to: None,
        },
    }))
}

/// Public engine routes
pub fn router() -> Router<AppState> {
    Router::new().route("/nexus/engine", get(engine_status))
}

/// Engine control routes, wrapped in auth by the caller
pub fn control_router() -> Router<AppState> {
    Router::new()
        .route("/nexus/engine/start", post(start_engine))
        .route("/nexus/engine/stop", post(stop_engine))
        .route("/nexus/engine/post", post(run_post_cycle))
        .route("/nexus/engine/comment", post(run_comment_cycle))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{app_state, read_json};
    use axum::body::Body;
    use axum::http::{header, Request};
    use tower::ServiceExt;

    fn post_request(uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::post(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_status_is_public() {
        let app = crate::build_router(app_state(Some("secret")));
        let response = app
            .oneshot(Request::get("/nexus/engine").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let status: serde_json::Value = read_json(response).await;
        assert_eq!(status["running"], false);
        assert_eq!(status["posts"], 4);
        assert_eq!(status["post_interval_secs"], serde_json::json!([25, 50]));
        assert!(status["remote"].is_null());
    }

    #[tokio::test]
    async fn test_control_requires_admin_key() {
        let state = app_state(Some("secret"));

        let missing = crate::build_router(state.clone())
            .oneshot(post_request("/nexus/engine/post", None))
            .await
            .unwrap();
        assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

        let wrong = crate::build_router(state.clone())
            .oneshot(post_request("/nexus/engine/post", Some("guess")))
            .await
            .unwrap();
        assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);

        let ok = crate::build_router(state.clone())
            .oneshot(post_request("/nexus/engine/post", Some("secret")))
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);
        assert_eq!(state.repo.count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_manual_comment_cycle() {
        let state = app_state(None);
        let response = crate::build_router(state.clone())
            .oneshot(post_request("/nexus/engine/comment", None))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body: CommentCycleResponseJson = read_json(response).await;
        let post_id = body.post_id.unwrap();
        let post = state.repo.find_by_id(post_id).await.unwrap().unwrap();
        assert_eq!(post.last_comment().unwrap().id, body.comment.unwrap().id);
    }

    #[tokio::test]
    async fn test_start_then_stop() {
        let state = app_state(None);

        let response = crate::build_router(state.clone())
            .oneshot(post_request("/nexus/engine/start", None))
            .await
            .unwrap();
        let started: serde_json::Value = read_json(response).await;
        assert_eq!(started["changed"], true);
        assert_eq!(started["running"], true);
        // Four sample posts sit below the seed threshold.
        assert!(state.repo.count().await.unwrap() >= 8);

        let response = crate::build_router(state.clone())
            .oneshot(post_request("/nexus/engine/stop", None))
            .await
            .unwrap();
        let stopped: serde_json::Value = read_json(response).await;
        assert_eq!(stopped["changed"], true);
        assert_eq!(stopped["running"], false);
    }

    #[derive(serde::Deserialize)]
    struct CommentCycleResponseJson {
        post_id: Option<uuid::Uuid>,
        comment: Option<crate::models::CommentResponse>,
    }
}
