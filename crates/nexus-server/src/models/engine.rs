//! Engine - Scheduler status and control DTOs

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::post::{CommentResponse, PostResponse};

/// Scheduler status
#[derive(Debug, Serialize, ToSchema)]
pub struct EngineStatus {
    pub running: bool,
    pub posts: usize,
    /// `[min, max]` seconds between post ticks
    pub post_interval_secs: [u64; 2],
    pub comment_interval_secs: [u64; 2],
    pub fresh_comment_probability: f64,
    /// Absent when only templates are used
    pub remote: Option<RemoteStatus>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RemoteStatus {
    pub provider: String,
    pub model: String,
}

/// Result of a start or stop request
#[derive(Debug, Serialize, ToSchema)]
pub struct EngineActionResponse {
    /// False when the scheduler was already in the requested state
    pub changed: bool,
    pub running: bool,
}

/// Result of a manual post cycle
#[derive(Debug, Serialize, ToSchema)]
pub struct PostCycleResponse {
    pub post: Option<PostResponse>,
}

/// Result of a manual comment cycle
#[derive(Debug, Serialize, ToSchema)]
pub struct CommentCycleResponse {
    /// Absent when the store holds no posts
    pub post_id: Option<Uuid>,
    pub comment: Option<CommentResponse>,
    /// Author replied to, for replies
    pub reply_to: Option<String>,
}
