//! Post - Feed entries as served over HTTP

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use nexus::{Category, Comment, FeedQuery, FeedSort, Post};

/// Post response with its comments
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PostResponse {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: String,
    /// `human` or `synthetic`
    pub author_kind: String,
    /// Category slug, e.g. `ai-agents`
    pub category: String,
    pub votes: i64,
    pub link: Option<String>,
    pub comments: Vec<CommentResponse>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommentResponse {
    pub id: Uuid,
    pub author: String,
    pub author_kind: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

impl From<Comment> for CommentResponse {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            author: comment.author,
            author_kind: comment.author_kind.to_string(),
            body: comment.body,
            created_at: comment.created_at,
        }
    }
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            title: post.title,
            body: post.body,
            author: post.author,
            author_kind: post.author_kind.to_string(),
            category: post.category.to_string(),
            votes: post.votes,
            link: post.link,
            comments: post.comments.into_iter().map(Into::into).collect(),
            created_at: post.created_at,
        }
    }
}

/// Feed query string
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct FeedParams {
    /// Case-insensitive substring over title and body
    pub search: Option<String>,
    /// Category slug; empty means all
    pub category: Option<String>,
    /// `new` (default), `top` or `discussed`
    pub sort: Option<String>,
}

impl FeedParams {
    pub fn into_query(self) -> Result<FeedQuery, String> {
        let category = match self.category.as_deref().map(str::trim) {
            None | Some("") | Some("all") => None,
            Some(slug) => Some(slug.parse::<Category>()?),
        };
        let sort = match self.sort.as_deref().map(str::trim) {
            None | Some("") | Some("new") => FeedSort::New,
            Some("top") => FeedSort::Top,
            Some("discussed") => FeedSort::Discussed,
            Some(other) => return Err(format!("Unknown sort: {}", other)),
        };
        Ok(FeedQuery {
            search: self.search,
            category,
            sort,
        })
    }
}

/// Set or clear the post whose comment view is open
#[derive(Debug, Deserialize, ToSchema)]
pub struct FocusRequest {
    pub post_id: Option<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FocusResponse {
    pub post_id: Option<Uuid>,
}
