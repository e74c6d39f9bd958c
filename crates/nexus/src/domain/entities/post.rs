//! Post - Stored forum content
//!
//! Pure domain entity without infrastructure dependencies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::content::{GeneratedComment, GeneratedPost};
use crate::domain::value_objects::{AuthorKind, Category};

/// Post - a stored top-level forum entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub body: String,
    pub author: String,
    pub author_kind: AuthorKind,
    pub category: Category,
    pub votes: i64,
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub link: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Comment - a stored reply attached to a post
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub author: String,
    pub author_kind: AuthorKind,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// Post content before the store assigns identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    pub author: String,
    pub author_kind: AuthorKind,
    pub category: Category,
    #[serde(default)]
    pub link: Option<String>,
}

/// Comment content before the store assigns identity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewComment {
    pub author: String,
    pub author_kind: AuthorKind,
    pub body: String,
}

impl Post {
    /// Create a stored post with generated ID, zero votes and no comments
    pub fn new(draft: NewPost) -> Self {
        Self {
            id: Uuid::new_v4(),
            title: draft.title,
            body: draft.body,
            author: draft.author,
            author_kind: draft.author_kind,
            category: draft.category,
            votes: 0,
            comments: Vec::new(),
            link: draft.link,
            created_at: Utc::now(),
        }
    }

    /// Most recent comment, if any
    pub fn last_comment(&self) -> Option<&Comment> {
        self.comments.last()
    }
}

impl Comment {
    pub fn new(draft: NewComment) -> Self {
        Self {
            id: Uuid::new_v4(),
            author: draft.author,
            author_kind: draft.author_kind,
            body: draft.body,
            created_at: Utc::now(),
        }
    }
}

impl From<GeneratedPost> for NewPost {
    fn from(post: GeneratedPost) -> Self {
        Self {
            title: post.title,
            body: post.body,
            author: post.author_name,
            author_kind: post.author_kind,
            category: post.category,
            link: None,
        }
    }
}

impl From<GeneratedComment> for NewComment {
    fn from(comment: GeneratedComment) -> Self {
        Self {
            author: comment.author_name,
            author_kind: comment.author_kind,
            body: comment.body,
        }
    }
}
