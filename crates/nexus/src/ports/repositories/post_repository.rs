//! Post Repository Port
//!
//! Abstract interface for the forum's post store.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{errors::DomainError, Comment, NewComment, NewPost, Post};

/// Repository interface for posts and their comments.
///
/// Each method is atomic with respect to the whole collection, so interleaved
/// post and comment ticks never lose each other's writes.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Store a new post (fresh id, zero votes, no comments), newest first
    async fn add_post(&self, draft: NewPost) -> Result<Post, DomainError>;

    /// Append a comment to an existing post
    async fn add_comment(&self, post_id: Uuid, draft: NewComment) -> Result<Comment, DomainError>;

    /// All posts in store order
    async fn find_all(&self) -> Result<Vec<Post>, DomainError>;

    /// Replace the whole collection
    async fn save_all(&self, posts: Vec<Post>) -> Result<(), DomainError>;

    /// Find a post by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, DomainError>;

    /// Add `delta` to a post's vote count and return the updated post
    async fn add_votes(&self, post_id: Uuid, delta: i64) -> Result<Post, DomainError>;

    /// Number of stored posts
    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.find_all().await?.len())
    }
}
