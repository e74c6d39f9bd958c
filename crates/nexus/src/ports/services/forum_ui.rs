//! Forum UI Port
//!
//! What the engine needs from whatever displays the forum.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Post, ToastKind};

/// UI collaborator notified after every store write.
///
/// Notifications are fire-and-forget; a UI that cannot deliver them drops
/// them rather than failing the generation cycle.
#[async_trait]
pub trait ForumUi: Send + Sync {
    /// Full refresh
    async fn render(&self);

    /// Refresh the trending sidebar
    async fn render_trending(&self);

    /// Refresh the comment view of `post`
    async fn render_comments(&self, post: &Post);

    /// Short-lived notification
    async fn show_toast(&self, message: &str, kind: ToastKind);

    /// Post whose comment view is open, if any
    async fn focused_post(&self) -> Option<Uuid>;
}
