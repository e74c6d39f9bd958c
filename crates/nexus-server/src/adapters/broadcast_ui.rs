//! Broadcast UI
//!
//! Forum UI collaborator for headless operation: every UI signal becomes a
//! `UiEvent` on a broadcast channel, which the WebSocket stream forwards to
//! connected clients. Clients re-fetch over HTTP when they see an event.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;
use tokio::sync::broadcast;
use uuid::Uuid;

use nexus::{ForumUi, Post, ToastKind};

/// UI signal as sent over the stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum UiEvent {
    Render,
    RenderTrending,
    RenderComments { post_id: Uuid, comments: usize },
    Toast { message: String, kind: ToastKind },
}

pub struct BroadcastUi {
    sender: broadcast::Sender<UiEvent>,
    focused: RwLock<Option<Uuid>>,
}

impl BroadcastUi {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self {
            sender,
            focused: RwLock::new(None),
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<UiEvent> {
        self.sender.subscribe()
    }

    /// Set or clear the post whose comment view is open
    pub fn set_focus(&self, post_id: Option<Uuid>) {
        *self.focused.write().unwrap_or_else(|e| e.into_inner()) = post_id;
    }

    fn emit(&self, event: UiEvent) {
        // No subscribers is normal: nobody is watching.
        if self.sender.send(event).is_err() {
            tracing::trace!("UI event dropped, no subscribers");
        }
    }
}

impl Default for BroadcastUi {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl ForumUi for BroadcastUi {
    async fn render(&self) {
        self.emit(UiEvent::Render);
    }

    async fn render_trending(&self) {
        self.emit(UiEvent::RenderTrending);
    }

    async fn render_comments(&self, post: &Post) {
        self.emit(UiEvent::RenderComments {
            post_id: post.id,
            comments: post.comments.len(),
        });
    }

    async fn show_toast(&self, message: &str, kind: ToastKind) {
        self.emit(UiEvent::Toast {
            message: message.to_string(),
            kind,
        });
    }

    async fn focused_post(&self) -> Option<Uuid> {
        *self.focused.read().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_events_reach_subscribers() {
        let ui = BroadcastUi::new(8);
        let mut rx = ui.subscribe();

        ui.render().await;
        ui.show_toast("Nova published a new post", ToastKind::Info)
            .await;

        assert_eq!(rx.recv().await.unwrap(), UiEvent::Render);
        assert_eq!(
            rx.recv().await.unwrap(),
            UiEvent::Toast {
                message: "Nova published a new post".to_string(),
                kind: ToastKind::Info,
            }
        );
    }

    #[tokio::test]
    async fn test_focus_round_trip() {
        let ui = BroadcastUi::default();
        assert_eq!(ui.focused_post().await, None);
        let id = Uuid::new_v4();
        ui.set_focus(Some(id));
        assert_eq!(ui.focused_post().await, Some(id));
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(UiEvent::Toast {
            message: "hi".to_string(),
            kind: ToastKind::Success,
        })
        .unwrap();
        assert_eq!(json["type"], "toast");
        assert_eq!(json["kind"], "success");

        let json = serde_json::to_value(UiEvent::RenderTrending).unwrap();
        assert_eq!(json["type"], "render_trending");
    }

    #[tokio::test]
    async fn test_emit_without_subscribers_is_silent() {
        let ui = BroadcastUi::new(1);
        ui.render_trending().await;
    }
}
