//! Stream Route - UI events over WebSocket
//!
//! Each connection gets its own broadcast receiver and receives every UI
//! event as a JSON text frame. A client that falls behind gets a `render`
//! in place of the events it missed.

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
    routing::get,
    Router,
};
use tokio::sync::broadcast::{error::RecvError, Receiver};

use crate::adapters::UiEvent;
use crate::AppState;

pub async fn stream(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    let events = state.ui.subscribe();
    ws.on_upgrade(move |socket| forward_events(socket, events))
}

async fn forward_events(mut socket: WebSocket, mut events: Receiver<UiEvent>) {
    tracing::debug!("Stream client connected");

    loop {
        tokio::select! {
            event = events.recv() => {
                let event = match event {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::debug!(skipped, "Stream client lagged");
                        UiEvent::Render
                    }
                    Err(RecvError::Closed) => break,
                };
                let text = match serde_json::to_string(&event) {
                    Ok(text) => text,
                    Err(e) => {
                        tracing::warn!(error = %e, "Failed to encode UI event");
                        continue;
                    }
                };
                if socket.send(Message::Text(text)).await.is_err() {
                    break;
                }
            }
            incoming = socket.recv() => match incoming {
                Some(Ok(Message::Close(_))) | Some(Err(_)) | None => break,
                // Clients have nothing to say; pings are answered by axum.
                Some(Ok(_)) => {}
            },
        }
    }

    tracing::debug!("Stream client disconnected");
}

pub fn router() -> Router<AppState> {
    Router::new().route("/nexus/stream", get(stream))
}
