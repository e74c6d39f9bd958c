//! Test doubles for the engine's ports

use async_trait::async_trait;
use axum::response::Response;
use serde::de::DeserializeOwned;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;
use uuid::Uuid;

use nexus::{
    ChatMessage, CompletionOptions, CompletionResponse, DomainError, ForumUi, LlmProvider,
    PersonaRegistry, Post, ToastKind, TokenUsage,
};

use crate::adapters::memory_store::sample_posts;
use crate::adapters::{BroadcastUi, MemoryPostRepository};
use crate::application::{ContentGenerator, SharedRng};
use crate::services::{ContentScheduler, SchedulerConfig};
use crate::AppState;

type Call = (Vec<ChatMessage>, CompletionOptions);

/// Provider that answers every call with the same text, or fails every call
pub struct ScriptedProvider {
    reply: Option<String>,
    calls: Mutex<Vec<Call>>,
}

impl ScriptedProvider {
    pub fn always(text: &str) -> Self {
        Self {
            reply: Some(text.to_string()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            reply: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    async fn complete(
        &self,
        messages: &[ChatMessage],
        options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.calls
            .lock()
            .unwrap()
            .push((messages.to_vec(), options.clone()));

        match &self.reply {
            Some(text) => Ok(CompletionResponse {
                content: text.clone(),
                model: "scripted".to_string(),
                usage: TokenUsage::default(),
                finish_reason: Some("stop".to_string()),
            }),
            None => Err(DomainError::ExternalService(
                "connection refused".to_string(),
            )),
        }
    }

    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_id(&self) -> &str {
        "scripted"
    }
}

/// Provider that holds every call until the test releases it
pub struct GatedProvider {
    reply: String,
    gate: Notify,
    entered: AtomicUsize,
}

impl GatedProvider {
    pub fn new(text: &str) -> Self {
        Self {
            reply: text.to_string(),
            gate: Notify::new(),
            entered: AtomicUsize::new(0),
        }
    }

    /// Calls that have reached the provider, released or not
    pub fn entered(&self) -> usize {
        self.entered.load(Ordering::SeqCst)
    }

    /// Let one held (or the next) call through
    pub fn release(&self) {
        self.gate.notify_one();
    }

    /// Yield until `n` calls have reached the provider
    pub async fn wait_for_calls(&self, n: usize) {
        for _ in 0..1000 {
            if self.entered() >= n {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("provider saw {} calls, expected {}", self.entered(), n);
    }
}

#[async_trait]
impl LlmProvider for GatedProvider {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
        _options: &CompletionOptions,
    ) -> Result<CompletionResponse, DomainError> {
        self.entered.fetch_add(1, Ordering::SeqCst);
        self.gate.notified().await;
        Ok(CompletionResponse {
            content: self.reply.clone(),
            model: "gated".to_string(),
            usage: TokenUsage::default(),
            finish_reason: Some("stop".to_string()),
        })
    }

    fn provider_name(&self) -> &str {
        "gated"
    }

    fn model_id(&self) -> &str {
        "gated"
    }
}

/// UI signal recorded by `RecordingUi`
#[derive(Debug, Clone, PartialEq)]
pub enum UiCall {
    Render,
    RenderTrending,
    RenderComments(Uuid),
    Toast(String, ToastKind),
}

/// UI that records every signal
#[derive(Default)]
pub struct RecordingUi {
    calls: Mutex<Vec<UiCall>>,
    focused: Mutex<Option<Uuid>>,
}

impl RecordingUi {
    pub fn focus(&self, post_id: Option<Uuid>) {
        *self.focused.lock().unwrap() = post_id;
    }

    pub fn calls(&self) -> Vec<UiCall> {
        self.calls.lock().unwrap().clone()
    }

    fn push(&self, call: UiCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl ForumUi for RecordingUi {
    async fn render(&self) {
        self.push(UiCall::Render);
    }

    async fn render_trending(&self) {
        self.push(UiCall::RenderTrending);
    }

    async fn render_comments(&self, post: &Post) {
        self.push(UiCall::RenderComments(post.id));
    }

    async fn show_toast(&self, message: &str, kind: ToastKind) {
        self.push(UiCall::Toast(message.to_string(), kind));
    }

    async fn focused_post(&self) -> Option<Uuid> {
        *self.focused.lock().unwrap()
    }
}

/// Server state over the sample posts, templates only, scheduler stopped
pub fn app_state(admin_key: Option<&str>) -> AppState {
    let repo = Arc::new(MemoryPostRepository::with_posts(sample_posts()));
    let ui = Arc::new(BroadcastUi::default());
    let rng = Arc::new(SharedRng::new(Some(7)));
    let generator = ContentGenerator::new(PersonaRegistry::standard(), None, rng.clone()).unwrap();
    let scheduler = ContentScheduler::new(
        repo.clone(),
        ui.clone(),
        generator,
        rng,
        SchedulerConfig::default(),
    )
    .unwrap();

    AppState {
        repo,
        ui,
        scheduler: Arc::new(scheduler),
        admin_key: admin_key.map(Arc::from),
    }
}

pub async fn read_json<T: DeserializeOwned>(response: Response) -> T {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
