//! Infrastructure Adapters
//!
//! Implementations of domain ports for external systems.

pub mod broadcast_ui;
pub mod memory_store;
pub mod openai;

// Re-exports
pub use broadcast_ui::{BroadcastUi, UiEvent};
pub use memory_store::MemoryPostRepository;
pub use openai::OpenAiProvider;
