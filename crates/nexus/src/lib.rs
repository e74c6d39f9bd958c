//! Nexus Domain Library
//!
//! Core domain types and interfaces for the Nexus forum content engine: the
//! machinery that keeps a token-gated community forum looking alive by having
//! synthetic personas write posts, comments and replies to each other.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain/`): Pure business entities and logic
//!   - `entities/`: Core domain models (Persona, Pattern, Post, generated content)
//!   - `value_objects/`: Immutable value types (Tier, Category, AuthorKind, Tone)
//!   - `services/`: Template corpus, substitution, persona registry, reply policy
//!   - `errors/`: Domain-specific error types
//!
//! - **Ports** (`ports/`): Abstract interfaces (traits)
//!   - `repositories/`: Post store interface
//!   - `services/`: Remote text generation and forum UI interfaces
//!
//! # Usage
//!
//! ```rust,ignore
//! use nexus::domain::{Corpus, PersonaRegistry, Substitution};
//! use nexus::ports::{ForumUi, LlmProvider, PostRepository};
//! ```

pub mod domain;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    AuthorKind, Category, Comment, Corpus, DomainError, Engagement, FeedQuery, FeedSort,
    GeneratedComment, GeneratedPost, IntRange, NewComment, NewPost, Pattern, Persona,
    PersonaRegistry, Post, PostTemplate, ReplyPolicy, Substitution, Tier, ToastKind, Tone,
    Vocabulary,
};
pub use ports::{
    ChatMessage, CompletionOptions, CompletionResponse, ForumUi, LlmProvider, MessageRole,
    PostRepository, TokenUsage,
};
