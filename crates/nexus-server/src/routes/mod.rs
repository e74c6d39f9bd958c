//! Nexus API Routes
//!
//! - /nexus/posts - Feed with search, category filter and sort
//! - /nexus/trending - Highest-voted posts
//! - /nexus/personas - The synthetic cast
//! - /nexus/focus - Post whose comment view is open
//! - /nexus/engine - Scheduler status and control
//! - /nexus/stream - UI events over WebSocket

pub mod engine;
pub mod posts;
pub mod stream;
pub mod swagger;
