//! Ports (Interfaces)
//!
//! Abstract interfaces that define how the content engine
//! interacts with external systems (the post store, the forum UI, and a
//! remote text-generation service).
//!
//! Implementations of these traits live in the infrastructure layer.

pub mod repositories;
pub mod services;

// Re-exports
pub use repositories::*;
pub use services::*;
