//! Nexus API Models
//!
//! - Post: feed entries and their comments
//! - Persona: the synthetic cast
//! - Engine: scheduler status and control

mod engine;
mod persona;
mod post;

pub use engine::*;
pub use persona::*;
pub use post::*;
