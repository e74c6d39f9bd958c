//! Application Layer (Use Cases)
//!
//! Orchestrates domain services and coordinates between
//! the post store, the remote provider and the shared random source.

mod content_generator;
mod remote_writer;
mod shared_rng;

pub use content_generator::ContentGenerator;
pub use remote_writer::{RemoteBudgets, RemoteWriter};
pub use shared_rng::SharedRng;
