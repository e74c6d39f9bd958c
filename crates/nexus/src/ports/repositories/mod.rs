//! Repository Ports
//!
//! Abstract interfaces for data persistence operations.

mod post_repository;

pub use post_repository::*;
