//! Service Ports
//!
//! Abstract interfaces for external services.

mod forum_ui;
mod llm_provider;

pub use forum_ui::*;
pub use llm_provider::*;
