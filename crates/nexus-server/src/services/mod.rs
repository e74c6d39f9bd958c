//! Background Services

pub mod scheduler;

pub use scheduler::{CommentOutcome, ContentScheduler, SchedulerConfig, Window};
