//! Message Audit - deleted and edited message logger
//!
//! Keeps the last known snapshot of recent messages in a fixed-capacity
//! FIFO cache so that delete and edit events can be reported with the
//! content that was removed or changed.

pub mod api;
pub mod audit;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use audit::{Dispatcher, MessageCache};
pub use cache::BoundedKeyCache;
pub use config::Config;
pub use tasks::spawn_stats_reporter;
