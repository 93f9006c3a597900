//! Background Tasks Module
//!
//! Contains background tasks that run periodically during service operation.
//!
//! # Tasks
//! - Stats reporter: logs snapshot cache statistics at configured intervals

mod reporter;

pub use reporter::spawn_stats_reporter;
