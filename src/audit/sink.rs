//! Audit Sinks
//!
//! Destinations for audit records. The binary logs records through
//! `tracing`; tests and embedders can collect them in memory.

use chrono::{DateTime, SecondsFormat, Utc};
use parking_lot::Mutex;
use thiserror::Error;
use tracing::info;

use super::record::AuditRecord;

/// Failure reported by a sink while delivering a record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Receives audit records produced by the dispatcher.
///
/// Implementations must not call back into the message cache.
pub trait AuditSink: Send + Sync {
    fn emit(&self, record: &AuditRecord) -> Result<(), SinkError>;
}

// == Tracing Sink ==
/// Writes every record as a structured event on the `audit` target.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl AuditSink for TracingSink {
    fn emit(&self, record: &AuditRecord) -> Result<(), SinkError> {
        match record {
            AuditRecord::UnknownDelete {
                message_id,
                channel_id,
                created_at,
            } => {
                info!(
                    target: "audit",
                    message_id = %message_id,
                    channel_id = %channel_id,
                    created_at = %format_time(created_at),
                    "Unknown user deleted message (not in cache)"
                );
            }
            AuditRecord::Delete {
                message_id,
                channel_id,
                author,
                content,
                created_at,
            } => {
                info!(
                    target: "audit",
                    message_id = %message_id,
                    channel_id = %channel_id,
                    author = %author.tag(),
                    avatar = %author.avatar_url(128),
                    created_at = %format_time(created_at),
                    content = %content,
                    "{}", record.heading()
                );
            }
            AuditRecord::Edit {
                message_id,
                channel_id,
                author,
                before,
                after,
                created_at,
            } => {
                info!(
                    target: "audit",
                    message_id = %message_id,
                    channel_id = %channel_id,
                    author = %author.tag(),
                    created_at = %format_time(created_at),
                    before = %before,
                    now = %after,
                    "{}", record.heading()
                );
            }
        }
        Ok(())
    }
}

fn format_time(time: &Option<DateTime<Utc>>) -> String {
    time.map(|t| t.to_rfc3339_opts(SecondsFormat::Millis, true))
        .unwrap_or_else(|| "unknown".to_string())
}

// == Memory Sink ==
/// Keeps every emitted record in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    records: Mutex<Vec<AuditRecord>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the records emitted so far, oldest first.
    pub fn records(&self) -> Vec<AuditRecord> {
        self.records.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.records.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.lock().is_empty()
    }
}

impl AuditSink for MemorySink {
    fn emit(&self, record: &AuditRecord) -> Result<(), SinkError> {
        self.records.lock().push(record.clone());
        Ok(())
    }
}
