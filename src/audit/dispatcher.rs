//! Event Dispatcher
//!
//! Turns message events into cache operations and audit records.
//!
//! # Event handling
//! - `create`: snapshot is observed into the cache
//! - `delete`: cached snapshot becomes a `Delete` record, a miss becomes an
//!   `UnknownDelete` record built from the id alone
//! - `update`: cached snapshot is updated in place and an `Edit` record with
//!   the previous content is emitted; edits of uncached messages are ignored
//!
//! Every event runs inside its own failure boundary. A panic while handling
//! one event is logged and reported as [`AuditError::Internal`]; the next
//! event is handled normally. Cache guards never outlive a cache call, so
//! nothing is locked when the boundary catches a panic.

use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, error};

use super::record::AuditRecord;
use super::sink::AuditSink;
use super::snapshot::{creation_time, MessageSnapshot};
use crate::cache::{BoundedKeyCache, Observation};
use crate::error::{AuditError, Result};
use crate::models::{MessageEdit, MessageEvent, MessageRemoval};

/// The process-wide snapshot cache, keyed by message id.
pub type MessageCache = BoundedKeyCache<String, MessageSnapshot>;

/// Result of handling one event.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// Snapshot stored
    Cached {
        replaced: bool,
        evicted: Option<String>,
    },
    /// Audit record built and delivered
    Recorded { record: AuditRecord },
    /// Nothing to record
    Ignored,
}

/// Routes events to the cache and the audit sink.
#[derive(Clone)]
pub struct Dispatcher {
    cache: Arc<MessageCache>,
    sink: Arc<dyn AuditSink>,
}

impl Dispatcher {
    pub fn new(cache: Arc<MessageCache>, sink: Arc<dyn AuditSink>) -> Self {
        Self { cache, sink }
    }

    pub fn cache(&self) -> &Arc<MessageCache> {
        &self.cache
    }

    /// Handles one event inside a panic boundary.
    pub fn dispatch(&self, event: MessageEvent) -> Result<Outcome> {
        let kind = event.kind();
        let message_id = event.message_id().to_string();

        match catch_unwind(AssertUnwindSafe(|| self.handle(event))) {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic_message(panic.as_ref());
                error!(
                    kind,
                    message_id = %message_id,
                    reason = %reason,
                    "Recovered from panic in message {} handler", kind
                );
                Err(AuditError::Internal(format!(
                    "message {} handler panicked: {}",
                    kind, reason
                )))
            }
        }
    }

    fn handle(&self, event: MessageEvent) -> Result<Outcome> {
        match event {
            MessageEvent::Create(snapshot) => Ok(self.on_create(snapshot)),
            MessageEvent::Update(edit) => self.on_update(edit),
            MessageEvent::Delete(removal) => self.on_delete(removal),
        }
    }

    fn on_create(&self, snapshot: MessageSnapshot) -> Outcome {
        let observation = self.cache.observe(snapshot.id.clone(), snapshot);
        match observation {
            Observation::Inserted => Outcome::Cached {
                replaced: false,
                evicted: None,
            },
            Observation::Replaced => Outcome::Cached {
                replaced: true,
                evicted: None,
            },
            Observation::Evicted(old_id) => Outcome::Cached {
                replaced: false,
                evicted: Some(old_id),
            },
        }
    }

    fn on_delete(&self, removal: MessageRemoval) -> Result<Outcome> {
        let created_at = creation_time(&removal.id);

        let record = match self.cache.lookup(removal.id.as_str()) {
            Some(snapshot) => AuditRecord::Delete {
                message_id: removal.id,
                channel_id: removal.channel_id,
                author: snapshot.author,
                content: snapshot.content,
                created_at,
            },
            None => {
                debug!(
                    message_id = %removal.id,
                    created_at = ?created_at,
                    "Deleted message not found in cache"
                );
                AuditRecord::UnknownDelete {
                    message_id: removal.id,
                    channel_id: removal.channel_id,
                    created_at,
                }
            }
        };

        self.deliver(record)
    }

    fn on_update(&self, edit: MessageEdit) -> Result<Outcome> {
        // Embed unfurls arrive as updates without content
        let Some(after) = edit.content else {
            debug!(message_id = %edit.id, "Ignoring update without content");
            return Ok(Outcome::Ignored);
        };

        let new_content = after.clone();
        let edited_at = edit.edited_at;
        let previous = self.cache.update(edit.id.as_str(), move |snapshot| {
            snapshot.content = new_content;
            if edited_at.is_some() {
                snapshot.edited_at = edited_at;
            }
        });

        let Some(previous) = previous else {
            debug!(message_id = %edit.id, "Ignoring edit of uncached message");
            return Ok(Outcome::Ignored);
        };

        let record = AuditRecord::Edit {
            created_at: creation_time(&edit.id),
            message_id: edit.id,
            channel_id: edit.channel_id,
            author: edit.author.unwrap_or(previous.author),
            before: previous.content,
            after,
        };

        self.deliver(record)
    }

    fn deliver(&self, record: AuditRecord) -> Result<Outcome> {
        if let Err(err) = self.sink.emit(&record) {
            error!(
                message_id = %record.message_id(),
                error = %err,
                "Error writing audit record"
            );
            return Err(AuditError::Delivery(err.to_string()));
        }
        Ok(Outcome::Recorded { record })
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
