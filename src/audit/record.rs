//! Audit Records
//!
//! Structured records produced for delete and edit events.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::snapshot::Author;

/// One audit entry handed to an [`AuditSink`](super::AuditSink).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AuditRecord {
    /// A message was deleted before it was ever cached, or after eviction.
    /// Only what the id itself reveals is known.
    UnknownDelete {
        message_id: String,
        channel_id: String,
        created_at: Option<DateTime<Utc>>,
    },
    /// A cached message was deleted
    Delete {
        message_id: String,
        channel_id: String,
        author: Author,
        content: String,
        created_at: Option<DateTime<Utc>>,
    },
    /// A cached message was edited
    Edit {
        message_id: String,
        channel_id: String,
        author: Author,
        before: String,
        after: String,
        created_at: Option<DateTime<Utc>>,
    },
}

impl AuditRecord {
    pub fn message_id(&self) -> &str {
        match self {
            AuditRecord::UnknownDelete { message_id, .. }
            | AuditRecord::Delete { message_id, .. }
            | AuditRecord::Edit { message_id, .. } => message_id,
        }
    }

    pub fn heading(&self) -> &'static str {
        match self {
            AuditRecord::UnknownDelete { .. } => "Unknown Message Delete",
            AuditRecord::Delete { .. } => "Message Delete",
            AuditRecord::Edit { .. } => "Message Edit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_serializes_with_kind_tag() {
        let record = AuditRecord::UnknownDelete {
            message_id: "10".to_string(),
            channel_id: "20".to_string(),
            created_at: None,
        };
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["kind"], "unknown_delete");
        assert_eq!(json["message_id"], "10");
        assert!(json["created_at"].is_null());
    }

    #[test]
    fn test_record_accessors() {
        let record = AuditRecord::Edit {
            message_id: "10".to_string(),
            channel_id: "20".to_string(),
            author: Author {
                id: "30".to_string(),
                username: "someone".to_string(),
                discriminator: "0".to_string(),
                avatar: None,
            },
            before: "hi".to_string(),
            after: "hello".to_string(),
            created_at: None,
        };

        assert_eq!(record.message_id(), "10");
        assert_eq!(record.heading(), "Message Edit");
    }
}
