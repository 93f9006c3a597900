//! Inbound event payloads
//!
//! Message events delivered to `POST /events`, tagged by `"type"`.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::audit::{Author, MessageSnapshot};

/// A message lifecycle event from the upstream gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MessageEvent {
    /// A new message was seen
    Create(MessageSnapshot),
    /// A message was edited
    Update(MessageEdit),
    /// A message was deleted
    Delete(MessageRemoval),
}

/// Body of an `update` event.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageEdit {
    pub id: String,
    pub channel_id: String,
    /// New content; absent for updates that only touch embeds
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub author: Option<Author>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
}

/// Body of a `delete` event.
#[derive(Debug, Clone, Deserialize)]
pub struct MessageRemoval {
    pub id: String,
    pub channel_id: String,
}

impl MessageEvent {
    /// Short event name used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            MessageEvent::Create(_) => "create",
            MessageEvent::Update(_) => "update",
            MessageEvent::Delete(_) => "delete",
        }
    }

    pub fn message_id(&self) -> &str {
        match self {
            MessageEvent::Create(snapshot) => &snapshot.id,
            MessageEvent::Update(edit) => &edit.id,
            MessageEvent::Delete(removal) => &removal.id,
        }
    }

    /// Validates the event ids.
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let channel_id = match self {
            MessageEvent::Create(snapshot) => &snapshot.channel_id,
            MessageEvent::Update(edit) => &edit.channel_id,
            MessageEvent::Delete(removal) => &removal.channel_id,
        };

        if let Some(error) = check_snowflake("message id", self.message_id()) {
            return Some(error);
        }
        check_snowflake("channel id", channel_id)
    }
}

fn check_snowflake(field: &str, value: &str) -> Option<String> {
    if value.is_empty() {
        return Some(format!("{} cannot be empty", field));
    }
    if value.parse::<u64>().is_err() {
        return Some(format!("{} must be a numeric snowflake, got {:?}", field, value));
    }
    None
}
