//! Message Snapshot Module
//!
//! The value stored in the cache: the content and metadata of a message as
//! it was last observed.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Milliseconds between the Unix epoch and the first second of 2015,
/// the epoch message snowflakes count from.
pub const SNOWFLAKE_EPOCH_MS: i64 = 1_420_070_400_000;

const CDN_BASE: &str = "https://cdn.discordapp.com";

// == Author ==
/// Author metadata captured with a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: String,
    pub username: String,
    /// Legacy four digit discriminator, "0" for migrated accounts
    #[serde(default)]
    pub discriminator: String,
    /// Avatar hash, absent when the user has the default avatar
    #[serde(default)]
    pub avatar: Option<String>,
}

impl Author {
    /// `username#discriminator(id)` as shown in audit headings.
    pub fn tag(&self) -> String {
        format!("{}#{}({})", self.username, self.discriminator, self.id)
    }

    /// Avatar image URL at the requested pixel size.
    pub fn avatar_url(&self, size: u16) -> String {
        match &self.avatar {
            Some(hash) => {
                let ext = if hash.starts_with("a_") { "gif" } else { "png" };
                format!("{}/avatars/{}/{}.{}?size={}", CDN_BASE, self.id, hash, ext, size)
            }
            None => {
                let index = self.discriminator.parse::<u16>().unwrap_or(0) % 5;
                format!("{}/embed/avatars/{}.png", CDN_BASE, index)
            }
        }
    }
}

// == Message Snapshot ==
/// Last observed state of one message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    pub id: String,
    pub channel_id: String,
    #[serde(default)]
    pub guild_id: Option<String>,
    pub author: Author,
    #[serde(default)]
    pub content: String,
    /// When the platform says the message was sent
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub edited_at: Option<DateTime<Utc>>,
    /// Untouched upstream payload, kept for consumers that need more fields
    #[serde(default)]
    pub raw: serde_json::Value,
}

// == Snowflake Timestamps ==
/// Decodes the creation time embedded in a snowflake id.
///
/// The upper 42 bits of the id are milliseconds since [`SNOWFLAKE_EPOCH_MS`].
/// Returns `None` for ids that are not unsigned 64-bit integers.
pub fn creation_time(id: &str) -> Option<DateTime<Utc>> {
    let snowflake: u64 = id.parse().ok()?;
    let millis = (snowflake >> 22) as i64 + SNOWFLAKE_EPOCH_MS;
    Utc.timestamp_millis_opt(millis).single()
}
