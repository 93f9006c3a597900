//! Audit Module
//!
//! Consumer side of the snapshot cache: message events come in, audit
//! records for deletes and edits go out to a sink.

mod dispatcher;
mod record;
mod sink;
mod snapshot;

pub use dispatcher::{Dispatcher, MessageCache, Outcome};
pub use record::AuditRecord;
pub use sink::{AuditSink, MemorySink, SinkError, TracingSink};
pub use snapshot::{creation_time, Author, MessageSnapshot, SNOWFLAKE_EPOCH_MS};
