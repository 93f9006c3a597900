//! API Handlers
//!
//! HTTP request handlers for each audit service endpoint.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use crate::audit::{AuditSink, Dispatcher, MessageCache, Outcome};
use crate::error::{AuditError, Result};
use crate::models::{HealthResponse, LookupResponse, MessageEvent, StatsResponse};

/// Application state shared across all handlers.
///
/// The dispatcher owns the one snapshot cache of the process; handlers reach
/// it through the dispatcher rather than any global.
#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
}

impl AppState {
    /// Creates a new AppState around an existing cache and sink.
    pub fn new(cache: Arc<MessageCache>, sink: Arc<dyn AuditSink>) -> Self {
        Self {
            dispatcher: Dispatcher::new(cache, sink),
        }
    }

    pub fn cache(&self) -> &Arc<MessageCache> {
        self.dispatcher.cache()
    }
}

/// Handler for POST /events
///
/// Feeds one message event through the dispatcher. Each request runs on its
/// own task, so concurrent deliveries exercise the cache concurrently.
/// Bodies that are not a well-formed event are rejected with 400.
pub async fn event_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<MessageEvent>, JsonRejection>,
) -> Result<Json<Outcome>> {
    let Json(event) =
        payload.map_err(|rejection| AuditError::InvalidRequest(rejection.body_text()))?;

    if let Some(error_msg) = event.validate() {
        return Err(AuditError::InvalidRequest(error_msg));
    }

    let outcome = state.dispatcher.dispatch(event)?;
    Ok(Json(outcome))
}

/// Handler for GET /messages/:id
///
/// Returns the cached snapshot without affecting eviction order.
pub async fn lookup_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<LookupResponse>> {
    let snapshot = state
        .cache()
        .lookup(id.as_str())
        .ok_or_else(|| AuditError::NotFound(id.clone()))?;

    Ok(Json(LookupResponse::new(id, snapshot)))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache();
    Json(StatsResponse::new(cache.capacity(), cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{Author, MemorySink, MessageSnapshot};
    use crate::models::MessageRemoval;
    use chrono::Utc;

    fn state(capacity: usize) -> (AppState, Arc<MemorySink>) {
        let sink = Arc::new(MemorySink::new());
        let cache = Arc::new(MessageCache::new(capacity).unwrap());
        (AppState::new(cache, sink.clone()), sink)
    }

    fn create(id: &str) -> MessageEvent {
        MessageEvent::Create(MessageSnapshot {
            id: id.to_string(),
            channel_id: "9".to_string(),
            guild_id: Some("8".to_string()),
            author: Author {
                id: "7".to_string(),
                username: "tester".to_string(),
                discriminator: "0".to_string(),
                avatar: None,
            },
            content: format!("content of {}", id),
            timestamp: Utc::now(),
            edited_at: None,
            raw: serde_json::Value::Null,
        })
    }

    #[tokio::test]
    async fn test_event_and_lookup_handlers() {
        let (state, _sink) = state(10);

        let result = event_handler(State(state.clone()), Ok(Json(create("11")))).await;
        assert!(result.is_ok());

        let response = lookup_handler(State(state), Path("11".to_string())).await.unwrap();
        assert_eq!(response.snapshot.content, "content of 11");
    }

    #[tokio::test]
    async fn test_lookup_missing_is_not_found() {
        let (state, _sink) = state(10);

        let result = lookup_handler(State(state), Path("404".to_string())).await;
        assert!(matches!(result, Err(AuditError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_event_handler_rejects_invalid_ids() {
        let (state, sink) = state(10);
        let event = MessageEvent::Delete(MessageRemoval {
            id: "not-a-snowflake".to_string(),
            channel_id: "9".to_string(),
        });

        let result = event_handler(State(state), Ok(Json(event))).await;
        assert!(matches!(result, Err(AuditError::InvalidRequest(_))));
        assert!(sink.is_empty());
    }

    #[tokio::test]
    async fn test_stats_handler() {
        let (state, _sink) = state(3);
        event_handler(State(state.clone()), Ok(Json(create("1")))).await.unwrap();
        let _ = lookup_handler(State(state.clone()), Path("1".to_string())).await;
        let _ = lookup_handler(State(state.clone()), Path("2".to_string())).await;

        let response = stats_handler(State(state)).await;
        assert_eq!(response.capacity, 3);
        assert_eq!(response.stats.hits, 1);
        assert_eq!(response.stats.misses, 1);
        assert_eq!(response.stats.total_entries, 1);
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
