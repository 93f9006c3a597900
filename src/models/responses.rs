//! Response DTOs for the audit service API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

use crate::audit::MessageSnapshot;
use crate::cache::CacheStats;

/// Response body for GET /messages/:id
#[derive(Debug, Clone, Serialize)]
pub struct LookupResponse {
    pub message_id: String,
    pub snapshot: MessageSnapshot,
}

impl LookupResponse {
    pub fn new(message_id: impl Into<String>, snapshot: MessageSnapshot) -> Self {
        Self {
            message_id: message_id.into(),
            snapshot,
        }
    }
}

/// Response body for the stats endpoint (GET /stats)
#[derive(Debug, Clone, Serialize)]
pub struct StatsResponse {
    /// Maximum number of cached snapshots
    pub capacity: usize,
    #[serde(flatten)]
    pub stats: CacheStats,
    /// Lookup hit rate (hits / (hits + misses))
    pub hit_rate: f64,
}

impl StatsResponse {
    /// Creates a new StatsResponse from cache statistics
    pub fn new(capacity: usize, stats: CacheStats) -> Self {
        Self {
            capacity,
            hit_rate: stats.hit_rate(),
            stats,
        }
    }
}

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// Error response body for all error conditions
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    /// Error message describing what went wrong
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_response_flattens_counters() {
        let mut stats = CacheStats::new();
        stats.record_hit();
        stats.record_hit();
        stats.record_hit();
        stats.record_miss();
        stats.record_eviction();
        stats.set_total_entries(10);

        let json = serde_json::to_value(StatsResponse::new(10, stats)).unwrap();
        assert_eq!(json["capacity"], 10);
        assert_eq!(json["hits"], 3);
        assert_eq!(json["evictions"], 1);
        assert_eq!(json["total_entries"], 10);
        assert!((json["hit_rate"].as_f64().unwrap() - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_health_response_serialize() {
        let resp = HealthResponse::healthy();
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("healthy"));
        assert!(json.contains("timestamp"));
    }

    #[test]
    fn test_error_response_serialize() {
        let resp = ErrorResponse::new("Something went wrong");
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("Something went wrong"));
    }
}
