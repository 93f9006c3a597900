//! API Module
//!
//! HTTP surface of the audit service. The upstream gateway bridge posts
//! message events here; operators inspect the cache through the read
//! endpoints.
//!
//! # Endpoints
//! - `POST /events` - Deliver a message event
//! - `GET /messages/:id` - Inspect a cached snapshot
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
