//! HTTP/REST API layer.
//!
//! Axum router serving the execution, ingestion and explanation routes at the
//! root and again under `/api`, with CORS for the browser frontend.

pub mod error;
pub mod handlers;
pub mod router;
