//! HTTP middleware for request observability.

pub mod tracing;
pub mod visitor_log;
