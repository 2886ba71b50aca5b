//! Public web layer.
//!
//! Server-rendered pages (Askama templates) and the redirect endpoint.
//!
//! # Modules
//!
//! - [`handlers`] - Form, submission and resolution handlers
//! - [`middleware`] - Request tracing and visitor logging

pub mod handlers;
pub mod middleware;
