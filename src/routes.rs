//! Top-level router configuration.
//!
//! # Route Structure
//!
//! Every path, `/` included, goes through the same dispatch:
//!
//! - `POST` - Shorten the submitted `url`
//! - any other method - Redirect when the path minus its leading `/` is
//!   5 characters long, submission form otherwise
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response spans
//! - **Visitor log** - Client address and user agent of every request

use crate::state::AppState;
use crate::web::handlers::{resolve_handler, shorten_handler};
use crate::web::middleware::{tracing, visitor_log};
use axum::routing::post;
use axum::{Router, middleware};

/// Constructs the application router with all routes and middleware.
///
/// Handlers and the visitor log read the peer address, so the router must be
/// served with `into_make_service_with_connect_info::<SocketAddr>()`.
pub fn app_router(state: AppState) -> Router {
    let dispatch = post(shorten_handler).fallback(resolve_handler);

    Router::new()
        .route("/", dispatch.clone())
        .route("/{*path}", dispatch)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            visitor_log::layer,
        ))
        .with_state(state)
        .layer(tracing::layer())
}
