//! Per-request visitor logging.

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};
use std::{net::SocketAddr, time::Instant};

use crate::state::AppState;
use crate::utils::client_ip::{client_ip, user_agent};

/// Logs every visitor with client address and user agent.
///
/// The address honours `BEHIND_PROXY` the same way the shorten handler does,
/// so logged and stored addresses agree.
///
/// ```text
/// INFO New visitor ip=203.0.113.7 user_agent="curl/8.5.0" method=GET path=/aB3dE status=302 ms=3
/// ```
pub async fn layer(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    req: Request,
    next: Next,
) -> Response {
    let start = Instant::now();

    let ip = client_ip(req.headers(), peer, state.behind_proxy);
    let ua = user_agent(req.headers());
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;

    tracing::info!(
        ip = %ip,
        user_agent = %ua,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        ms = start.elapsed().as_millis() as u64,
        "New visitor"
    );

    response
}
