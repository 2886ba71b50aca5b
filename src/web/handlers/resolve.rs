//! Handler for short URL resolution.

use axum::{
    extract::State,
    http::Uri,
    response::{IntoResponse, Response},
};
use tracing::{error, info};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::is_code_shaped;
use crate::utils::redirect;
use crate::web::handlers::index::IndexTemplate;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// Every non-`POST` request, whatever its path. The candidate code is the
/// whole path minus one leading `/`, so `/ab/cd` is looked up as `ab/cd`.
///
/// # Request Flow
///
/// 1. A candidate that is not exactly 5 bytes (the root included) renders the submission form
/// 2. The code is resolved through the link service
/// 3. `302 Found` is returned with the stored URL as `Location`
/// 4. The hit counter is incremented in a background task
///
/// # Errors
///
/// Returns a generic 500 for unknown codes and for store failures alike.
/// A failed hit increment is only logged.
pub async fn resolve_handler(
    State(state): State<AppState>,
    uri: Uri,
) -> Result<Response, AppError> {
    let path = uri.path();
    let candidate = path.strip_prefix('/').unwrap_or(path).to_string();

    if !is_code_shaped(&candidate) {
        return Ok(IndexTemplate::new(state.region.clone()).into_response());
    }

    let original_url = state.link_service.resolve(&candidate).await?;
    let response = redirect::found(&original_url)?;

    info!(from = %candidate, to = %original_url, "Redirect");

    let link_service = state.link_service.clone();
    tokio::spawn(async move {
        if let Err(e) = link_service.record_hit(&candidate).await {
            error!(short_code = %candidate, error = %e, "Failed to increase hits");
        }
    });

    Ok(response)
}
