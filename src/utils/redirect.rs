//! `302 Found` responses for stored URLs.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;

/// Builds a `302 Found` response pointing at `location`.
///
/// Stored URLs are not validated. Non-ASCII URLs are re-serialized through
/// [`url::Url`], which percent-encodes them; anything else is sent as stored.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if the URL is not a valid `Location` header
/// value and cannot be normalized into one.
pub fn found(location: &str) -> Result<Response, AppError> {
    let normalized = if location.is_ascii() {
        None
    } else {
        url::Url::parse(location).ok().map(String::from)
    };

    let value = HeaderValue::from_str(normalized.as_deref().unwrap_or(location))
        .ok()
        .or_else(|| {
            url::Url::parse(location)
                .ok()
                .and_then(|parsed| HeaderValue::from_str(parsed.as_str()).ok())
        })
        .ok_or_else(|| {
            AppError::internal(
                "Stored URL is not a valid Location header",
                json!({ "location": location }),
            )
        })?;

    Ok((StatusCode::FOUND, [(header::LOCATION, value)]).into_response())
}
