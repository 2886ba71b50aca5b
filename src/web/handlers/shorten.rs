//! Handler for URL submissions.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{ConnectInfo, State},
    http::HeaderMap,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use std::net::SocketAddr;
use tracing::{debug, warn};
use validator::Validate;

use crate::domain::entities::Creator;
use crate::domain::notification::Notification;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::client_ip::{client_ip, user_agent};

/// Form body of a submission.
///
/// A missing `url` field is treated like an empty one.
#[derive(Debug, Deserialize, Validate)]
pub struct ShortenForm {
    #[serde(default)]
    #[validate(length(min = 3))]
    pub url: String,
}

/// Template for the confirmation page.
#[derive(Template, WebTemplate)]
#[template(path = "result.html")]
pub struct ResultTemplate {
    pub short_url: String,
}

/// Shortens the submitted URL.
///
/// # Endpoint
///
/// `POST` on any path, with form field `url`
///
/// # Request Flow
///
/// 1. URLs shorter than 3 characters redirect back to `/` (303), nothing is stored
/// 2. A code is generated and stored together with the client address and user agent
/// 3. A push notification is queued (dropped if the queue is full)
/// 4. The confirmation page shows `BASE_URL/<code>`
///
/// # Errors
///
/// Returns a generic 500 if the link cannot be stored.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ConnectInfo(peer): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    Form(form): Form<ShortenForm>,
) -> Result<Response, AppError> {
    if form.validate().is_err() {
        debug!(length = form.url.chars().count(), "Rejected short URL submission");
        return Ok(Redirect::to("/").into_response());
    }

    let creator = Creator::new(
        client_ip(&headers, peer, state.behind_proxy),
        user_agent(&headers),
    );

    let link = match state.link_service.shorten(form.url, &creator).await {
        Ok(link) => link,
        Err(AppError::Validation { .. }) => return Ok(Redirect::to("/").into_response()),
        Err(e) => return Err(e),
    };

    if let Err(e) = state
        .notification_sender
        .try_send(Notification::short_link_created(&creator))
    {
        warn!(error = %e, "Notification queue unavailable, dropping notification");
    }

    Ok(ResultTemplate {
        short_url: state.link_service.short_url(&link.short_code),
    }
    .into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_validation() {
        let short = ShortenForm {
            url: "ab".to_string(),
        };
        assert!(short.validate().is_err());

        let ok = ShortenForm {
            url: "abc".to_string(),
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_result_renders_short_url() {
        let html = ResultTemplate {
            short_url: "https://s.example.com/aB3dE".to_string(),
        }
        .render()
        .unwrap();

        assert!(html.contains("https://s.example.com/aB3dE"));
    }
}
