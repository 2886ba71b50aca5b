//! Link creation, resolution and hit counting.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tracing::{debug, warn};

use crate::domain::entities::{Creator, NewShortLink, ShortLink};
use crate::domain::repositories::ShortLinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;

/// Shortest URL accepted for shortening, in characters.
pub const MIN_URL_LENGTH: usize = 3;

/// Number of fresh codes tried before giving up on a collision streak.
const MAX_ATTEMPTS: usize = 10;

/// Service for creating and resolving short links.
///
/// Every repository call is bounded by `store_timeout`; an elapsed call is
/// reported as [`AppError::Unavailable`].
pub struct LinkService {
    repository: Arc<dyn ShortLinkRepository>,
    base_url: String,
    store_timeout: Duration,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public prefix of generated links; a trailing slash
    /// is ignored.
    pub fn new(
        repository: Arc<dyn ShortLinkRepository>,
        base_url: impl Into<String>,
        store_timeout: Duration,
    ) -> Self {
        Self {
            repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            store_timeout,
        }
    }

    /// Creates and stores a short link for `original_url`.
    ///
    /// The URL is stored exactly as submitted. If the generated code is
    /// already taken, a new one is derived from a later timestamp, up to
    /// 10 attempts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is shorter than
    /// [`MIN_URL_LENGTH`] characters.
    ///
    /// Returns [`AppError::Internal`] if every attempt collided, and passes
    /// through any other repository error.
    pub async fn shorten(
        &self,
        original_url: String,
        creator: &Creator,
    ) -> Result<ShortLink, AppError> {
        if original_url.chars().count() < MIN_URL_LENGTH {
            return Err(AppError::bad_request(
                "URL is too short",
                json!({ "min_length": MIN_URL_LENGTH }),
            ));
        }

        for attempt in 1..=MAX_ATTEMPTS {
            let code = generate_code(&original_url);
            let new_link = NewShortLink::new(original_url.clone(), code, creator);

            match self.bounded(self.repository.insert(new_link)).await {
                Err(AppError::Conflict { details, .. }) => {
                    warn!(attempt, %details, "Short code collision, regenerating");
                }
                result => return result,
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Returns the original URL stored for `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that code.
    /// Returns [`AppError::Unavailable`] or [`AppError::Internal`] on store failures.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        self.bounded(self.repository.find_original_url(short_code))
            .await?
            .ok_or_else(|| {
                AppError::not_found("Short link not found", json!({ "code": short_code }))
            })
    }

    /// Adds one to the hit counter of `short_code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has that code.
    pub async fn record_hit(&self, short_code: &str) -> Result<(), AppError> {
        if self
            .bounded(self.repository.increment_hits(short_code))
            .await?
        {
            debug!(short_code, "Hits increased");
            Ok(())
        } else {
            Err(AppError::not_found(
                "Short link not found",
                json!({ "code": short_code }),
            ))
        }
    }

    /// Constructs the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url, short_code)
    }

    async fn bounded<T>(
        &self,
        operation: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.store_timeout, operation)
            .await
            .map_err(|_| {
                AppError::unavailable(
                    "Store operation timed out",
                    json!({ "timeout_ms": self.store_timeout.as_millis() as u64 }),
                )
            })?
    }
}
