//! Push notification event and delivery contract.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::entities::Creator;

/// A message queued for the notification worker.
///
/// Created by the shorten handler and sent over a bounded channel so that
/// delivery never adds latency to the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub message: String,
}

impl Notification {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Announces a freshly created short link, naming who created it.
    pub fn short_link_created(creator: &Creator) -> Self {
        Self::new(format!(
            "New short URL from {} {}",
            creator.ip, creator.user_agent
        ))
    }
}

/// Errors that can occur while delivering a notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification request failed: {0}")]
    Transport(String),
    #[error("Notification endpoint rejected the message with status {0}")]
    Rejected(u16),
}

/// Delivers notifications to an external service.
///
/// # Implementations
///
/// - [`crate::infrastructure::notifier::PushoverNotifier`] - Pushover HTTP API
/// - [`crate::infrastructure::notifier::NullNotifier`] - drops everything
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}
