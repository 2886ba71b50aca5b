//! No-op notifier for deployments without push credentials.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::notification::{Notification, Notifier, NotifyError};

/// A notifier that drops every message.
///
/// Used when `PUSHOVER_TOKEN` or `PUSHOVER_USER` is not configured.
pub struct NullNotifier;

impl NullNotifier {
    /// Creates a new NullNotifier instance.
    pub fn new() -> Self {
        debug!("Using NullNotifier (push notifications disabled)");
        Self
    }
}

impl Default for NullNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Notifier for NullNotifier {
    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        debug!(message = %notification.message, "Notification dropped");
        Ok(())
    }
}
