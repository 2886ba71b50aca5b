//! Shared application state injected into handlers.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::LinkService;
use crate::domain::notification::Notification;

/// State shared by all request handlers.
///
/// Cheap to clone: services are behind `Arc` and the sender is a handle.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub notification_sender: mpsc::Sender<Notification>,
    /// Whether forwarding headers may be trusted for the client address.
    pub behind_proxy: bool,
    /// Deployment region shown on the submission form.
    pub region: Option<String>,
}

impl AppState {
    pub fn new(
        link_service: Arc<LinkService>,
        notification_sender: mpsc::Sender<Notification>,
        behind_proxy: bool,
        region: Option<String>,
    ) -> Self {
        Self {
            link_service,
            notification_sender,
            behind_proxy,
            region,
        }
    }
}
