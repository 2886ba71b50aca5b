//! Background delivery of push notifications.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::notification::{Notification, Notifier};

/// Drains the notification channel, delivering each message once.
///
/// Failures are logged and the message is dropped; nothing is retried.
/// Returns when every sender has been dropped.
pub async fn run_notification_worker(
    mut rx: mpsc::Receiver<Notification>,
    notifier: Arc<dyn Notifier>,
) {
    while let Some(notification) = rx.recv().await {
        debug!("Sending push notification");

        match notifier.send(&notification).await {
            Ok(()) => debug!("Push notification delivered"),
            Err(e) => warn!(error = %e, "Failed to deliver push notification"),
        }
    }

    info!("Notification worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::notification::{MockNotifier, NotifyError};

    #[tokio::test]
    async fn test_worker_delivers_every_message() {
        let mut notifier = MockNotifier::new();
        notifier.expect_send().times(2).returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(Notification::new("one")).await.unwrap();
        tx.send(Notification::new("two")).await.unwrap();
        drop(tx);

        run_notification_worker(rx, Arc::new(notifier)).await;
    }

    #[tokio::test]
    async fn test_worker_survives_delivery_failure() {
        let mut notifier = MockNotifier::new();
        notifier
            .expect_send()
            .withf(|n| n.message == "first")
            .times(1)
            .returning(|_| Err(NotifyError::Rejected(500)));
        notifier
            .expect_send()
            .withf(|n| n.message == "second")
            .times(1)
            .returning(|_| Ok(()));

        let (tx, rx) = mpsc::channel(8);
        tx.send(Notification::new("first")).await.unwrap();
        tx.send(Notification::new("second")).await.unwrap();
        drop(tx);

        run_notification_worker(rx, Arc::new(notifier)).await;
    }
}
