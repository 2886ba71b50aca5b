//! Notifier implementations.
//!
//! - [`PushoverNotifier`] - Pushover messages API over HTTPS
//! - [`NullNotifier`] - no-op used when credentials are absent

pub mod null_notifier;
pub mod pushover;

pub use null_notifier::NullNotifier;
pub use pushover::{PUSHOVER_API_URL, PushoverNotifier};
