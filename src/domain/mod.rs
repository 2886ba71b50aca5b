//! Domain layer containing business entities and contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Data access trait definitions
//! - [`notification`] - Push notification event and the [`notification::Notifier`] contract
//! - [`notification_worker`] - Background task delivering notifications
//!
//! # Notification Flow
//!
//! 1. The shorten handler stores a link
//! 2. A [`notification::Notification`] is pushed onto a bounded channel (dropped if full)
//! 3. [`notification_worker::run_notification_worker`] delivers it through a notifier

pub mod entities;
pub mod notification;
pub mod notification_worker;
pub mod repositories;
