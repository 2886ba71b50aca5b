//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`notifier`] - Push notification delivery (Pushover and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations

pub mod notifier;
pub mod persistence;
