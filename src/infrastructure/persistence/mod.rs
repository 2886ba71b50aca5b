//! PostgreSQL repository implementations using SQLx.
//!
//! - [`PgShortLinkRepository`] - Short link storage, lookup and hit counting

pub mod pg_short_link_repository;

pub use pg_short_link_repository::PgShortLinkRepository;
