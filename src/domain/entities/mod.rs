//! Core domain entities.
//!
//! - [`ShortLink`] - a stored URL mapping
//! - [`NewShortLink`] - input for creating one
//! - [`Creator`] - request provenance recorded with each link

pub mod short_link;

pub use short_link::{Creator, NewShortLink, ShortLink};
