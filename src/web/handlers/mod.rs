//! Request handlers for the public site.

pub mod index;
pub mod resolve;
pub mod shorten;

pub use resolve::resolve_handler;
pub use shorten::shorten_handler;
