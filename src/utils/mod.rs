//! Utility functions for code generation and request handling.
//!
//! - [`code_generator`] - Short code derivation
//! - [`client_ip`] - Client address and user agent extraction
//! - [`redirect`] - `302 Found` responses for stored URLs

pub mod client_ip;
pub mod code_generator;
pub mod redirect;
