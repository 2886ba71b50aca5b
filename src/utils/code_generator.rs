//! Short code derivation.
//!
//! A code is the first five alphanumeric characters of the URL-safe base64
//! encoding of `SHA-1(original_url ++ unix_nanos)`. The timestamp is the only
//! thing that separates two submissions of the same URL.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::Utc;
use sha1::{Digest, Sha1};

/// Number of characters in every short code.
pub const CODE_LENGTH: usize = 5;

/// Characters removed from the encoded digest before truncation.
const STRIPPED_CHARS: [char; 4] = ['-', '_', '+', '/'];

/// Derives a short code for `original_url` using the current time.
pub fn generate_code(original_url: &str) -> String {
    let nanos = Utc::now().timestamp_nanos_opt().unwrap_or_default();
    generate_code_at(original_url, nanos)
}

/// Derives a short code for `original_url` at a fixed timestamp.
///
/// Deterministic: the same URL and timestamp always give the same code.
///
/// # Examples
///
/// ```
/// use shorturl::utils::code_generator::generate_code_at;
///
/// assert_eq!(generate_code_at("http://example.com", 1_700_000_000_000_000_000), "iUJIy");
/// ```
pub fn generate_code_at(original_url: &str, unix_nanos: i64) -> String {
    let input = format!("{original_url}{unix_nanos}");
    let mut digest = Sha1::digest(input.as_bytes());
    let mut code = String::with_capacity(CODE_LENGTH);

    // Twenty digest bytes encode to 27 characters, so a single round is
    // enough unless nearly all of them are stripped.
    loop {
        let encoded = URL_SAFE_NO_PAD.encode(&digest);
        code.extend(
            encoded
                .chars()
                .filter(|c| !STRIPPED_CHARS.contains(c))
                .take(CODE_LENGTH - code.len()),
        );

        if code.len() == CODE_LENGTH {
            return code;
        }

        digest = Sha1::digest(&digest);
    }
}

/// Returns true if `candidate` has the length of a short code, in bytes.
pub fn is_code_shaped(candidate: &str) -> bool {
    candidate.len() == CODE_LENGTH
}
