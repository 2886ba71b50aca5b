//! ShortLink entity representing a persisted URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL together with its provenance and hit counter.
///
/// Everything except `hits` is fixed at creation time.
#[derive(Debug, Clone)]
pub struct ShortLink {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub creator_ip: String,
    pub creator_user_agent: String,
    pub hits: i64,
    pub created_at: DateTime<Utc>,
}

/// Input data for storing a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original_url: String,
    pub short_code: String,
    pub creator_ip: String,
    pub creator_user_agent: String,
}

/// Who submitted a URL, captured from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Creator {
    pub ip: String,
    pub user_agent: String,
}

impl Creator {
    pub fn new(ip: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            user_agent: user_agent.into(),
        }
    }
}

impl NewShortLink {
    pub fn new(original_url: String, short_code: String, creator: &Creator) -> Self {
        Self {
            original_url,
            short_code,
            creator_ip: creator.ip.clone(),
            creator_user_agent: creator.user_agent.clone(),
        }
    }
}
