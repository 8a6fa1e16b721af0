//! Request header helpers for authenticated test calls.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use banquet_session::token::SESSION_HEADER;

/// A session token to attach to test requests.
pub struct MockAuth {
    pub token: String,
}

impl MockAuth {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }

    /// Headers as a logged-in browser would send them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        if let Ok(value) = HeaderValue::from_str(&self.token) {
            map.insert(HeaderName::from_static(SESSION_HEADER), value);
        }
        map
    }
}
