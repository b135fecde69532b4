//! User-Agent string sent by [`HttpClient`](crate::client::HttpClient).

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://crates.io/crates/response-stream";

/// Default User-Agent (identifies the crate and its version).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("response-stream/{version} (+{PROJECT_UA_URL})")
}
