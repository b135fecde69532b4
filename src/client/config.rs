//! Client configuration (timeouts, User-Agent, charset).

use std::time::Duration;

use crate::stream::DEFAULT_CHARSET;
use crate::user_agent;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default timeout for the whole request, body included (5 minutes).
pub const REQUEST_TIMEOUT_SECS: u64 = 300;

/// Settings applied when building an [`HttpClient`](super::HttpClient).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum time for the whole exchange, body included.
    pub timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Charset label given to every [`ResponseStream`](crate::stream::ResponseStream).
    pub charset: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            user_agent: user_agent::default_user_agent(),
            charset: DEFAULT_CHARSET.to_string(),
        }
    }
}

impl ClientConfig {
    /// Sets both timeouts, in seconds.
    #[must_use]
    pub fn with_timeouts(mut self, connect_timeout_secs: u64, timeout_secs: u64) -> Self {
        self.connect_timeout = Duration::from_secs(connect_timeout_secs);
        self.timeout = Duration::from_secs(timeout_secs);
        self
    }

    /// Overrides the User-Agent header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Overrides the text charset.
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }
}
