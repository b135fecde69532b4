//! Blocking `reqwest` client producing [`ResponseStream`]s.

use std::path::Path;

use reqwest::blocking::Client;
use tracing::{debug, info, instrument};
use url::Url;

use super::config::ClientConfig;
use crate::stream::{ResponseMeta, ResponseStream, StreamError};

/// Synchronous HTTP client.
///
/// Create once and reuse; the underlying client pools connections. Must not
/// be built or used from inside an async runtime's worker threads.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    charset: String,
}

impl HttpClient {
    /// Creates a client with [`ClientConfig::default`].
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::ClientBuild`] if the TLS backend or system
    /// configuration cannot be initialized.
    pub fn new() -> Result<Self, StreamError> {
        Self::with_config(ClientConfig::default())
    }

    /// Creates a client from explicit settings.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::ClientBuild`] if the client cannot be built.
    #[instrument(level = "debug", skip(config), fields(charset = %config.charset))]
    pub fn with_config(config: ClientConfig) -> Result<Self, StreamError> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .gzip(true)
            .user_agent(config.user_agent)
            .build()
            .map_err(StreamError::client_build)?;
        Ok(Self {
            client,
            charset: config.charset,
        })
    }

    /// Sends a GET request and wraps the response.
    ///
    /// Any status is returned as a stream; inspect
    /// [`status_code`](ResponseStream::status_code) before consuming it.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidUrl`] for malformed URLs,
    /// [`StreamError::Timeout`] if no response arrives in time, and
    /// [`StreamError::Transport`] for other network failures.
    #[instrument(skip(self), fields(url = %url))]
    pub fn send(&self, url: &str) -> Result<ResponseStream, StreamError> {
        let parsed = Url::parse(url).map_err(|_| StreamError::invalid_url(url))?;

        let response = self.client.get(parsed).send().map_err(|e| {
            if e.is_timeout() {
                StreamError::timeout(url)
            } else {
                StreamError::transport(url, e)
            }
        })?;

        let stream = ResponseStream::with_charset(response, self.charset.as_str())?;
        debug!(
            status = stream.status_code(),
            reason = %stream.reason_phrase(),
            "response received"
        );
        Ok(stream)
    }

    /// Sends a GET request and reads the body as joined text.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`send`](Self::send) and
    /// [`ResponseStream::read_as_text`].
    #[instrument(skip(self), fields(url = %url))]
    pub fn fetch_text(&self, url: &str) -> Result<(ResponseMeta, String), StreamError> {
        let mut stream = self.send(url)?;
        let text = stream.read_as_text()?;
        Ok((stream.meta().clone(), text))
    }

    /// Sends a GET request and writes the raw body to `path`.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`send`](Self::send) and
    /// [`ResponseStream::read_to_file`].
    #[instrument(skip(self, path), fields(url = %url, path = %path.display()))]
    pub fn fetch_to_file(&self, url: &str, path: &Path) -> Result<ResponseMeta, StreamError> {
        let mut stream = self.send(url)?;
        stream.read_to_file(path)?;
        info!(status = stream.status_code(), path = %path.display(), "body saved");
        Ok(stream.meta().clone())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_send_rejects_invalid_url_before_any_io() {
        let client = HttpClient::new().unwrap();
        let result = client.send("not-a-valid-url");
        assert!(matches!(result, Err(StreamError::InvalidUrl { .. })));
    }

    #[test]
    fn test_fetch_to_file_invalid_url_does_not_create_file() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let dest = temp_dir.path().join("out.bin");
        let client = HttpClient::new().unwrap();

        let result = client.fetch_to_file("::nope::", &dest);

        assert!(matches!(result, Err(StreamError::InvalidUrl { .. })));
        assert!(!dest.exists());
    }

    #[test]
    fn test_send_connection_refused_is_transport_error() {
        // Bind then drop to get a port with nothing listening.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .map(|addr| addr.port());
        let Ok(port) = port else {
            return;
        };
        let client = HttpClient::with_config(ClientConfig::default().with_timeouts(2, 5)).unwrap();

        let result = client.send(&format!("http://127.0.0.1:{port}/"));

        assert!(
            matches!(
                result,
                Err(StreamError::Transport { .. } | StreamError::Timeout { .. })
            ),
            "got: {result:?}"
        );
    }
}
