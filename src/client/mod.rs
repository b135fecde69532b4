//! Synchronous HTTP client that hands back [`ResponseStream`]s.
//!
//! The client performs a single GET and wraps the response; status handling is
//! left to the caller, so 4xx and 5xx responses come back as streams like any
//! other. Timeouts are the only cancellation mechanism: a request that exceeds
//! them surfaces as an error from `send` or from the read that was blocked.
//!
//! # Example
//!
//! ```no_run
//! use response_stream::client::HttpClient;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HttpClient::new()?;
//! let mut stream = client.send("https://example.com/")?;
//! if stream.status_code() == 200 {
//!     stream.read_to_file("index.html")?;
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [`ResponseStream`]: crate::stream::ResponseStream

mod config;
mod http;

pub use config::{CONNECT_TIMEOUT_SECS, ClientConfig, REQUEST_TIMEOUT_SECS};
pub use http::HttpClient;
