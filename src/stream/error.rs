//! Error types for the stream module.
//!
//! Every variant carries the context a caller needs to act on it (which path,
//! which URL, which charset label). Operations on an already closed stream
//! never produce one of these; they return their empty sentinel instead.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while wrapping or draining a response body.
#[derive(Debug, Error)]
pub enum StreamError {
    /// The transport could not expose a readable body for the response.
    #[error("response has no readable body: {source}")]
    MissingBody {
        /// The underlying IO error reported by the transport.
        #[source]
        source: std::io::Error,
    },

    /// Reading from the network body failed.
    #[error("error reading response body: {source}")]
    Read {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Creating or writing the destination file failed.
    #[error("IO error writing to {path}: {source}")]
    File {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The charset label given at construction is not a known encoding.
    #[error("unsupported charset: {label}")]
    UnsupportedCharset {
        /// The label as supplied by the caller.
        label: String,
    },

    /// A buffer slice request fell outside the buffer.
    #[error("range {offset}+{len} out of bounds for buffer of {capacity} bytes")]
    InvalidRange {
        /// Requested start offset.
        offset: usize,
        /// Requested length.
        len: usize,
        /// Actual buffer length.
        capacity: usize,
    },

    /// The body rejected a `reset()` (no mark, mark invalidated, or unsupported).
    #[error("cannot reset response body: {source}")]
    Reset {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be built from its configuration.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },

    /// The request URL is malformed.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The request timed out before a response arrived.
    #[error("timeout requesting {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Transport-level failure (DNS, connection refused, TLS, etc.).
    #[error("network error requesting {url}: {source}")]
    Transport {
        /// The URL that failed.
        url: String,
        /// The underlying transport error.
        #[source]
        source: reqwest::Error,
    },
}

impl StreamError {
    /// Creates a missing-body error.
    pub fn missing_body(source: std::io::Error) -> Self {
        Self::MissingBody { source }
    }

    /// Creates a body read error.
    pub fn read(source: std::io::Error) -> Self {
        Self::Read { source }
    }

    /// Creates a destination file error.
    pub fn file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::File {
            path: path.into(),
            source,
        }
    }

    /// Creates an unsupported-charset error.
    pub fn unsupported_charset(label: impl Into<String>) -> Self {
        Self::UnsupportedCharset {
            label: label.into(),
        }
    }

    /// Creates an out-of-bounds range error.
    pub fn invalid_range(offset: usize, len: usize, capacity: usize) -> Self {
        Self::InvalidRange {
            offset,
            len,
            capacity,
        }
    }

    /// Creates a reset error.
    pub fn reset(source: std::io::Error) -> Self {
        Self::Reset { source }
    }

    /// Creates a client build error.
    pub fn client_build(source: reqwest::Error) -> Self {
        Self::ClientBuild { source }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates a transport error from a reqwest error.
    pub fn transport(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Transport {
            url: url.into(),
            source,
        }
    }
}

// No `From<std::io::Error>`: the same IO error type comes from the body, the
// destination file and the transport, and only the call site knows which.
