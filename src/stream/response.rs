//! Single-consumption wrapper around a live response body.

use std::fmt;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use tracing::{debug, trace};

use super::body::BodyStream;
use super::constants::{COPY_BUFFER_SIZE, DEFAULT_CHARSET};
use super::error::StreamError;
use super::metadata::{HttpResponse, Locale, ResponseMeta};
use super::text::{decode_joined_lines, resolve_charset};

enum BodyState<B> {
    Open(B),
    Closed,
}

/// A response whose body can be drained exactly once.
///
/// The body is released on the first of: [`close`](Self::close), the end of
/// [`read_as_text`](Self::read_as_text) or [`read_to_file`](Self::read_to_file)
/// (whether they succeed or fail), or drop. Once released, every read returns
/// its empty sentinel instead of an error.
///
/// Metadata is captured at construction and stays readable in every state.
///
/// # Example
///
/// ```no_run
/// use response_stream::ResponseStream;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let response = reqwest::blocking::get("https://example.com/")?;
/// let mut stream = ResponseStream::new(response)?;
/// println!("{} {}", stream.status_code(), stream.reason_phrase());
/// let text = stream.read_as_text()?;
/// assert!(stream.is_closed());
/// # let _ = text;
/// # Ok(())
/// # }
/// ```
pub struct ResponseStream<B: BodyStream = reqwest::blocking::Response> {
    meta: ResponseMeta,
    state: BodyState<B>,
    charset: String,
}

impl<B: BodyStream> ResponseStream<B> {
    /// Wraps `response`, decoding text as UTF-8.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::MissingBody`] if the response exposes no body.
    pub fn new<R>(response: R) -> Result<Self, StreamError>
    where
        R: HttpResponse<Body = B>,
    {
        Self::with_charset(response, DEFAULT_CHARSET)
    }

    /// Wraps `response`, decoding text with `charset`.
    ///
    /// The label is resolved when text is read, so an unknown charset only
    /// fails [`read_as_text`](Self::read_as_text).
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::MissingBody`] if the response exposes no body.
    pub fn with_charset<R>(response: R, charset: impl Into<String>) -> Result<Self, StreamError>
    where
        R: HttpResponse<Body = B>,
    {
        let meta = ResponseMeta::capture(&response);
        let body = response.into_body().map_err(StreamError::missing_body)?;
        Ok(Self::from_parts(meta, body, charset))
    }

    /// Wraps a body that has already been separated from its response.
    pub fn from_parts(meta: ResponseMeta, body: B, charset: impl Into<String>) -> Self {
        Self {
            meta,
            state: BodyState::Open(body),
            charset: charset.into(),
        }
    }

    /// HTTP status code.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.meta.status
    }

    /// Reason phrase of the status line.
    #[must_use]
    pub fn reason_phrase(&self) -> &str {
        &self.meta.reason
    }

    /// Content locale, if the response declared one.
    #[must_use]
    pub fn locale(&self) -> Option<&Locale> {
        self.meta.locale.as_ref()
    }

    /// All captured metadata.
    #[must_use]
    pub fn meta(&self) -> &ResponseMeta {
        &self.meta
    }

    /// Charset label used by [`read_as_text`](Self::read_as_text).
    #[must_use]
    pub fn charset(&self) -> &str {
        &self.charset
    }

    /// Whether the body has been consumed or closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        matches!(self.state, BodyState::Closed)
    }

    /// Drains the body as text and closes it.
    ///
    /// Lines are concatenated without their terminators: `"a\r\nb\n"` reads
    /// as `"ab"`. Returns an empty string without touching anything if the
    /// stream is already closed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Read`] if the body fails mid-read and
    /// [`StreamError::UnsupportedCharset`] if the charset label is unknown.
    /// The body is closed in both cases.
    pub fn read_as_text(&mut self) -> Result<String, StreamError> {
        let BodyState::Open(body) = &mut self.state else {
            return Ok(String::new());
        };

        let result = match resolve_charset(&self.charset) {
            Some(charset) => decode_joined_lines(body, charset).map_err(StreamError::read),
            None => Err(StreamError::unsupported_charset(self.charset.as_str())),
        };
        self.close();

        if let Ok(text) = &result {
            debug!(bytes = text.len(), charset = %self.charset, "response body read as text");
        }
        result
    }

    /// Drains the raw body into a new or truncated file at `path` and closes it.
    ///
    /// Does nothing, and does not create `path`, if the stream is already
    /// closed. Parent directories must exist. A failed copy leaves whatever
    /// was written so far in place.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::File`] if the file cannot be created or written
    /// and [`StreamError::Read`] if the body fails mid-read. The file handle
    /// and the body are both released before the error is returned.
    pub fn read_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), StreamError> {
        let path = path.as_ref();
        let BodyState::Open(body) = &mut self.state else {
            trace!(path = %path.display(), "stream already closed, nothing to write");
            return Ok(());
        };

        let result = copy_to_file(body, path);
        self.close();

        let bytes = result?;
        debug!(path = %path.display(), bytes, "response body written to file");
        Ok(())
    }

    /// Reads one byte. `None` at end of body or once closed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Read`] if the body fails.
    pub fn read_byte(&mut self) -> Result<Option<u8>, StreamError> {
        let mut byte = [0u8; 1];
        Ok(self.read_buffer(&mut byte)?.map(|_| byte[0]))
    }

    /// Reads into `buf`. `None` at end of body or once closed; `Some(0)` only
    /// for an empty `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Read`] if the body fails.
    pub fn read_buffer(&mut self, buf: &mut [u8]) -> Result<Option<usize>, StreamError> {
        let BodyState::Open(body) = &mut self.state else {
            return Ok(None);
        };
        if buf.is_empty() {
            return Ok(Some(0));
        }
        loop {
            match body.read(buf) {
                Ok(0) => return Ok(None),
                Ok(n) => return Ok(Some(n)),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
                Err(e) => return Err(StreamError::read(e)),
            }
        }
    }

    /// Reads into `buf[offset..offset + len]`. Same sentinels as
    /// [`read_buffer`](Self::read_buffer).
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::InvalidRange`] if the range does not fit in
    /// `buf` (checked only while open) and [`StreamError::Read`] if the body
    /// fails.
    pub fn read_buffer_range(
        &mut self,
        buf: &mut [u8],
        offset: usize,
        len: usize,
    ) -> Result<Option<usize>, StreamError> {
        if self.is_closed() {
            return Ok(None);
        }
        let end = offset
            .checked_add(len)
            .filter(|end| *end <= buf.len())
            .ok_or_else(|| StreamError::invalid_range(offset, len, buf.len()))?;
        self.read_buffer(&mut buf[offset..end])
    }

    /// Bytes readable without blocking, `0` when unknown or closed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Read`] if the body cannot report its state.
    pub fn available(&mut self) -> Result<usize, StreamError> {
        match &mut self.state {
            BodyState::Open(body) => body.available().map_err(StreamError::read),
            BodyState::Closed => Ok(0),
        }
    }

    /// Discards up to `n` bytes, returning how many were skipped. `0` once
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Read`] if the body fails.
    pub fn skip(&mut self, n: u64) -> Result<u64, StreamError> {
        match &mut self.state {
            BodyState::Open(body) => {
                io::copy(&mut body.by_ref().take(n), &mut io::sink()).map_err(StreamError::read)
            }
            BodyState::Closed => Ok(0),
        }
    }

    /// Whether the body supports [`mark`](Self::mark). `false` once closed.
    #[must_use]
    pub fn mark_supported(&self) -> bool {
        match &self.state {
            BodyState::Open(body) => body.mark_supported(),
            BodyState::Closed => false,
        }
    }

    /// Marks the current body position. No-op once closed.
    pub fn mark(&mut self, read_limit: usize) {
        if let BodyState::Open(body) = &mut self.state {
            body.mark(read_limit);
        }
    }

    /// Rewinds the body to the last mark. No-op once closed.
    ///
    /// # Errors
    ///
    /// Returns [`StreamError::Reset`] if the open body has no valid mark or
    /// does not support marking.
    pub fn reset(&mut self) -> Result<(), StreamError> {
        match &mut self.state {
            BodyState::Open(body) => body.reset().map_err(StreamError::reset),
            BodyState::Closed => Ok(()),
        }
    }

    /// Releases the body. Idempotent and infallible: a failure reported by
    /// the body while closing is logged and the body is dropped anyway.
    pub fn close(&mut self) {
        if let BodyState::Open(mut body) = std::mem::replace(&mut self.state, BodyState::Closed) {
            if let Err(error) = body.close() {
                debug!(%error, "ignoring error while closing response body");
            }
            trace!(status = self.meta.status, "response body released");
        }
    }
}

impl<B: BodyStream> Read for ResponseStream<B> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match &mut self.state {
            BodyState::Open(body) => body.read(buf),
            BodyState::Closed => Ok(0),
        }
    }
}

impl<B: BodyStream> Drop for ResponseStream<B> {
    fn drop(&mut self) {
        self.close();
    }
}

impl<B: BodyStream> fmt::Debug for ResponseStream<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResponseStream")
            .field("meta", &self.meta)
            .field("charset", &self.charset)
            .field("closed", &self.is_closed())
            .finish()
    }
}

/// Copies `body` into a freshly created file. The file handle is dropped
/// (closed) before this returns, on success and on error alike.
fn copy_to_file<B: Read + ?Sized>(body: &mut B, path: &Path) -> Result<u64, StreamError> {
    let mut file = File::create(path).map_err(|e| StreamError::file(path, e))?;
    let mut buffer = [0u8; COPY_BUFFER_SIZE];
    let mut written: u64 = 0;

    loop {
        let n = match body.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(StreamError::read(e)),
        };
        file.write_all(&buffer[..n])
            .map_err(|e| StreamError::file(path, e))?;
        written += n as u64;
    }

    file.flush().map_err(|e| StreamError::file(path, e))?;
    Ok(written)
}
