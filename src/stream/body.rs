//! Body stream abstraction wrapped by [`ResponseStream`](super::ResponseStream).
//!
//! [`BodyStream`] is `Read` plus the optional capabilities a byte-oriented
//! input stream usually carries (`available`, `mark`/`reset`, explicit
//! `close`). Every capability has an "unsupported" default so plain readers
//! only need an empty `impl`.

use std::fs::File;
use std::io::{self, Cursor, Read};

/// A readable response body with optional stream capabilities.
pub trait BodyStream: Read {
    /// Bytes that can be read without blocking. `0` when unknown.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the body cannot report its state.
    fn available(&mut self) -> io::Result<usize> {
        Ok(0)
    }

    /// Whether [`mark`](Self::mark) and [`reset`](Self::reset) are supported.
    fn mark_supported(&self) -> bool {
        false
    }

    /// Remembers the current position. Up to `read_limit` bytes may be read
    /// before the mark becomes invalid.
    fn mark(&mut self, _read_limit: usize) {}

    /// Rewinds to the last mark.
    ///
    /// # Errors
    ///
    /// Returns `Unsupported` by default, or an error when no valid mark exists.
    fn reset(&mut self) -> io::Result<()> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            "mark/reset not supported",
        ))
    }

    /// Releases the underlying resource ahead of drop.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the resource reports a failure while closing.
    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Network body from the blocking client. Dropping it returns or tears down
/// the connection, so `close` keeps the default.
impl BodyStream for reqwest::blocking::Response {}

impl BodyStream for File {}

impl<T: AsRef<[u8]>> BodyStream for Cursor<T> {
    fn available(&mut self) -> io::Result<usize> {
        let len = self.get_ref().as_ref().len();
        let pos = usize::try_from(self.position()).unwrap_or(usize::MAX);
        Ok(len.saturating_sub(pos))
    }
}

impl BodyStream for &[u8] {
    fn available(&mut self) -> io::Result<usize> {
        Ok(self.len())
    }
}

impl<B: BodyStream + ?Sized> BodyStream for Box<B> {
    fn available(&mut self) -> io::Result<usize> {
        (**self).available()
    }

    fn mark_supported(&self) -> bool {
        (**self).mark_supported()
    }

    fn mark(&mut self, read_limit: usize) {
        (**self).mark(read_limit);
    }

    fn reset(&mut self) -> io::Result<()> {
        (**self).reset()
    }

    fn close(&mut self) -> io::Result<()> {
        (**self).close()
    }
}

/// Adds mark/reset support to any [`BodyStream`] by recording bytes read
/// since the last mark.
///
/// Reading more than the mark's limit invalidates it; a later `reset` fails
/// with `InvalidInput`.
#[derive(Debug)]
pub struct MarkableBody<R> {
    inner: R,
    /// Bytes recorded since the mark, or left over for replay after one.
    buf: Vec<u8>,
    /// Next byte of `buf` to hand out.
    pos: usize,
    mark_limit: Option<usize>,
}

impl<R: BodyStream> MarkableBody<R> {
    /// Wraps `inner` with no active mark.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: Vec::new(),
            pos: 0,
            mark_limit: None,
        }
    }

    fn buffered(&self) -> usize {
        self.buf.len() - self.pos
    }
}

impl<R: BodyStream> Read for MarkableBody<R> {
    fn read(&mut self, out: &mut [u8]) -> io::Result<usize> {
        if self.buffered() > 0 {
            let n = self.buffered().min(out.len());
            out[..n].copy_from_slice(&self.buf[self.pos..self.pos + n]);
            self.pos += n;
            if self.mark_limit.is_none() && self.buffered() == 0 {
                self.buf.clear();
                self.pos = 0;
            }
            return Ok(n);
        }

        let n = self.inner.read(out)?;
        if let Some(limit) = self.mark_limit {
            if self.buf.len() + n <= limit {
                self.buf.extend_from_slice(&out[..n]);
                self.pos = self.buf.len();
            } else {
                self.mark_limit = None;
                self.buf.clear();
                self.pos = 0;
            }
        }
        Ok(n)
    }
}

impl<R: BodyStream> BodyStream for MarkableBody<R> {
    fn available(&mut self) -> io::Result<usize> {
        Ok(self.buffered() + self.inner.available()?)
    }

    fn mark_supported(&self) -> bool {
        true
    }

    fn mark(&mut self, read_limit: usize) {
        self.buf.drain(..self.pos);
        self.pos = 0;
        self.mark_limit = Some(read_limit);
    }

    fn reset(&mut self) -> io::Result<()> {
        if self.mark_limit.is_none() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "resetting to invalid mark",
            ));
        }
        self.pos = 0;
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        self.buf.clear();
        self.pos = 0;
        self.mark_limit = None;
        self.inner.close()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn read_n(body: &mut impl Read, n: usize) -> Vec<u8> {
        let mut out = vec![0u8; n];
        body.read_exact(&mut out).unwrap();
        out
    }

    #[test]
    fn test_cursor_available_reports_remaining_bytes() {
        let mut body = Cursor::new(b"hello".to_vec());
        assert_eq!(body.available().unwrap(), 5);
        read_n(&mut body, 2);
        assert_eq!(body.available().unwrap(), 3);
        assert!(!body.mark_supported());
    }

    #[test]
    fn test_default_reset_is_unsupported() {
        let mut body: &[u8] = b"abc";
        let err = body.reset().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::Unsupported);
    }

    #[test]
    fn test_markable_body_replays_bytes_after_reset() {
        let mut body = MarkableBody::new(Cursor::new(b"abcdefgh".to_vec()));
        assert!(body.mark_supported());

        assert_eq!(read_n(&mut body, 2), b"ab");
        body.mark(16);
        assert_eq!(read_n(&mut body, 3), b"cde");
        body.reset().unwrap();

        let mut rest = Vec::new();
        body.read_to_end(&mut rest).unwrap();
        assert_eq!(rest, b"cdefgh");
    }

    #[test]
    fn test_markable_body_reset_can_repeat() {
        let mut body = MarkableBody::new(Cursor::new(b"xyz".to_vec()));
        body.mark(8);
        assert_eq!(read_n(&mut body, 2), b"xy");
        body.reset().unwrap();
        assert_eq!(read_n(&mut body, 2), b"xy");
        body.reset().unwrap();
        assert_eq!(read_n(&mut body, 3), b"xyz");
    }

    #[test]
    fn test_markable_body_reading_past_limit_invalidates_mark() {
        let mut body = MarkableBody::new(Cursor::new(b"0123456789".to_vec()));
        body.mark(2);
        assert_eq!(read_n(&mut body, 4), b"0123");

        let err = body.reset().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
        assert_eq!(read_n(&mut body, 2), b"45");
    }

    #[test]
    fn test_markable_body_reset_without_mark_fails() {
        let mut body = MarkableBody::new(Cursor::new(Vec::<u8>::new()));
        assert!(body.reset().is_err());
    }

    #[test]
    fn test_markable_body_available_includes_replay_buffer() {
        let mut body = MarkableBody::new(Cursor::new(b"abcdef".to_vec()));
        body.mark(10);
        read_n(&mut body, 4);
        assert_eq!(body.available().unwrap(), 2);
        body.reset().unwrap();
        assert_eq!(body.available().unwrap(), 6);
    }

    #[test]
    fn test_boxed_body_delegates_capabilities() {
        let mut body: Box<dyn BodyStream> =
            Box::new(MarkableBody::new(Cursor::new(b"data".to_vec())));
        assert!(body.mark_supported());
        body.mark(4);
        assert_eq!(read_n(&mut body, 4), b"data");
        body.reset().unwrap();
        assert_eq!(body.available().unwrap(), 4);
    }
}
