//! Single-consumption response body streams.
//!
//! A [`ResponseStream`] owns the body of one completed HTTP response. The body
//! can be drained once, as text or into a file, or read byte by byte; it is
//! released exactly once no matter how the caller leaves.
//!
//! # Features
//!
//! - Status code, reason phrase and locale readable in every state
//! - Line-joining charset decode (`read_as_text`)
//! - 4 KiB buffered copy to disk (`read_to_file`)
//! - Benign sentinels instead of errors after close
//! - Infallible, idempotent `close`, also run on drop
//!
//! # Example
//!
//! ```no_run
//! use response_stream::stream::{Locale, ResponseMeta, ResponseStream};
//! use std::io::Cursor;
//!
//! let meta = ResponseMeta::new(200, "OK").with_locale(Locale::from_content_language("en"));
//! let mut stream = ResponseStream::from_parts(meta, Cursor::new(b"a\nb".to_vec()), "UTF-8");
//! assert_eq!(stream.read_as_text().unwrap(), "ab");
//! assert!(stream.is_closed());
//! ```

mod body;
mod constants;
mod error;
mod metadata;
mod response;
mod text;

pub use body::{BodyStream, MarkableBody};
pub use constants::{COPY_BUFFER_SIZE, DEFAULT_CHARSET};
pub use error::StreamError;
pub use metadata::{HttpResponse, Locale, ResponseMeta};
pub use response::ResponseStream;
