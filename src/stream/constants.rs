//! Constants for the stream module (buffer sizes, default charset).

/// Copy buffer size used when draining a body to a file (4 KiB).
pub const COPY_BUFFER_SIZE: usize = 4096;

/// Charset label applied when none is given at construction.
pub const DEFAULT_CHARSET: &str = "UTF-8";
