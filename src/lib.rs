//! Response Stream Library
//!
//! Wraps a live HTTP response so its body can be consumed exactly once, as
//! text or as a file, with the connection released on every exit path.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`stream`] - `ResponseStream`, the body abstraction, metadata and errors
//! - [`client`] - Blocking HTTP client that produces response streams

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod stream;
mod user_agent;

// Re-export commonly used types
pub use client::{ClientConfig, HttpClient};
pub use stream::{
    BodyStream, HttpResponse, Locale, MarkableBody, ResponseMeta, ResponseStream, StreamError,
};
