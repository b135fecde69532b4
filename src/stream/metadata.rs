//! Response metadata and the transport seam.
//!
//! [`HttpResponse`] is what a transport hands to
//! [`ResponseStream`](super::ResponseStream): status line, locale, and a body
//! that can be taken out exactly once. [`ResponseMeta`] is the snapshot kept
//! after the body has been taken.

use std::fmt;
use std::io;

use reqwest::header::CONTENT_LANGUAGE;
use serde::Serialize;

use super::body::BodyStream;

/// A language tag describing the response content, e.g. `en-US`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Locale(String);

impl Locale {
    /// Parses the first language tag of a `Content-Language` header value.
    ///
    /// Returns `None` for empty values and for the wildcard `*`.
    #[must_use]
    pub fn from_content_language(value: &str) -> Option<Self> {
        let tag = value.split(',').next()?.split(';').next()?.trim();
        if tag.is_empty() || tag == "*" {
            return None;
        }
        Some(Self(tag.to_string()))
    }

    /// Primary language subtag, lowercased (`en` for `en-US`).
    #[must_use]
    pub fn language(&self) -> String {
        self.0
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase()
    }

    /// The full tag as received.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Status line and locale captured from a response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseMeta {
    /// Numeric HTTP status code.
    pub status: u16,
    /// Reason phrase; empty when the transport reports none.
    pub reason: String,
    /// Content locale, when the response declared one.
    pub locale: Option<Locale>,
}

impl ResponseMeta {
    /// Builds a snapshot with no locale.
    pub fn new(status: u16, reason: impl Into<String>) -> Self {
        Self {
            status,
            reason: reason.into(),
            locale: None,
        }
    }

    /// Sets the locale.
    #[must_use]
    pub fn with_locale(mut self, locale: Option<Locale>) -> Self {
        self.locale = locale;
        self
    }

    /// Captures the metadata of any [`HttpResponse`].
    pub fn capture<R: HttpResponse + ?Sized>(response: &R) -> Self {
        Self {
            status: response.status_code(),
            reason: response.reason_phrase(),
            locale: response.locale(),
        }
    }
}

/// A completed HTTP response as supplied by a transport.
pub trait HttpResponse {
    /// The body type handed over by [`into_body`](Self::into_body).
    type Body: BodyStream;

    /// Numeric status code.
    fn status_code(&self) -> u16;

    /// Reason phrase of the status line.
    fn reason_phrase(&self) -> String;

    /// Content locale, if any.
    fn locale(&self) -> Option<Locale>;

    /// Gives up the body.
    ///
    /// # Errors
    ///
    /// Returns an IO error if the transport cannot expose a readable body.
    fn into_body(self) -> io::Result<Self::Body>;
}

impl HttpResponse for reqwest::blocking::Response {
    type Body = Self;

    fn status_code(&self) -> u16 {
        self.status().as_u16()
    }

    fn reason_phrase(&self) -> String {
        // HTTP/2 and later carry no reason phrase on the wire.
        self.status()
            .canonical_reason()
            .unwrap_or_default()
            .to_string()
    }

    fn locale(&self) -> Option<Locale> {
        self.headers()
            .get(CONTENT_LANGUAGE)
            .and_then(|value| value.to_str().ok())
            .and_then(Locale::from_content_language)
    }

    fn into_body(self) -> io::Result<Self::Body> {
        Ok(self)
    }
}
