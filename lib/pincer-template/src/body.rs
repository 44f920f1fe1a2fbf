//! Request body payloads and serialization utilities.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::Result;

/// Character set used to encode text bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Charset {
    /// UTF-8.
    #[default]
    #[serde(rename = "UTF-8")]
    Utf8,
    /// ISO-8859-1 (Latin-1).
    #[serde(rename = "ISO-8859-1")]
    Iso8859_1,
    /// US-ASCII.
    #[serde(rename = "US-ASCII")]
    UsAscii,
}

impl Charset {
    /// Get the canonical charset label.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Utf8 => "UTF-8",
            Self::Iso8859_1 => "ISO-8859-1",
            Self::UsAscii => "US-ASCII",
        }
    }

    /// Encode text into bytes. Characters the charset cannot represent become `?`.
    #[must_use]
    pub fn encode(&self, text: &str) -> Vec<u8> {
        match self {
            Self::Utf8 => text.as_bytes().to_vec(),
            Self::Iso8859_1 => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
                .collect(),
            Self::UsAscii => text
                .chars()
                .map(|c| {
                    u8::try_from(u32::from(c))
                        .ok()
                        .filter(u8::is_ascii)
                        .unwrap_or(b'?')
                })
                .collect(),
        }
    }

    /// Decode bytes into text, replacing invalid sequences.
    #[must_use]
    pub fn decode<'a>(&self, bytes: &'a [u8]) -> Cow<'a, str> {
        match self {
            Self::Utf8 => String::from_utf8_lossy(bytes),
            Self::Iso8859_1 => Cow::Owned(bytes.iter().map(|&b| char::from(b)).collect()),
            Self::UsAscii => Cow::Owned(
                bytes
                    .iter()
                    .map(|&b| if b.is_ascii() { char::from(b) } else { '\u{FFFD}' })
                    .collect(),
            ),
        }
    }
}

impl fmt::Display for Charset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Charset {
    type Err = crate::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Self::Utf8),
            "iso-8859-1" | "iso8859-1" | "latin1" => Ok(Self::Iso8859_1),
            "us-ascii" | "ascii" => Ok(Self::UsAscii),
            _ => Err(crate::Error::invalid_argument(format!(
                "unsupported charset: {s}"
            ))),
        }
    }
}

/// A literal request body: raw bytes plus the charset they were encoded with, if known.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Body {
    data: Bytes,
    charset: Option<Charset>,
}

impl Body {
    /// The empty body.
    pub(crate) const EMPTY: Self = Self {
        data: Bytes::new(),
        charset: None,
    };

    /// Create a body from raw bytes.
    #[must_use]
    pub fn new(data: impl Into<Bytes>, charset: Option<Charset>) -> Self {
        Self {
            data: data.into(),
            charset,
        }
    }

    /// Create an empty body.
    #[must_use]
    pub const fn empty() -> Self {
        Self::EMPTY
    }

    /// Create a body by encoding `text` with `charset`.
    #[must_use]
    pub fn from_text(text: &str, charset: Charset) -> Self {
        Self::new(charset.encode(text), Some(charset))
    }

    /// Body length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the body has no bytes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Raw body bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Body bytes as a cheaply clonable buffer.
    #[must_use]
    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    /// The charset the body was encoded with, if known.
    #[must_use]
    pub const fn charset(&self) -> Option<Charset> {
        self.charset
    }

    /// Decode the body as text. Returns `None` when the charset is unknown.
    #[must_use]
    pub fn as_text(&self) -> Option<Cow<'_, str>> {
        self.charset.map(|charset| charset.decode(&self.data))
    }
}

/// Content type for request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// JSON content type (`application/json`).
    Json,
    /// Form URL-encoded content type (`application/x-www-form-urlencoded`).
    FormUrlEncoded,
    /// Plain text content type (`text/plain`).
    PlainText,
    /// Binary content type (`application/octet-stream`).
    OctetStream,
}

impl ContentType {
    /// Get the MIME type string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Json => "application/json",
            Self::FormUrlEncoded => "application/x-www-form-urlencoded",
            Self::PlainText => "text/plain",
            Self::OctetStream => "application/octet-stream",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Serialize a value to a UTF-8 JSON body.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
///
/// # Example
///
/// ```
/// use pincer_template::to_json;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct User { name: String }
///
/// let user = User { name: "Alice".to_string() };
/// let body = to_json(&user).expect("serialize");
/// assert_eq!(body.as_bytes(), br#"{"name":"Alice"}"#);
/// ```
pub fn to_json<T: Serialize>(value: &T) -> Result<Body> {
    let data = serde_json::to_vec(value)?;
    Ok(Body::new(data, Some(Charset::Utf8)))
}

/// Serialize a value to a form URL-encoded body.
///
/// Uses `serde_html_form` which supports `Vec<T>` for repeated form fields
/// (e.g., `tags=a&tags=b&tags=c`).
///
/// # Errors
///
/// Returns an error if form serialization fails.
///
/// # Example
///
/// ```
/// use pincer_template::to_form;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Login { username: String, password: String }
///
/// let login = Login { username: "alice".to_string(), password: "secret".to_string() };
/// let body = to_form(&login).expect("serialize");
/// assert_eq!(body.as_bytes(), b"username=alice&password=secret");
/// ```
pub fn to_form<T: Serialize>(value: &T) -> Result<Body> {
    let encoded = serde_html_form::to_string(value)?;
    Ok(Body::new(encoded.into_bytes(), Some(Charset::Utf8)))
}
