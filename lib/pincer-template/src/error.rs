//! Error types for pincer templates.

use derive_more::{Display, Error, From};

/// Main error type for template operations.
///
/// Every failure is raised by the call that violates the contract, before the
/// template is mutated.
#[derive(Debug, Display, Error, From)]
pub enum Error {
    /// A required argument is missing or has the wrong shape.
    ///
    /// Raised for blank names, a relative `target`, an absolute `uri`, or an
    /// unknown HTTP method token.
    #[display("invalid argument: {_0}")]
    #[from(skip)]
    InvalidArgument(#[error(not(source))] String),

    /// A target or uri could not be parsed.
    #[display("invalid URI '{uri}': {source}")]
    #[from(skip)]
    InvalidUri {
        /// The rejected value.
        uri: String,
        /// Why the value was rejected.
        source: UriError,
    },

    /// The operation is not legal in the current template state.
    #[display("illegal state: {_0}")]
    #[from(skip)]
    IllegalState(#[error(not(source))] String),

    /// JSON serialization error.
    #[display("JSON serialization error: {_0}")]
    #[from]
    Json(serde_json::Error),

    /// Form URL-encoded serialization error.
    #[display("form serialization error: {_0}")]
    #[from]
    Form(serde_html_form::ser::Error),

    /// Conversion into an `http::Request` failed.
    #[display("HTTP conversion error: {_0}")]
    #[from]
    Http(http::Error),
}

/// Why a uri was rejected.
#[derive(Debug, Display, Error, From)]
pub enum UriError {
    /// The value does not parse as a url.
    #[display("{_0}")]
    #[from]
    Parse(url::ParseError),

    /// The value holds a character a url must carry percent-encoded.
    #[display("illegal character {character:?} at index {index}")]
    #[from(skip)]
    IllegalCharacter {
        /// The offending character.
        character: char,
        /// Byte offset of the character.
        index: usize,
    },
}

/// Result type alias using [`crate::Error`].
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Create an invalid URI error wrapping the parse failure.
    #[must_use]
    pub fn invalid_uri(uri: impl Into<String>, source: impl Into<UriError>) -> Self {
        Self::InvalidUri {
            uri: uri.into(),
            source: source.into(),
        }
    }

    /// Create an illegal state error.
    #[must_use]
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState(message.into())
    }

    /// Returns `true` if this is an invalid argument error.
    #[must_use]
    pub const fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument(_))
    }

    /// Returns `true` if this is an invalid URI error.
    #[must_use]
    pub const fn is_invalid_uri(&self) -> bool {
        matches!(self, Self::InvalidUri { .. })
    }

    /// Returns `true` if this is an illegal state error.
    #[must_use]
    pub const fn is_illegal_state(&self) -> bool {
        matches!(self, Self::IllegalState(_))
    }
}
