//! Resolved, immutable HTTP requests.
//!
//! A [`Request`] is produced by [`RequestTemplate::request`](crate::RequestTemplate::request)
//! once every template has been expanded.
//!
//! # Example
//!
//! ```
//! use pincer_template::{Method, RequestTemplate, Variables};
//!
//! let mut template = RequestTemplate::new();
//! template.method(Method::Get).uri("/users/{id}")?;
//!
//! let request = template.resolve(&Variables::new().with("id", 42))?.request()?;
//! assert_eq!(request.method(), Method::Get);
//! assert_eq!(request.url(), "/users/42");
//! # Ok::<(), pincer_template::Error>(())
//! ```

use std::borrow::Cow;
use std::fmt;

use bytes::Bytes;

use crate::{Body, Charset, Error, Headers, Method, Result};

/// An HTTP request with method, url, headers and body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    url: String,
    headers: Headers,
    body: Body,
}

impl Request {
    pub(crate) fn new(method: Method, url: String, headers: Headers, body: Body) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request url, absolute when a target was set.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub const fn headers(&self) -> &Headers {
        &self.headers
    }

    /// First value of a header, looked up case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.first(name)
    }

    /// Request body, empty when none was set.
    #[must_use]
    pub const fn body(&self) -> &Body {
        &self.body
    }

    /// Charset of the body, if known.
    #[must_use]
    pub const fn charset(&self) -> Option<Charset> {
        self.body.charset()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, String, Headers, Body) {
        (self.method, self.url, self.headers, self.body)
    }

    /// Parse the url.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidUri`] if the url is relative or malformed.
    pub fn parsed_url(&self) -> Result<url::Url> {
        url::Url::parse(&self.url).map_err(|source| Error::invalid_uri(&self.url, source))
    }

    /// Convert into an [`http::Request`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Http`] if the url or a header is not valid for `http`.
    pub fn to_http(&self) -> Result<http::Request<Bytes>> {
        let mut builder = http::Request::builder()
            .method(http::Method::from(self.method))
            .uri(self.url.as_str());
        for (name, values) in self.headers.iter() {
            for value in values {
                builder = builder.header(name, value.as_str());
            }
        }
        Ok(builder.body(self.body.bytes())?)
    }
}

/// Write the textual form of a request: request line, headers, blank line,
/// then the body (if any).
pub(crate) fn write_request(
    f: &mut fmt::Formatter<'_>,
    method: Method,
    url: &str,
    headers: &Headers,
    body: Option<Cow<'_, str>>,
) -> fmt::Result {
    writeln!(f, "{method} {url} HTTP/1.1")?;
    for (name, values) in headers.iter() {
        writeln!(f, "{name}: {}", values.join(", "))?;
    }
    if let Some(body) = body {
        write!(f, "\n{body}")?;
    }
    Ok(())
}

/// Text preview of a body: `None` when empty, `"Binary data"` when not text.
pub(crate) fn body_preview(body: &Body) -> Option<Cow<'_, str>> {
    if body.is_empty() {
        return None;
    }
    Some(body.as_text().unwrap_or(Cow::Borrowed("Binary data")))
}

impl fmt::Display for Request {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_request(
            f,
            self.method,
            &self.url,
            &self.headers,
            body_preview(&self.body),
        )
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    fn sample() -> Request {
        let mut headers = Headers::new();
        headers.insert("Accept", vec!["application/json".to_string()]);
        headers.insert("X-Tags", vec!["a".to_string(), "b".to_string()]);
        Request::new(
            Method::Post,
            "https://api.example.com/users?page=2".to_string(),
            headers,
            Body::from_text("{\"name\":\"ada\"}", Charset::Utf8),
        )
    }

    #[test]
    fn accessors() {
        let request = sample();
        check!(request.method() == Method::Post);
        check!(request.header("accept") == Some("application/json"));
        check!(request.charset() == Some(Charset::Utf8));
        check!(request.body().len() == 14);
    }

    #[test]
    fn parse_url() {
        let_assert!(Ok(url) = sample().parsed_url());
        check!(url.host_str() == Some("api.example.com"));
        check!(url.query() == Some("page=2"));

        let relative = Request::new(
            Method::Get,
            "/users".to_string(),
            Headers::new(),
            Body::empty(),
        );
        let_assert!(Err(err) = relative.parsed_url());
        check!(err.is_invalid_uri());
    }

    #[test]
    fn convert_to_http() {
        let_assert!(Ok(request) = sample().to_http());
        check!(request.method() == http::Method::POST);
        check!(request.uri() == "https://api.example.com/users?page=2");
        check!(request.headers().get_all("x-tags").iter().count() == 2);
        check!(request.body().as_ref() == b"{\"name\":\"ada\"}");
    }

    #[test]
    fn display() {
        insta::assert_snapshot!(sample().to_string(), @r#"
        POST https://api.example.com/users?page=2 HTTP/1.1
        Accept: application/json
        X-Tags: a, b

        {"name":"ada"}
        "#);
    }

    #[test]
    fn display_binary_and_empty_bodies() {
        let binary = Request::new(
            Method::Put,
            "/blob".to_string(),
            Headers::new(),
            Body::new(vec![0xff, 0xfe], None),
        );
        check!(binary.to_string() == "PUT /blob HTTP/1.1\n\nBinary data");

        let empty = Request::new(Method::Get, "/".to_string(), Headers::new(), Body::empty());
        check!(empty.to_string() == "GET / HTTP/1.1\n");
    }
}
