//! Request templates: the mutable prototype of an HTTP request.
//!
//! A [`RequestTemplate`] is built once per client operation. Each call
//! resolves the prototype against fresh [`Variables`] into a new, fully
//! literal template and materializes it as a [`Request`].
//!
//! ```
//! use pincer_template::{Method, RequestTemplate, Variables};
//!
//! let mut prototype = RequestTemplate::new();
//! prototype
//!     .method(Method::Get)
//!     .target("https://api.example.com")?
//!     .uri("/users/{id}")?
//!     .query("fields", ["{fields}"])?
//!     .header("Accept", ["application/json"])?;
//!
//! let variables = Variables::new()
//!     .with("id", 42)
//!     .with("fields", vec!["name", "email"]);
//! let request = prototype.resolve(&variables)?.request()?;
//!
//! assert_eq!(
//!     request.url(),
//!     "https://api.example.com/users/42?fields=name&fields=email"
//! );
//! assert_eq!(request.header("accept"), Some("application/json"));
//! # Ok::<(), pincer_template::Error>(())
//! ```

mod body_template;
mod header_template;
mod headers;
mod queries;
mod query_string;
mod uri;
mod variable_names;

use std::fmt;

use bytes::Bytes;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use self::body_template::RequestBody;
use self::header_template::RequestHeaderTemplate;
pub use self::headers::{HeaderKey, Headers};
pub(crate) use self::uri::{is_absolute, validate_absolute};
use crate::config::TemplateConfig;
use crate::method_metadata::MethodMetadata;
use crate::request::{body_preview, write_request};
use crate::template::{CollectionFormat, UriTemplate};
use crate::{Body, Charset, ContentType, Error, Method, Request, Result, Target, Variables};

/// A request prototype whose uri, queries, headers and body may hold
/// `{variable}` expressions.
///
/// Setters mutate in place and return `&mut Self` for chaining; the fallible
/// ones validate before changing anything.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestTemplate {
    header: RequestHeaderTemplate,
    body: RequestBody,
    uri_template: Option<UriTemplate>,
    charset: Charset,
    collection_format: CollectionFormat,
    resolved: bool,
    method_metadata: Option<MethodMetadata>,
    target_ref: Option<Target>,
}

impl Default for RequestTemplate {
    fn default() -> Self {
        Self::with_config(&TemplateConfig::default())
    }
}

impl RequestTemplate {
    /// Create an empty template with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty template seeded from `config`.
    #[must_use]
    pub fn with_config(config: &TemplateConfig) -> Self {
        Self {
            header: RequestHeaderTemplate::new(config.decode_slash),
            body: RequestBody::default(),
            uri_template: None,
            charset: config.charset,
            collection_format: config.collection_format,
            resolved: false,
            method_metadata: None,
            target_ref: None,
        }
    }

    /// An unresolved, independent copy of `prototype`.
    #[must_use]
    pub fn from_prototype(prototype: &Self) -> Self {
        Self {
            resolved: false,
            ..prototype.clone()
        }
    }

    /// Expand every template against `variables` into a new, resolved
    /// template. `self` is left untouched and can be resolved again.
    ///
    /// Unbound variables expand to nothing in the uri, queries and headers,
    /// and stay as `{name}` in a body template.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if the expanded uri is absolute.
    pub fn resolve(&self, variables: &Variables) -> Result<Self> {
        let mut resolved = Self::from_prototype(self);

        let uri_template = uri::generate_template(self.uri_template.as_ref(), self.decodes_slash());
        let expanded = uri_template.expand(variables);
        let uri = resolved.header.resolve_uri(variables, &expanded);
        // Expanded values are already rendered in their own format.
        resolved.set_uri(&uri, false, CollectionFormat::Exploded)?;

        resolved.header.resolve_headers(variables);

        if let Some(text) = self.body.resolve(variables) {
            let body = Body::from_text(&text, resolved.charset);
            resolved.body(body);
        }

        resolved.resolved = true;
        debug!(
            url = %resolved.url(),
            variables = variables.len(),
            "resolved request template"
        );
        Ok(resolved)
    }

    /// Materialize the request. A template without a method sends `GET`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`] if the template has not been resolved.
    pub fn request(&self) -> Result<Request> {
        if !self.resolved {
            return Err(Error::illegal_state("template has not been resolved"));
        }
        Ok(Request::new(
            self.header.method().unwrap_or(Method::Get),
            self.url(),
            self.headers(),
            self.body.body().clone(),
        ))
    }

    /// Whether this template is the output of [`resolve`](Self::resolve).
    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    // Method

    /// Set the HTTP method.
    pub fn method(&mut self, method: Method) -> &mut Self {
        self.header.set_method(method);
        self
    }

    /// Set the HTTP method from its name, e.g. `"PATCH"`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] for an unknown method.
    pub fn method_str(&mut self, method: &str) -> Result<&mut Self> {
        let method = method.parse::<Method>()?;
        Ok(self.method(method))
    }

    /// The HTTP method, if set.
    #[must_use]
    pub const fn http_method(&self) -> Option<Method> {
        self.header.method()
    }

    // Encoding policy

    /// Set whether `/` in expanded values stays as is. Existing uri and query
    /// templates are rebuilt with the new policy.
    pub fn decode_slash(&mut self, decode_slash: bool) -> &mut Self {
        self.header
            .regenerate_queries(decode_slash, self.collection_format);
        self.uri_template = self
            .uri_template
            .as_ref()
            .map(|template| UriTemplate::create(&template.to_string(), !decode_slash));
        self
    }

    /// Whether `/` in expanded values stays as is.
    #[must_use]
    pub const fn decodes_slash(&self) -> bool {
        self.header.decode_slash()
    }

    /// Set the collection format used by queries added from now on.
    pub fn collection_format(&mut self, collection_format: CollectionFormat) -> &mut Self {
        self.collection_format = collection_format;
        self
    }

    /// The collection format used by new queries.
    #[must_use]
    pub const fn current_collection_format(&self) -> CollectionFormat {
        self.collection_format
    }

    // Uri and target

    /// Replace the uri.
    ///
    /// A query string in `uri` replaces the current queries; without one the
    /// queries are kept. A `#fragment` replaces the current fragment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `uri` is absolute.
    pub fn uri(&mut self, uri: &str) -> Result<&mut Self> {
        self.set_uri(uri, false, self.collection_format)?;
        Ok(self)
    }

    /// Append to the uri. Query parameters in `uri` are merged into the
    /// current ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `uri` is absolute.
    pub fn append_uri(&mut self, uri: &str) -> Result<&mut Self> {
        self.set_uri(uri, true, self.collection_format)?;
        Ok(self)
    }

    fn set_uri(
        &mut self,
        uri: &str,
        append: bool,
        collection_format: CollectionFormat,
    ) -> Result<()> {
        let request_uri = self
            .header
            .make_request_uri(uri, append, collection_format)?;
        self.uri_template = Some(uri::resolve_uri_template(
            self.uri_template.as_ref(),
            &request_uri,
            append,
            self.decodes_slash(),
        ));
        Ok(())
    }

    /// Set the absolute base url, e.g. `https://api.example.com/v1`.
    ///
    /// Blank values are ignored. Query parameters of the target are merged
    /// into the current ones.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `target` is not absolute and
    /// [`Error::InvalidUri`] if it does not parse or holds characters that
    /// must be percent-encoded.
    pub fn target(&mut self, target: &str) -> Result<&mut Self> {
        self.header.set_target(target, self.collection_format)?;
        Ok(self)
    }

    /// The full url: target, path, query string and fragment.
    #[must_use]
    pub fn url(&self) -> String {
        self.header.request_url(self.uri_template.as_ref())
    }

    /// The target followed by the uri, without query string. Defaults to `/`.
    #[must_use]
    pub fn path(&self) -> String {
        self.header.path(self.uri_template.as_ref())
    }

    /// The query string with its leading `?`, or an empty string.
    #[must_use]
    pub fn query_line(&self) -> String {
        self.header.query_string()
    }

    // Queries

    /// Add values to a query parameter using the current collection format.
    ///
    /// Values accumulate across calls; no values removes the parameter.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn query<I, S>(&mut self, name: &str, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.query_with_format(name, values, self.collection_format)
    }

    /// Add values to a query parameter with an explicit collection format.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn query_with_format<I, S>(
        &mut self,
        name: &str,
        values: I,
        collection_format: CollectionFormat,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect::<Vec<_>>();
        self.header.add_query(name, &values, collection_format)?;
        Ok(self)
    }

    /// Merge every entry into the queries. An empty input clears them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a name is blank.
    pub fn set_queries<I>(&mut self, queries: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        self.header.update_queries(queries, self.collection_format)?;
        Ok(self)
    }

    /// Unexpanded query values by name, in insertion order.
    #[must_use]
    pub fn queries(&self) -> IndexMap<String, Vec<String>> {
        self.header.query_map()
    }

    // Headers

    /// Add values to a header. Values accumulate across calls, except for
    /// `Content-Type` which is replaced. No values removes the header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn header<I, S>(&mut self, name: &str, values: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let values = values.into_iter().map(Into::into).collect();
        self.header.update_header(name, values)?;
        Ok(self)
    }

    /// Remove a header.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `name` is blank.
    pub fn remove_header(&mut self, name: &str) -> Result<&mut Self> {
        self.header.remove_header(name)?;
        Ok(self)
    }

    /// Merge every entry into the headers. An empty input clears them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if a name is blank.
    pub fn set_headers<I>(&mut self, headers: I) -> Result<&mut Self>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        self.header.update_headers(headers)?;
        Ok(self)
    }

    /// Unexpanded header values.
    #[must_use]
    pub fn headers(&self) -> Headers {
        self.header.header_map()
    }

    // Body

    /// Set a literal body and its `Content-Length`. Replaces any body
    /// template.
    pub fn body(&mut self, body: Body) -> &mut Self {
        let length = body.len();
        self.body.update_body(body);
        self.header.set_content_length(length);
        self
    }

    /// Set a text body encoded with the template charset.
    pub fn body_text(&mut self, text: &str) -> &mut Self {
        self.body(Body::from_text(text, self.charset))
    }

    /// Set a binary body.
    pub fn body_bytes(&mut self, data: impl Into<Bytes>, charset: Option<Charset>) -> &mut Self {
        self.body(Body::new(data, charset))
    }

    /// Serialize `value` as a JSON body and set `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] if serialization fails.
    pub fn body_json<T: Serialize>(&mut self, value: &T) -> Result<&mut Self> {
        let body = crate::to_json(value)?;
        self.header
            .update_header(headers::CONTENT_TYPE, vec![ContentType::Json.to_string()])?;
        Ok(self.body(body))
    }

    /// Serialize `value` as a url-encoded form body and set `Content-Type`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Form`] if serialization fails.
    pub fn body_form<T: Serialize>(&mut self, value: &T) -> Result<&mut Self> {
        let body = crate::to_form(value)?;
        self.header.update_header(
            headers::CONTENT_TYPE,
            vec![ContentType::FormUrlEncoded.to_string()],
        )?;
        Ok(self.body(body))
    }

    /// Set a body template, expanded on [`resolve`](Self::resolve). Replaces
    /// any literal body.
    pub fn body_template(&mut self, pattern: &str) -> &mut Self {
        self.body.specify_template(pattern);
        self.header.set_content_length(0);
        self
    }

    /// Set a body template and the charset its expansion is encoded with.
    pub fn body_template_with_charset(&mut self, pattern: &str, charset: Charset) -> &mut Self {
        self.charset = charset;
        self.body_template(pattern)
    }

    /// The body template, unexpanded.
    #[must_use]
    pub fn unresolved_body_template(&self) -> Option<String> {
        self.body.unresolved_template()
    }

    /// The literal body. Empty while a body template is set.
    #[must_use]
    pub fn request_body(&self) -> &Body {
        self.body.body()
    }

    /// The literal body bytes.
    #[must_use]
    pub fn body_data(&self) -> &[u8] {
        self.body.body().as_bytes()
    }

    /// Charset of the literal body, or of the template.
    #[must_use]
    pub fn request_charset(&self) -> Charset {
        self.body.charset(self.charset)
    }

    // Variables

    /// Every variable referenced by the uri, queries, headers and body, in
    /// that order. Duplicates are kept.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        self.header
            .find_variables(self.uri_template.as_ref(), self.body.template())
    }

    /// The referenced variables, each listed once.
    #[must_use]
    pub fn request_variables(&self) -> Vec<String> {
        let mut unique = Vec::new();
        for name in self.variables() {
            if !unique.contains(&name) {
                unique.push(name);
            }
        }
        unique
    }

    /// Returns `true` if `name` is referenced anywhere in the template.
    #[must_use]
    pub fn has_request_variable(&self, name: &str) -> bool {
        self.variables().iter().any(|variable| variable == name)
    }

    // Context

    /// Attach metadata about the declaring operation.
    pub fn set_method_metadata(&mut self, metadata: MethodMetadata) -> &mut Self {
        self.method_metadata = Some(metadata);
        self
    }

    /// Metadata about the declaring operation.
    #[must_use]
    pub const fn method_metadata(&self) -> Option<&MethodMetadata> {
        self.method_metadata.as_ref()
    }

    /// Attach the target this template is sent to.
    pub fn set_target_ref(&mut self, target: Target) -> &mut Self {
        self.target_ref = Some(target);
        self
    }

    /// The target this template is sent to.
    #[must_use]
    pub const fn target_ref(&self) -> Option<&Target> {
        self.target_ref.as_ref()
    }
}

impl fmt::Display for RequestTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let method = self.header.method().unwrap_or(Method::Get);
        let body = match self.body.unresolved_template() {
            Some(template) => Some(template.into()),
            None => body_preview(self.body.body()),
        };
        write_request(f, method, &self.url(), &self.headers(), body)
    }
}
