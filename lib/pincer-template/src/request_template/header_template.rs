//! Everything of a request template except the body and the uri template:
//! target, fragment, method, queries and headers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::headers::{self, CONTENT_LENGTH, HeaderKey, HeaderTemplates, Headers};
use super::queries::{self, QueryTemplates};
use super::{query_string, uri, variable_names};
use crate::template::{BodyTemplate, Chunk, CollectionFormat, HeaderTemplate, UriTemplate};
use crate::{Error, Method, Result, Variables};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct RequestHeaderTemplate {
    target: Option<String>,
    fragment: Option<String>,
    method: Option<Method>,
    decode_slash: bool,
    queries: QueryTemplates,
    headers: HeaderTemplates,
}

impl Default for RequestHeaderTemplate {
    fn default() -> Self {
        Self::new(true)
    }
}

impl RequestHeaderTemplate {
    pub(crate) fn new(decode_slash: bool) -> Self {
        Self {
            target: None,
            fragment: None,
            method: None,
            decode_slash,
            queries: QueryTemplates::new(),
            headers: HeaderTemplates::new(),
        }
    }

    pub(crate) fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub(crate) fn fragment(&self) -> Option<&str> {
        self.fragment.as_deref()
    }

    pub(crate) const fn method(&self) -> Option<Method> {
        self.method
    }

    pub(crate) fn set_method(&mut self, method: Method) {
        self.method = Some(method);
    }

    pub(crate) const fn decode_slash(&self) -> bool {
        self.decode_slash
    }

    /// Switch the slash policy and rebuild the queries with it.
    pub(crate) fn regenerate_queries(
        &mut self,
        decode_slash: bool,
        collection_format: CollectionFormat,
    ) {
        self.decode_slash = decode_slash;
        self.queries = queries::rebuild(&self.queries, collection_format, decode_slash);
    }

    pub(crate) fn query_map(&self) -> IndexMap<String, Vec<String>> {
        queries::render(&self.queries)
    }

    pub(crate) fn header_map(&self) -> Headers {
        headers::render(&self.headers)
    }

    pub(crate) fn path(&self, uri_template: Option<&UriTemplate>) -> String {
        uri::make_path(self.target(), uri_template)
    }

    pub(crate) fn query_string(&self) -> String {
        query_string::to_query_line(&self.queries)
    }

    /// Path, query string and fragment.
    pub(crate) fn request_url(&self, uri_template: Option<&UriTemplate>) -> String {
        let mut url = self.path(uri_template);
        if !self.queries.is_empty() {
            url.push_str(&self.query_string());
        }
        if let Some(fragment) = self.fragment() {
            url.push_str(fragment);
        }
        url
    }

    pub(crate) fn find_variables(
        &self,
        uri_template: Option<&UriTemplate>,
        body: Option<&BodyTemplate>,
    ) -> Vec<String> {
        variable_names::find_all_variables(uri_template, &self.queries, &self.headers, body)
    }

    pub(crate) fn add_query(
        &mut self,
        name: &str,
        values: &[String],
        collection_format: CollectionFormat,
    ) -> Result<()> {
        queries::merge(
            &mut self.queries,
            name,
            values,
            collection_format,
            self.decode_slash,
        )
    }

    /// Merge every entry. Nothing at all clears the queries.
    ///
    /// Names are checked before anything is merged.
    pub(crate) fn update_queries<I>(
        &mut self,
        entries: I,
        collection_format: CollectionFormat,
    ) -> Result<()>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let entries = entries.into_iter().collect::<Vec<_>>();
        if entries.iter().any(|(name, _)| name.trim().is_empty()) {
            return Err(Error::invalid_argument("query name is required"));
        }
        if entries.is_empty() {
            self.queries.clear();
            return Ok(());
        }
        for (name, values) in entries {
            self.add_query(&name, &values, collection_format)?;
        }
        Ok(())
    }

    pub(crate) fn add_header_chunks(&mut self, name: &str, chunks: Vec<Chunk>) {
        headers::merge_chunks(&mut self.headers, name, chunks);
    }

    pub(crate) fn update_header(&mut self, name: &str, values: Vec<String>) -> Result<()> {
        headers::merge_values(&mut self.headers, name, values)
    }

    pub(crate) fn remove_header(&mut self, name: &str) -> Result<()> {
        self.update_header(name, Vec::new())
    }

    /// Merge every entry. Nothing at all clears the headers.
    ///
    /// Names are checked before anything is merged.
    pub(crate) fn update_headers<I>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, Vec<String>)>,
    {
        let entries = entries.into_iter().collect::<Vec<_>>();
        if entries.iter().any(|(name, _)| name.trim().is_empty()) {
            return Err(Error::invalid_argument("header name is required"));
        }
        if entries.is_empty() {
            self.headers.clear();
            return Ok(());
        }
        for (name, values) in entries {
            self.update_header(&name, values)?;
        }
        Ok(())
    }

    /// Replace `Content-Length`. A zero length removes it.
    pub(crate) fn set_content_length(&mut self, length: usize) {
        let key = HeaderKey::from(CONTENT_LENGTH);
        self.headers.remove(&key);
        if length > 0 {
            self.headers.insert(
                key,
                HeaderTemplate::create(CONTENT_LENGTH, [length.to_string()]),
            );
        }
    }

    /// Normalize a relative uri and split off its query string and fragment.
    ///
    /// Query parameters replace the current ones unless `append` is set. The
    /// returned uri only holds the path part.
    pub(crate) fn make_request_uri(
        &mut self,
        uri: &str,
        append: bool,
        collection_format: CollectionFormat,
    ) -> Result<String> {
        let mut request_uri = uri::normalize_relative(uri)?;

        if let Some(start) = request_uri.find('#') {
            self.fragment = Some(request_uri.split_off(start));
        }
        if let Some(start) = query_string::find_query_start(&request_uri) {
            let query = request_uri.split_off(start);
            let query = query.strip_prefix('?').unwrap_or(&query);
            self.extract_query_templates(query, append, collection_format)?;
        }

        Ok(request_uri)
    }

    fn extract_query_templates(
        &mut self,
        query: &str,
        append: bool,
        collection_format: CollectionFormat,
    ) -> Result<()> {
        let parameters = query_string::extract_query_parameters(query);
        trace!(query, count = parameters.len(), append, "extracted query parameters");
        if !append {
            self.queries.clear();
        }
        for (name, values) in parameters {
            self.add_query(&name, &values, collection_format)?;
        }
        Ok(())
    }

    /// Set the absolute base url. Blank values are ignored.
    ///
    /// Its query string is merged into the queries, its fragment replaces the
    /// current one and a trailing `/` is dropped.
    pub(crate) fn set_target(
        &mut self,
        value: &str,
        collection_format: CollectionFormat,
    ) -> Result<()> {
        if value.trim().is_empty() {
            return Ok(());
        }
        uri::validate_absolute(value)?;

        let (without_fragment, fragment) = match value.split_once('#') {
            Some((head, fragment)) => (head, Some(fragment)),
            None => (value, None),
        };
        let (base, query) = without_fragment
            .split_once('?')
            .unwrap_or((without_fragment, ""));

        if !query.trim().is_empty() {
            self.extract_query_templates(query, true, collection_format)?;
        }
        let base = base.strip_suffix('/').unwrap_or(base);
        debug!(base_url = base, "request target set");
        self.target = Some(base.to_string());
        if let Some(fragment) = fragment {
            self.fragment = Some(format!("#{fragment}"));
        }
        Ok(())
    }

    /// Expand the queries onto `expanded` and drop them from this template.
    pub(crate) fn resolve_uri(&mut self, variables: &Variables, expanded: &str) -> String {
        if self.queries.is_empty() {
            return expanded.to_string();
        }
        let templates = std::mem::take(&mut self.queries);
        queries::resolve(&templates, variables, expanded)
    }

    /// Expand every header in place and render the result.
    ///
    /// Expanded values are stored as literal chunks so they are never
    /// expanded again. Headers that expand to nothing disappear.
    pub(crate) fn resolve_headers(&mut self, variables: &Variables) -> Headers {
        let templates = std::mem::take(&mut self.headers);
        for template in templates.values() {
            let expanded = template.expand(variables);
            let values = expanded
                .split_once(' ')
                .map_or(expanded.as_str(), |(_, values)| values);
            if !values.is_empty() {
                self.add_header_chunks(template.name(), vec![Chunk::literal(values)]);
            }
        }
        self.header_map()
    }
}
