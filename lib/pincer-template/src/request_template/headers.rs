//! Header merge policy and the rendered header map.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::template::{Chunk, HeaderTemplate};
use crate::{Error, Result};

pub(crate) const CONTENT_TYPE: &str = "Content-Type";
pub(crate) const CONTENT_LENGTH: &str = "Content-Length";

/// A header name that compares and orders case-insensitively but keeps the
/// case it was first given with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeaderKey(String);

impl HeaderKey {
    /// The header name as given.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl PartialEq for HeaderKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for HeaderKey {}

impl PartialOrd for HeaderKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HeaderKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let lower = |key: &Self| {
            key.0
                .bytes()
                .map(|b| b.to_ascii_lowercase())
                .collect::<Vec<_>>()
        };
        lower(self).cmp(&lower(other))
    }
}

impl From<&str> for HeaderKey {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for HeaderKey {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl AsRef<str> for HeaderKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Rendered request headers, ordered by name case-insensitively.
///
/// ```
/// use pincer_template::RequestTemplate;
///
/// let mut template = RequestTemplate::new();
/// template.header("Accept", ["application/json"])?;
/// let headers = template.headers();
/// assert_eq!(headers.first("accept"), Some("application/json"));
/// # Ok::<(), pincer_template::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Headers(BTreeMap<HeaderKey, Vec<String>>);

impl Headers {
    /// Create an empty header map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All values of a header, looked up case-insensitively.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&[String]> {
        self.0.get(&HeaderKey::from(name)).map(Vec::as_slice)
    }

    /// The first value of a header, looked up case-insensitively.
    #[must_use]
    pub fn first(&self, name: &str) -> Option<&str> {
        self.get(name)
            .and_then(<[String]>::first)
            .map(String::as_str)
    }

    /// Returns `true` if the header is present.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(&HeaderKey::from(name))
    }

    /// Number of distinct headers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if there are no headers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over `(name, values)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0
            .iter()
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    pub(crate) fn insert(&mut self, name: &str, values: Vec<String>) {
        self.0.insert(HeaderKey::from(name), values);
    }
}

/// Header templates keyed case-insensitively.
pub(crate) type HeaderTemplates = BTreeMap<HeaderKey, HeaderTemplate>;

/// Add a value made of `chunks` to `name`, creating the header if needed.
/// No chunks removes the header.
pub(crate) fn merge_chunks(headers: &mut HeaderTemplates, name: &str, chunks: Vec<Chunk>) {
    let key = HeaderKey::from(name);
    if chunks.is_empty() {
        headers.remove(&key);
        return;
    }

    match headers.entry(key) {
        Entry::Vacant(entry) => {
            entry.insert(HeaderTemplate::from_chunks(name, chunks));
        }
        Entry::Occupied(mut entry) => {
            let appended = entry.get().append_chunks(chunks);
            entry.insert(appended);
        }
    }
}

/// Add `values` to `name`, creating the header if needed.
///
/// No values removes the header. `Content-Type` is single-valued: it is
/// always replaced, and only its first value is kept.
pub(crate) fn merge_values(
    headers: &mut HeaderTemplates,
    name: &str,
    values: Vec<String>,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_argument("header name is required"));
    }

    let key = HeaderKey::from(name);
    if values.is_empty() {
        headers.remove(&key);
        return Ok(());
    }

    if name.eq_ignore_ascii_case(CONTENT_TYPE) {
        headers.remove(&key);
        headers.insert(key, HeaderTemplate::create(name, values.into_iter().take(1)));
        return Ok(());
    }

    trace!(header = name, count = values.len(), "merging header values");
    match headers.entry(key) {
        Entry::Vacant(entry) => {
            entry.insert(HeaderTemplate::create(name, values));
        }
        Entry::Occupied(mut entry) => {
            let appended = entry.get().append(values);
            entry.insert(appended);
        }
    }
    Ok(())
}

/// Render the unexpanded values. Headers without a non-empty value are omitted.
pub(crate) fn render(headers: &HeaderTemplates) -> Headers {
    let mut rendered = Headers::new();
    for (key, template) in headers {
        let values = template
            .values()
            .into_iter()
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>();
        if !values.is_empty() {
            rendered.insert(key.as_str(), values);
        }
    }
    rendered
}
