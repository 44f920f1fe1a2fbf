//! Query parameter templates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{CollectionFormat, Encoding, Template, Unresolved};
use crate::Variables;

/// A single query parameter: a name template and its value templates.
///
/// A parameter without values is *pure* and renders as its bare name
/// (`?flag`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryTemplate {
    name: Template,
    values: Vec<Template>,
    collection_format: CollectionFormat,
}

impl QueryTemplate {
    /// Create a query template. Blank values are discarded.
    #[must_use]
    pub fn create<I, S>(
        name: &str,
        values: I,
        collection_format: CollectionFormat,
        decode_slash: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let encoding = Encoding::Query {
            encode_slash: !decode_slash,
        };
        let values = values
            .into_iter()
            .filter(|value| !value.as_ref().trim().is_empty())
            .map(|value| Template::new(value.as_ref(), encoding, Unresolved::Remove))
            .collect();

        Self {
            name: Template::new(name, encoding, Unresolved::Remove),
            values,
            collection_format,
        }
    }

    /// A new template holding the existing values followed by `values`.
    #[must_use]
    pub fn append<I, S>(
        &self,
        values: I,
        collection_format: CollectionFormat,
        decode_slash: bool,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let merged = self
            .values()
            .into_iter()
            .chain(values.into_iter().map(|value| value.as_ref().to_string()));
        Self::create(&self.name(), merged, collection_format, decode_slash)
    }

    /// The parameter name, unexpanded.
    #[must_use]
    pub fn name(&self) -> String {
        self.name.to_string()
    }

    /// The value templates, unexpanded.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.values.iter().map(ToString::to_string).collect()
    }

    /// The collection format used to render multiple values.
    #[must_use]
    pub const fn collection_format(&self) -> CollectionFormat {
        self.collection_format
    }

    /// Returns `true` if the parameter has no values.
    #[must_use]
    pub fn is_pure(&self) -> bool {
        self.values.is_empty()
    }

    /// Variable names referenced by the name and the values.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        self.name
            .variables()
            .chain(self.values.iter().flat_map(Template::variables))
            .map(str::to_string)
            .collect()
    }

    /// Expand into a query string fragment such as `tags=a&tags=b`.
    ///
    /// Values that are unbound or expand to nothing are dropped. Returns an
    /// empty string when no value remains.
    #[must_use]
    pub fn expand(&self, variables: &Variables) -> String {
        let name = self.name.expand(variables);
        if self.is_pure() {
            return name;
        }

        let values = self
            .values
            .iter()
            .flat_map(|value| value.expand_values(variables))
            .collect::<Vec<_>>();
        if values.is_empty() {
            return String::new();
        }

        self.collection_format.join(&name, &values)
    }
}

impl fmt::Display for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pure() {
            return self.name.fmt(f);
        }
        f.write_str(&self.collection_format.join(&self.name(), &self.values()))
    }
}
