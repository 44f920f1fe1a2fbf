//! Header templates.

use serde::{Deserialize, Serialize};

use super::{Chunk, Encoding, Template, Unresolved};
use crate::Variables;

/// A header name with one template per value. Values are never percent-encoded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderTemplate {
    name: String,
    values: Vec<Template>,
}

impl HeaderTemplate {
    /// Create a header template from value patterns.
    #[must_use]
    pub fn create<I, S>(name: &str, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            name: name.to_string(),
            values: values.into_iter().map(|value| value_template(value.as_ref())).collect(),
        }
    }

    /// Create a header template whose single value is made of `chunks`.
    #[must_use]
    pub fn from_chunks(name: &str, chunks: Vec<Chunk>) -> Self {
        Self {
            name: name.to_string(),
            values: vec![chunk_template(chunks)],
        }
    }

    /// A new template with `values` added after the existing ones.
    #[must_use]
    pub fn append<I, S>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut appended = self.clone();
        appended
            .values
            .extend(values.into_iter().map(|value| value_template(value.as_ref())));
        appended
    }

    /// A new template with one more value made of `chunks`.
    #[must_use]
    pub fn append_chunks(&self, chunks: Vec<Chunk>) -> Self {
        let mut appended = self.clone();
        appended.values.push(chunk_template(chunks));
        appended
    }

    /// The header name, as given.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The value templates, unexpanded.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.values.iter().map(ToString::to_string).collect()
    }

    /// Variable names referenced by the values.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        self.values
            .iter()
            .flat_map(Template::variables)
            .map(str::to_string)
            .collect()
    }

    /// Expand into `"<Name> <value>, <value>"`.
    ///
    /// Values that expand to nothing are skipped; the result is empty when no
    /// value remains.
    #[must_use]
    pub fn expand(&self, variables: &Variables) -> String {
        let values = self
            .values
            .iter()
            .map(|value| value.expand(variables))
            .filter(|value| !value.is_empty())
            .collect::<Vec<_>>();

        if values.is_empty() {
            return String::new();
        }
        format!("{} {}", self.name, values.join(", "))
    }
}

fn value_template(pattern: &str) -> Template {
    Template::new(pattern, Encoding::None, Unresolved::Remove)
}

fn chunk_template(chunks: Vec<Chunk>) -> Template {
    Template::from_chunks(chunks, Encoding::None, Unresolved::Remove)
}
