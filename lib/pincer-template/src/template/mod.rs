//! Expression templates.
//!
//! A template is an ordered sequence of [`Chunk`]s: literal text and `{name}`
//! expressions. Expansion substitutes bound [`Variables`], percent-encoding
//! values according to where the template is used:
//!
//! - [`UriTemplate`] - request path, path encoding, unbound expressions removed
//! - [`QueryTemplate`] - one query parameter, query encoding, unbound values dropped
//! - [`HeaderTemplate`] - one header, no encoding
//! - [`BodyTemplate`] - request body, no encoding, unbound expressions kept

mod body;
mod collection_format;
mod encoding;
mod header;
mod query;
mod uri;

use std::borrow::Cow;
use std::fmt;

use serde::{Deserialize, Serialize};

pub use body::BodyTemplate;
pub use collection_format::CollectionFormat;
pub use header::HeaderTemplate;
pub use query::QueryTemplate;
pub use uri::UriTemplate;

use crate::{Value, Variables};

/// An atomic piece of a template.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chunk {
    /// Literal text, emitted as-is.
    Literal(String),
    /// A variable expression, `{name}` in the template source.
    Expression(String),
}

impl Chunk {
    /// Create a literal chunk.
    #[must_use]
    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    /// Create an expression chunk for the named variable.
    #[must_use]
    pub fn expression(name: impl Into<String>) -> Self {
        Self::Expression(name.into())
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(text) => f.write_str(text),
            Self::Expression(name) => write!(f, "{{{name}}}"),
        }
    }
}

/// How literal text and expanded values are escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Encoding {
    Path { encode_slash: bool },
    Query { encode_slash: bool },
    None,
}

/// What an expression without a binding expands to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum Unresolved {
    /// Nothing.
    Remove,
    /// Its own `{name}` source.
    Keep,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Template {
    chunks: Vec<Chunk>,
    encoding: Encoding,
    unresolved: Unresolved,
}

impl Template {
    /// Parse `pattern`, escaping its literal text for `encoding`.
    pub(crate) fn new(pattern: &str, encoding: Encoding, unresolved: Unresolved) -> Self {
        let chunks = parse(pattern)
            .into_iter()
            .map(|chunk| match chunk {
                Chunk::Literal(text) => Chunk::Literal(encoding::encode_literal(&text, encoding)),
                expression @ Chunk::Expression(_) => expression,
            })
            .collect();

        Self {
            chunks,
            encoding,
            unresolved,
        }
    }

    /// Wrap pre-built chunks. Literal text is used verbatim.
    pub(crate) fn from_chunks(
        chunks: Vec<Chunk>,
        encoding: Encoding,
        unresolved: Unresolved,
    ) -> Self {
        Self {
            chunks,
            encoding,
            unresolved,
        }
    }

    /// Names of the expressions, in template order.
    pub(crate) fn variables(&self) -> impl Iterator<Item = &str> {
        self.chunks.iter().filter_map(|chunk| match chunk {
            Chunk::Expression(name) => Some(name.as_str()),
            Chunk::Literal(_) => None,
        })
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Expand every expression. Multi-valued bindings are comma-joined.
    pub(crate) fn expand(&self, variables: &Variables) -> String {
        self.chunks
            .iter()
            .map(|chunk| match chunk {
                Chunk::Literal(text) => Cow::Borrowed(text.as_str()),
                Chunk::Expression(name) => match variables.get(name) {
                    Some(value) => Cow::Owned(self.encode_value(value)),
                    None => match self.unresolved {
                        Unresolved::Remove => Cow::Borrowed(""),
                        Unresolved::Keep => Cow::Owned(chunk.to_string()),
                    },
                },
            })
            .collect()
    }

    /// Expand into separate values.
    ///
    /// A template made of a single expression yields one value per element of
    /// a multi-valued binding. Otherwise the template yields at most one value,
    /// and nothing if any of its expressions is unbound. Empty results are
    /// dropped.
    pub(crate) fn expand_values(&self, variables: &Variables) -> Vec<String> {
        let values = if let [Chunk::Expression(name)] = self.chunks.as_slice() {
            match variables.get(name) {
                None => Vec::new(),
                Some(Value::Single(value)) => vec![self.encode(value)],
                Some(Value::Multiple(values)) => {
                    values.iter().map(|value| self.encode(value)).collect()
                }
            }
        } else if self.variables().all(|name| variables.contains(name)) {
            vec![self.expand(variables)]
        } else {
            Vec::new()
        };

        values.into_iter().filter(|value| !value.is_empty()).collect()
    }

    fn encode_value(&self, value: &Value) -> String {
        match value {
            Value::Single(value) => self.encode(value),
            Value::Multiple(values) => values
                .iter()
                .map(|value| self.encode(value))
                .collect::<Vec<_>>()
                .join(","),
        }
    }

    fn encode(&self, value: &str) -> String {
        encoding::encode_value(value, self.encoding)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.chunks.iter().try_for_each(|chunk| chunk.fmt(f))
    }
}

/// Split a pattern into literal and expression chunks.
///
/// An unterminated `{`, an empty `{}`, or a `{` nested inside an expression is
/// literal text.
pub(crate) fn parse(pattern: &str) -> Vec<Chunk> {
    let mut chunks = Vec::new();
    let mut literal = String::new();
    let mut rest = pattern;

    while let Some((head, after_open)) = rest.split_once('{') {
        literal.push_str(head);
        match after_open.split_once('}') {
            Some((name, after_close)) if !name.is_empty() && !name.contains('{') => {
                if !literal.is_empty() {
                    chunks.push(Chunk::Literal(std::mem::take(&mut literal)));
                }
                chunks.push(Chunk::Expression(name.to_string()));
                rest = after_close;
            }
            _ => {
                literal.push('{');
                rest = after_open;
            }
        }
    }

    literal.push_str(rest);
    if !literal.is_empty() {
        chunks.push(Chunk::Literal(literal));
    }

    chunks
}
