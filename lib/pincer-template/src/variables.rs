//! Variable bindings used to expand templates.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A bound variable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    /// A single value.
    Single(String),
    /// A multi-valued variable, expanded according to the collection format.
    Multiple(Vec<String>),
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Single(value.to_string())
    }
}

impl From<Vec<String>> for Value {
    fn from(values: Vec<String>) -> Self {
        Self::Multiple(values)
    }
}

impl From<Vec<&str>> for Value {
    fn from(values: Vec<&str>) -> Self {
        Self::Multiple(values.into_iter().map(str::to_string).collect())
    }
}

macro_rules! impl_value_from_display {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::Single(value.to_string())
                }
            }
        )*
    };
}

impl_value_from_display!(bool, char, i32, i64, u8, u16, u32, u64, usize, f64);

/// Variable name to value bindings.
///
/// # Example
///
/// ```
/// use pincer_template::Variables;
///
/// let variables = Variables::new()
///     .with("id", 42)
///     .with("tags", vec!["a", "b"]);
/// assert!(variables.contains("id"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Variables(HashMap<String, Value>);

impl Variables {
    /// Create an empty set of bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a variable, replacing any previous value.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind a variable, returning the previous value if any.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(name.into(), value.into())
    }

    /// Look up a variable.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Returns `true` if `name` is bound.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Number of bound variables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Build bindings from any serializable struct or map.
    ///
    /// Strings, numbers and booleans become single values, arrays become
    /// multiple values, `null` leaves the variable unbound, and nested objects
    /// are bound as compact JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or if `value` does not
    /// serialize to a map.
    ///
    /// # Example
    ///
    /// ```
    /// use pincer_template::{Value, Variables};
    /// use serde::Serialize;
    ///
    /// #[derive(Serialize)]
    /// struct Search { q: String, page: Option<u32>, tags: Vec<String> }
    ///
    /// let search = Search { q: "rust".to_string(), page: None, tags: vec!["http".to_string()] };
    /// let variables = Variables::from_serialize(&search).expect("serialize");
    /// assert_eq!(variables.get("q"), Some(&Value::Single("rust".to_string())));
    /// assert!(!variables.contains("page"));
    /// ```
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        let serde_json::Value::Object(fields) = serde_json::to_value(value)? else {
            return Err(Error::invalid_argument(
                "variables must serialize to a map of named values",
            ));
        };

        let bindings = fields
            .into_iter()
            .filter_map(|(name, value)| match value {
                serde_json::Value::Null => None,
                serde_json::Value::Array(items) => {
                    let values = items.iter().filter_map(scalar_text).collect::<Vec<_>>();
                    Some((name, Value::Multiple(values)))
                }
                other => scalar_text(&other).map(|text| (name, Value::Single(text))),
            })
            .collect();

        Ok(Self(bindings))
    }
}

fn scalar_text(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(text) => Some(text.clone()),
        other => Some(other.to_string()),
    }
}

impl<K, V> FromIterator<(K, V)> for Variables
where
    K: Into<String>,
    V: Into<Value>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

impl<'a> IntoIterator for &'a Variables {
    type Item = (&'a String, &'a Value);
    type IntoIter = std::collections::hash_map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
