//! Request body templates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Encoding, Template, Unresolved};
use crate::Variables;

const JSON_START_ENCODED: &str = "%7B";
const JSON_END_ENCODED: &str = "%7D";

/// A body template. Values are inserted unencoded and unbound expressions are
/// left in place.
///
/// JSON bodies escape their own braces as `%7B`/`%7D` so they are not taken
/// for expressions; those escapes are restored after expansion.
///
/// ```
/// use pincer_template::{BodyTemplate, Variables};
///
/// let template = BodyTemplate::create(r#"%7B"user": "{name}"%7D"#);
/// let body = template.expand(&Variables::new().with("name", "denominator"));
/// assert_eq!(body, r#"{"user": "denominator"}"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodyTemplate {
    template: Template,
    json: bool,
}

impl BodyTemplate {
    /// Parse a body template.
    #[must_use]
    pub fn create(pattern: &str) -> Self {
        Self {
            template: Template::new(pattern, Encoding::None, Unresolved::Keep),
            json: pattern.starts_with(JSON_START_ENCODED) && pattern.ends_with(JSON_END_ENCODED),
        }
    }

    /// Variable names referenced by the body.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        self.template.variables().map(str::to_string).collect()
    }

    /// Expand the body against `variables`.
    #[must_use]
    pub fn expand(&self, variables: &Variables) -> String {
        let expanded = self.template.expand(variables);
        if self.json {
            expanded
                .replace(JSON_START_ENCODED, "{")
                .replace(JSON_END_ENCODED, "}")
        } else {
            expanded
        }
    }
}

impl fmt::Display for BodyTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.template.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unbound_expressions_are_kept() {
        let template = BodyTemplate::create("hello {name}, from {sender}");
        let variables = Variables::new().with("name", "a&b");
        assert_eq!(template.expand(&variables), "hello a&b, from {sender}");
    }

    #[test]
    fn plain_bodies_keep_escapes() {
        let template = BodyTemplate::create("100%7D");
        assert_eq!(template.expand(&Variables::new()), "100%7D");
    }

    #[test]
    fn json_bodies_restore_braces() {
        let template = BodyTemplate::create(r#"%7B"ids": [{ids}], "nested": %7B"a": 1%7D%7D"#);
        let variables = Variables::new().with("ids", vec!["1", "2"]);
        assert_eq!(
            template.expand(&variables),
            r#"{"ids": [1,2], "nested": {"a": 1}}"#
        );
        assert_eq!(template.variables(), vec!["ids"]);
    }
}
