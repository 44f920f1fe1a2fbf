//! Request path templates.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Encoding, Template, Unresolved};
use crate::Variables;

/// A path-only uri template such as `/users/{id}`.
///
/// Expanded values are path-encoded; `/` is encoded only when `encode_slash`
/// is set. Unbound expressions expand to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriTemplate {
    template: Template,
    encode_slash: bool,
}

impl UriTemplate {
    /// Parse a uri template.
    #[must_use]
    pub fn create(pattern: &str, encode_slash: bool) -> Self {
        Self {
            template: Template::new(
                pattern,
                Encoding::Path { encode_slash },
                Unresolved::Remove,
            ),
            encode_slash,
        }
    }

    /// A new template with `more` appended, keeping the slash policy.
    #[must_use]
    pub fn append(&self, more: &str) -> Self {
        Self::create(&format!("{self}{more}"), self.encode_slash)
    }

    /// Whether `/` in expanded values is percent-encoded.
    #[must_use]
    pub const fn encode_slash(&self) -> bool {
        self.encode_slash
    }

    /// Returns `true` if the template has no chunks.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.template.is_empty()
    }

    /// Variable names referenced by the template.
    #[must_use]
    pub fn variables(&self) -> Vec<String> {
        self.template.variables().map(str::to_string).collect()
    }

    /// Expand the template against `variables`.
    #[must_use]
    pub fn expand(&self, variables: &Variables) -> String {
        self.template.expand(variables)
    }
}

impl fmt::Display for UriTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.template.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expand_path_variables() {
        let template = UriTemplate::create("/users/{id}/files/{path}", false);
        let variables = Variables::new().with("id", 42).with("path", "docs/a b.txt");
        assert_eq!(
            template.expand(&variables),
            "/users/42/files/docs/a%20b.txt"
        );
    }

    #[test]
    fn encode_slash_policy() {
        let template = UriTemplate::create("/files/{path}", true);
        let variables = Variables::new().with("path", "a/b");
        assert_eq!(template.expand(&variables), "/files/a%2Fb");
        assert!(template.encode_slash());
    }

    #[test]
    fn unbound_expressions_are_removed() {
        let template = UriTemplate::create("/users/{id}", false);
        assert_eq!(template.expand(&Variables::new()), "/users/");
    }

    #[test]
    fn append_keeps_policy() {
        let template = UriTemplate::create("/users", true).append("/{id}");
        assert_eq!(template.to_string(), "/users/{id}");
        assert!(template.encode_slash());
        assert_eq!(template.variables(), vec!["id"]);
    }

    #[test]
    fn literal_text_is_encoded_once() {
        let template = UriTemplate::create("/a b/%20", false);
        assert_eq!(template.to_string(), "/a%20b/%20");
        assert_eq!(
            UriTemplate::create(&template.to_string(), false).to_string(),
            "/a%20b/%20"
        );
    }
}
