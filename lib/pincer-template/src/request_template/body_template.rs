use serde::{Deserialize, Serialize};

use crate::template::BodyTemplate;
use crate::{Body, Charset, Variables};

static EMPTY_BODY: Body = Body::EMPTY;

/// The body part of a request template: a literal body or a body template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) enum RequestBody {
    Literal(Body),
    Template(BodyTemplate),
}

impl Default for RequestBody {
    fn default() -> Self {
        Self::Literal(Body::empty())
    }
}

impl RequestBody {
    pub(crate) fn template(&self) -> Option<&BodyTemplate> {
        match self {
            Self::Template(template) => Some(template),
            Self::Literal(_) => None,
        }
    }

    /// The literal body. Empty while a template is set.
    pub(crate) fn body(&self) -> &Body {
        match self {
            Self::Literal(body) => body,
            Self::Template(_) => &EMPTY_BODY,
        }
    }

    /// The charset of a literal body, or `default`.
    pub(crate) fn charset(&self, default: Charset) -> Charset {
        match self {
            Self::Literal(body) => body.charset().unwrap_or(default),
            Self::Template(_) => default,
        }
    }

    pub(crate) fn update_body(&mut self, body: Body) {
        *self = Self::Literal(body);
    }

    pub(crate) fn specify_template(&mut self, pattern: &str) {
        *self = Self::Template(BodyTemplate::create(pattern));
    }

    pub(crate) fn unresolved_template(&self) -> Option<String> {
        self.template().map(ToString::to_string)
    }

    /// Expand the template, if any.
    pub(crate) fn resolve(&self, variables: &Variables) -> Option<String> {
        self.template().map(|template| template.expand(variables))
    }
}

#[cfg(test)]
mod tests {
    use assert2::{check, let_assert};

    use super::*;

    #[test]
    fn template_hides_the_literal_body() {
        let mut body = RequestBody::default();
        body.update_body(Body::from_text("hello", Charset::Utf8));
        check!(body.body().as_bytes() == b"hello");
        check!(body.unresolved_template() == None);

        body.specify_template("hi {name}");
        check!(body.body().is_empty());
        check!(body.unresolved_template() == Some("hi {name}".to_string()));

        let_assert!(Some(text) = body.resolve(&Variables::new().with("name", "bob")));
        check!(text == "hi bob");
    }

    #[test]
    fn charset_falls_back_to_default() {
        let mut body = RequestBody::default();
        check!(body.charset(Charset::UsAscii) == Charset::UsAscii);

        body.update_body(Body::from_text("x", Charset::Iso8859_1));
        check!(body.charset(Charset::Utf8) == Charset::Iso8859_1);
    }
}
