//! Named base urls requests are sent to.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::request_template::{is_absolute, validate_absolute};
use crate::{Error, Request, RequestTemplate, Result};

/// A named, absolute base url, such as `users -> https://api.example.com`.
///
/// ```
/// use pincer_template::{RequestTemplate, Target, Variables};
///
/// let target = Target::new("users", "https://api.example.com")?;
/// let mut template = RequestTemplate::new();
/// template.uri("/users/{id}")?;
///
/// let mut resolved = template.resolve(&Variables::new().with("id", 7))?;
/// let request = target.apply(&mut resolved)?;
/// assert_eq!(request.url(), "https://api.example.com/users/7");
/// # Ok::<(), pincer_template::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    name: String,
    url: String,
}

impl Target {
    /// Create a target.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `url` is not absolute and
    /// [`Error::InvalidUri`] if it does not parse or holds characters that
    /// must be percent-encoded.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Result<Self> {
        let url = url.into();
        validate_absolute(&url)?;

        Ok(Self {
            name: name.into(),
            url,
        })
    }

    /// Target name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Base url.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Point a resolved template at this target, unless its url is already
    /// absolute, and build the request.
    ///
    /// # Errors
    ///
    /// Returns [`Error::IllegalState`] if the template is not resolved.
    pub fn apply(&self, template: &mut RequestTemplate) -> Result<Request> {
        if !template.is_resolved() {
            return Err(Error::illegal_state("template has not been resolved"));
        }
        if !is_absolute(&template.url()) {
            template.target(&self.url)?;
        }
        template.request()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.url)
    }
}
