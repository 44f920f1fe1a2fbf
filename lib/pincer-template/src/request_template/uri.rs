//! Uri normalization and path composition.

use crate::template::UriTemplate;
use crate::error::UriError;
use crate::{Error, Result};

/// Returns `true` if `uri` starts with `scheme://`.
pub(crate) fn is_absolute(uri: &str) -> bool {
    uri.split_once("://").is_some_and(|(scheme, _)| {
        let mut chars = scheme.chars();
        chars.next().is_some_and(|c| c.is_ascii_alphabetic())
            && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
    })
}

/// Check that `value` is an absolute url that parses as written.
///
/// Characters a url only carries percent-encoded are rejected instead of
/// being silently rewritten.
pub(crate) fn validate_absolute(value: &str) -> Result<()> {
    if !is_absolute(value) {
        return Err(Error::invalid_argument(format!(
            "target must be an absolute url: {value}"
        )));
    }
    if let Some((index, character)) = value.char_indices().find(|&(_, c)| is_illegal(c)) {
        return Err(Error::invalid_uri(
            value,
            UriError::IllegalCharacter { character, index },
        ));
    }
    url::Url::parse(value).map_err(|source| Error::invalid_uri(value, source))?;
    Ok(())
}

fn is_illegal(c: char) -> bool {
    c.is_control()
        || c.is_whitespace()
        || matches!(c, '"' | '<' | '>' | '`' | '{' | '}' | '|' | '\\' | '^')
}

/// Validate a relative uri and make sure it starts with `/`, `{`, `?` or `;`.
pub(crate) fn normalize_relative(uri: &str) -> Result<String> {
    if is_absolute(uri) {
        return Err(Error::invalid_argument(format!(
            "uri must be relative, use a target for absolute urls: {uri}"
        )));
    }

    if uri.is_empty() || uri.starts_with(['/', '{', '?', ';']) {
        Ok(uri.to_string())
    } else {
        Ok(format!("/{uri}"))
    }
}

/// The path of a request: the target (if any) followed by the uri template.
/// Defaults to `/`.
pub(crate) fn make_path(target: Option<&str>, uri_template: Option<&UriTemplate>) -> String {
    let mut path = target.unwrap_or_default().to_string();
    if let Some(template) = uri_template {
        path.push_str(&template.to_string());
    }

    if path.is_empty() {
        "/".to_string()
    } else {
        path
    }
}

/// Build the next uri template: `request_uri` replaces the current one, or is
/// appended to it.
pub(crate) fn resolve_uri_template(
    current: Option<&UriTemplate>,
    request_uri: &str,
    append: bool,
    decode_slash: bool,
) -> UriTemplate {
    match current {
        Some(template) if append => template.append(request_uri),
        _ => UriTemplate::create(request_uri, !decode_slash),
    }
}

/// The current uri template, or an empty one.
pub(crate) fn generate_template(current: Option<&UriTemplate>, decode_slash: bool) -> UriTemplate {
    current
        .cloned()
        .unwrap_or_else(|| UriTemplate::create("", !decode_slash))
}
