//! Query string scanning and parsing.

use indexmap::IndexMap;

use super::queries::QueryTemplates;

/// Byte offset of the first `?` that starts a query string.
///
/// A `?` directly after `{` opens a template expression and is skipped.
pub(crate) fn find_query_start(uri: &str) -> Option<usize> {
    uri.match_indices('?').map(|(index, _)| index).find(|&index| {
        index
            .checked_sub(1)
            .and_then(|previous| uri.as_bytes().get(previous))
            != Some(&b'{')
    })
}

/// Render the query templates as `?a=1&b=2`, or an empty string when none
/// renders to anything.
pub(crate) fn to_query_line(queries: &QueryTemplates) -> String {
    let line = queries
        .values()
        .map(ToString::to_string)
        .filter(|query| !query.is_empty())
        .collect::<Vec<_>>()
        .join("&");

    if line.is_empty() {
        line
    } else {
        format!("?{line}")
    }
}

/// Split a raw query string into names and their values, in order of first
/// appearance. A parameter without `=` gets an empty value and blank names
/// are skipped.
pub(crate) fn extract_query_parameters(query: &str) -> IndexMap<String, Vec<String>> {
    let mut parameters = IndexMap::<String, Vec<String>>::new();
    for pair in query.split('&') {
        let (name, value) = match pair.split_once('=') {
            Some((name, value)) if !name.is_empty() => (name, value),
            _ => (pair, ""),
        };
        if name.trim().is_empty() {
            continue;
        }
        parameters
            .entry(name.to_string())
            .or_default()
            .push(value.to_string());
    }
    parameters
}
