//! Query merge policy and expansion.

use indexmap::IndexMap;
use indexmap::map::Entry;
use tracing::trace;

use super::query_string;
use crate::template::{CollectionFormat, QueryTemplate};
use crate::{Error, Result, Variables};

/// Query templates in insertion order, keyed by parameter name.
pub(crate) type QueryTemplates = IndexMap<String, QueryTemplate>;

/// Add `values` to `name`, creating the parameter if needed.
/// No values removes the parameter.
pub(crate) fn merge(
    queries: &mut QueryTemplates,
    name: &str,
    values: &[String],
    collection_format: CollectionFormat,
    decode_slash: bool,
) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::invalid_argument("query name is required"));
    }
    if values.is_empty() {
        queries.shift_remove(name);
        return Ok(());
    }

    trace!(query = name, count = values.len(), "merging query values");
    match queries.entry(name.to_string()) {
        Entry::Vacant(entry) => {
            entry.insert(QueryTemplate::create(
                name,
                values,
                collection_format,
                decode_slash,
            ));
        }
        Entry::Occupied(mut entry) => {
            let appended = entry
                .get()
                .append(values, collection_format, decode_slash);
            entry.insert(appended);
        }
    }
    Ok(())
}

/// Unexpanded values per parameter name.
pub(crate) fn render(queries: &QueryTemplates) -> IndexMap<String, Vec<String>> {
    queries
        .iter()
        .map(|(name, template)| (name.clone(), template.values()))
        .collect()
}

/// Rebuild every template with a new format and slash policy.
pub(crate) fn rebuild(
    queries: &QueryTemplates,
    collection_format: CollectionFormat,
    decode_slash: bool,
) -> QueryTemplates {
    queries
        .iter()
        .map(|(name, template)| {
            let rebuilt = QueryTemplate::create(
                &template.name(),
                template.values(),
                collection_format,
                decode_slash,
            );
            (name.clone(), rebuilt)
        })
        .collect()
}

/// Expand every query and attach the non-empty ones to `uri`.
pub(crate) fn resolve(queries: &QueryTemplates, variables: &Variables, uri: &str) -> String {
    let query = queries
        .values()
        .map(|template| template.expand(variables))
        .filter(|expanded| !expanded.trim().is_empty())
        .collect::<Vec<_>>()
        .join("&");

    if query.is_empty() {
        return uri.to_string();
    }
    let separator = if query_string::find_query_start(uri).is_some() {
        '&'
    } else {
        '?'
    };
    format!("{uri}{separator}{query}")
}
