use super::headers::HeaderTemplates;
use super::queries::QueryTemplates;
use crate::template::{BodyTemplate, UriTemplate};

/// Every variable referenced by the uri, the queries, the headers and the
/// body, in that order. Names referenced twice are listed twice.
pub(crate) fn find_all_variables(
    uri_template: Option<&UriTemplate>,
    queries: &QueryTemplates,
    headers: &HeaderTemplates,
    body: Option<&BodyTemplate>,
) -> Vec<String> {
    let mut variables = uri_template.map(UriTemplate::variables).unwrap_or_default();
    variables.extend(queries.values().flat_map(|query| query.variables()));
    variables.extend(headers.values().flat_map(|header| header.variables()));
    if let Some(body) = body {
        variables.extend(body.variables());
    }
    variables
}
