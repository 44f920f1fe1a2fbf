//! Metadata about the client operation a template was built for.
//!
//! Templates carry it untouched so that whoever consumes the resolved
//! request can tell which declared operation produced it.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Parameter location in the HTTP request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamLocation {
    /// Path parameter (e.g., `/users/{id}`)
    Path,
    /// Query parameter (e.g., `?limit=10`)
    Query,
    /// Header parameter
    Header,
    /// Request body
    Body,
    /// Form field
    Form,
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path => write!(f, "path"),
            Self::Query => write!(f, "query"),
            Self::Header => write!(f, "header"),
            Self::Body => write!(f, "body"),
            Self::Form => write!(f, "form"),
        }
    }
}

/// Metadata about a single parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamMeta {
    /// The variable name the parameter binds to.
    pub name: String,
    /// Where the parameter is sent in the HTTP request.
    pub location: ParamLocation,
    /// The declared type name (e.g., "u64", "Option<String>").
    pub type_name: String,
    /// Whether a value must be bound.
    pub required: bool,
}

impl ParamMeta {
    /// Create a required parameter.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        location: ParamLocation,
        type_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            location,
            type_name: type_name.into(),
            required: true,
        }
    }

    /// Mark the parameter as optional.
    #[must_use]
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// The declaring operation and its parameters.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MethodMetadata {
    /// Unique key of the operation, e.g. `UserApi#get_user(u64)`.
    pub config_key: String,
    /// Metadata for each parameter, in declaration order.
    pub parameters: Vec<ParamMeta>,
}

impl MethodMetadata {
    /// Create metadata without parameters.
    #[must_use]
    pub fn new(config_key: impl Into<String>) -> Self {
        Self {
            config_key: config_key.into(),
            parameters: Vec::new(),
        }
    }

    /// Add a parameter.
    #[must_use]
    pub fn with_parameter(mut self, parameter: ParamMeta) -> Self {
        self.parameters.push(parameter);
        self
    }

    /// Parameters sent at `location`.
    pub fn parameters_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParamMeta> {
        self.parameters
            .iter()
            .filter(move |parameter| parameter.location == location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn get_user() -> MethodMetadata {
        MethodMetadata::new("UserApi#get_user(u64,Option<u32>)")
            .with_parameter(ParamMeta::new("id", ParamLocation::Path, "u64"))
            .with_parameter(ParamMeta::new("limit", ParamLocation::Query, "Option<u32>").optional())
    }

    #[test]
    fn param_location_display() {
        assert_eq!(ParamLocation::Path.to_string(), "path");
        assert_eq!(ParamLocation::Query.to_string(), "query");
        assert_eq!(ParamLocation::Header.to_string(), "header");
        assert_eq!(ParamLocation::Body.to_string(), "body");
        assert_eq!(ParamLocation::Form.to_string(), "form");
    }

    #[test]
    fn param_meta_construction() {
        let meta = ParamMeta::new("id", ParamLocation::Path, "u64");
        assert_eq!(meta.name, "id");
        assert_eq!(meta.location, ParamLocation::Path);
        assert_eq!(meta.type_name, "u64");
        assert!(meta.required);
        assert!(!meta.optional().required);
    }

    #[test]
    fn parameters_by_location() {
        let metadata = get_user();
        let query = metadata
            .parameters_in(ParamLocation::Query)
            .map(|parameter| parameter.name.as_str())
            .collect::<Vec<_>>();
        assert_eq!(query, vec!["limit"]);
        assert_eq!(metadata.parameters_in(ParamLocation::Body).count(), 0);
    }

    #[test]
    fn method_metadata_default() {
        let meta = MethodMetadata::default();
        assert_eq!(meta.config_key, "");
        assert!(meta.parameters.is_empty());
    }

    #[test]
    fn serde_round_trip() {
        let metadata = get_user();
        let json = serde_json::to_string(&metadata).expect("serialize");
        assert!(json.contains(r#""location":"query""#));
        let back: MethodMetadata = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, metadata);
    }
}
