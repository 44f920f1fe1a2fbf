//! Template configuration types.

use serde::{Deserialize, Serialize};

use crate::Charset;
use crate::template::CollectionFormat;

/// Defaults applied to a new [`RequestTemplate`](crate::RequestTemplate).
///
/// ```
/// use pincer_template::{CollectionFormat, RequestTemplate, TemplateConfig, Variables};
///
/// let config = TemplateConfig::builder()
///     .collection_format(CollectionFormat::Csv)
///     .build();
///
/// let mut template = RequestTemplate::with_config(&config);
/// template.uri("/items")?.query("tag", ["{tags}"])?;
///
/// let resolved = template.resolve(&Variables::new().with("tags", vec!["a", "b"]))?;
/// assert_eq!(resolved.url(), "/items?tag=a,b");
/// # Ok::<(), pincer_template::Error>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Charset for text bodies set without an explicit one.
    pub charset: Charset,
    /// How multi-valued query parameters are rendered.
    pub collection_format: CollectionFormat,
    /// Whether `/` in expanded values is left as is instead of `%2F`.
    pub decode_slash: bool,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            charset: Charset::Utf8,
            collection_format: CollectionFormat::Exploded,
            decode_slash: true,
        }
    }
}

impl TemplateConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> TemplateConfigBuilder {
        TemplateConfigBuilder::default()
    }
}

/// Builder for [`TemplateConfig`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateConfigBuilder {
    charset: Option<Charset>,
    collection_format: Option<CollectionFormat>,
    decode_slash: Option<bool>,
}

impl TemplateConfigBuilder {
    /// Set the default body charset.
    #[must_use]
    pub const fn charset(mut self, charset: Charset) -> Self {
        self.charset = Some(charset);
        self
    }

    /// Set the collection format.
    #[must_use]
    pub const fn collection_format(mut self, format: CollectionFormat) -> Self {
        self.collection_format = Some(format);
        self
    }

    /// Set whether slashes in expanded values stay unencoded.
    #[must_use]
    pub const fn decode_slash(mut self, decode_slash: bool) -> Self {
        self.decode_slash = Some(decode_slash);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> TemplateConfig {
        let defaults = TemplateConfig::default();
        TemplateConfig {
            charset: self.charset.unwrap_or(defaults.charset),
            collection_format: self
                .collection_format
                .unwrap_or(defaults.collection_format),
            decode_slash: self.decode_slash.unwrap_or(defaults.decode_slash),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = TemplateConfig::default();
        assert_eq!(config.charset, Charset::Utf8);
        assert_eq!(config.collection_format, CollectionFormat::Exploded);
        assert!(config.decode_slash);
    }

    #[test]
    fn builder_overrides() {
        let config = TemplateConfig::builder()
            .charset(Charset::Iso8859_1)
            .decode_slash(false)
            .build();

        assert_eq!(config.charset, Charset::Iso8859_1);
        assert_eq!(config.collection_format, CollectionFormat::Exploded);
        assert!(!config.decode_slash);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: TemplateConfig =
            serde_json::from_str(r#"{"collection_format": "pipes"}"#).expect("valid config");
        assert_eq!(config.collection_format, CollectionFormat::Pipes);
        assert!(config.decode_slash);
    }
}
