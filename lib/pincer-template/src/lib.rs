//! Request templates for a declarative HTTP client.
//!
//! A client operation such as `GET /users/{id}?fields={fields}` is captured
//! once as a [`RequestTemplate`]. Each call resolves that prototype against
//! the call's [`Variables`] and materializes an immutable [`Request`].
//!
//! This crate provides:
//! - [`RequestTemplate`] - mutable request prototype and its resolution
//! - [`Request`] - resolved request, convertible to [`http::Request`]
//! - [`UriTemplate`], [`QueryTemplate`], [`HeaderTemplate`], [`BodyTemplate`] -
//!   template primitives
//! - [`Variables`] and [`Value`] - variable bindings
//! - [`Method`], [`Body`], [`Charset`], [`Headers`] - request parts
//! - [`Target`] and [`MethodMetadata`] - context carried by a template
//! - [`TemplateConfig`] - defaults for new templates
//! - [`Error`] and [`Result`] - error handling
//!
//! # Example
//!
//! ```
//! use pincer_template::{Method, RequestTemplate, Variables};
//!
//! let mut template = RequestTemplate::new();
//! template
//!     .method(Method::Post)
//!     .target("https://api.example.com")?
//!     .uri("/users")?
//!     .header("Content-Type", ["application/json"])?
//!     .body_template(r#"%7B"name": "{name}"%7D"#);
//!
//! let request = template
//!     .resolve(&Variables::new().with("name", "ada"))?
//!     .request()?;
//! assert_eq!(request.url(), "https://api.example.com/users");
//! assert_eq!(request.body().as_bytes(), br#"{"name": "ada"}"#);
//! # Ok::<(), pincer_template::Error>(())
//! ```

mod body;
mod config;
mod error;
mod method;
mod method_metadata;
pub mod prelude;
mod request;
mod request_template;
mod target;
pub mod template;
mod variables;

pub use body::{Body, Charset, ContentType, to_form, to_json};
pub use config::{TemplateConfig, TemplateConfigBuilder};
pub use error::{Error, Result, UriError};
pub use method::Method;
pub use method_metadata::{MethodMetadata, ParamLocation, ParamMeta};
pub use request::Request;
pub use request_template::{HeaderKey, Headers, RequestTemplate};
pub use target::Target;
pub use template::{BodyTemplate, CollectionFormat, HeaderTemplate, QueryTemplate, UriTemplate};
pub use variables::{Value, Variables};
