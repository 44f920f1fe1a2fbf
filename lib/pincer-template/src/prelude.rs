//! Prelude module for convenient imports.
//!
//! This module re-exports the most commonly used types for easy glob
//! importing:
//!
//! ```
//! use pincer_template::prelude::*;
//!
//! let mut template = RequestTemplate::new();
//! template.method(Method::Get).uri("/health")?;
//! let request: Request = template.resolve(&Variables::new())?.request()?;
//! assert_eq!(request.url(), "/health");
//! # Ok::<(), Error>(())
//! ```

pub use crate::{
    Body, Charset, CollectionFormat, ContentType, Error, Method, Request, RequestTemplate, Result,
    Target, TemplateConfig, Variables, to_form, to_json,
};
