//! HTTP method types.

use std::str::FromStr;

use derive_more::Display;
use serde::{Deserialize, Serialize};

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Method {
    /// GET method - retrieve a resource.
    #[display("GET")]
    Get,
    /// POST method - create a resource.
    #[display("POST")]
    Post,
    /// PUT method - replace a resource.
    #[display("PUT")]
    Put,
    /// DELETE method - remove a resource.
    #[display("DELETE")]
    Delete,
    /// PATCH method - partially update a resource.
    #[display("PATCH")]
    Patch,
    /// HEAD method - retrieve headers only.
    #[display("HEAD")]
    Head,
    /// OPTIONS method - retrieve allowed methods.
    #[display("OPTIONS")]
    Options,
    /// CONNECT method - establish a tunnel.
    #[display("CONNECT")]
    Connect,
    /// TRACE method - loop-back test.
    #[display("TRACE")]
    Trace,
}

impl Method {
    /// Returns `true` if the method is safe (does not modify resources).
    #[must_use]
    pub const fn is_safe(&self) -> bool {
        matches!(self, Self::Get | Self::Head | Self::Options | Self::Trace)
    }

    /// Returns `true` if the method is idempotent.
    #[must_use]
    pub const fn is_idempotent(&self) -> bool {
        matches!(
            self,
            Self::Get | Self::Head | Self::Options | Self::Trace | Self::Put | Self::Delete
        )
    }
}

impl FromStr for Method {
    type Err = crate::Error;

    /// Parses an upper-case method token such as `"GET"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "DELETE" => Ok(Self::Delete),
            "PATCH" => Ok(Self::Patch),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "CONNECT" => Ok(Self::Connect),
            "TRACE" => Ok(Self::Trace),
            other => Err(crate::Error::invalid_argument(format!(
                "invalid HTTP method: {other}"
            ))),
        }
    }
}

impl From<Method> for http::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => Self::GET,
            Method::Post => Self::POST,
            Method::Put => Self::PUT,
            Method::Delete => Self::DELETE,
            Method::Patch => Self::PATCH,
            Method::Head => Self::HEAD,
            Method::Options => Self::OPTIONS,
            Method::Connect => Self::CONNECT,
            Method::Trace => Self::TRACE,
        }
    }
}

impl TryFrom<http::Method> for Method {
    type Error = crate::Error;

    fn try_from(method: http::Method) -> Result<Self, Self::Error> {
        method.as_str().parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_display() {
        assert_eq!(Method::Get.to_string(), "GET");
        assert_eq!(Method::Post.to_string(), "POST");
        assert_eq!(Method::Put.to_string(), "PUT");
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::Patch.to_string(), "PATCH");
        assert_eq!(Method::Head.to_string(), "HEAD");
        assert_eq!(Method::Options.to_string(), "OPTIONS");
        assert_eq!(Method::Connect.to_string(), "CONNECT");
        assert_eq!(Method::Trace.to_string(), "TRACE");
    }

    #[test]
    fn method_from_str() {
        assert_eq!("GET".parse::<Method>().expect("GET"), Method::Get);
        assert_eq!("PATCH".parse::<Method>().expect("PATCH"), Method::Patch);
        assert_eq!("TRACE".parse::<Method>().expect("TRACE"), Method::Trace);
    }

    #[test]
    fn method_from_str_rejects_unknown_tokens() {
        let err = "FETCH".parse::<Method>().expect_err("unknown method");
        assert!(err.is_invalid_argument());
        assert_eq!(err.to_string(), "invalid argument: invalid HTTP method: FETCH");

        // tokens are case-sensitive
        assert!("get".parse::<Method>().is_err());
    }

    #[test]
    fn method_is_safe() {
        assert!(Method::Get.is_safe());
        assert!(Method::Head.is_safe());
        assert!(Method::Options.is_safe());
        assert!(Method::Trace.is_safe());
        assert!(!Method::Post.is_safe());
        assert!(!Method::Put.is_safe());
        assert!(!Method::Delete.is_safe());
        assert!(!Method::Patch.is_safe());
        assert!(!Method::Connect.is_safe());
    }

    #[test]
    fn method_is_idempotent() {
        assert!(Method::Get.is_idempotent());
        assert!(Method::Put.is_idempotent());
        assert!(Method::Delete.is_idempotent());
        assert!(!Method::Post.is_idempotent());
        assert!(!Method::Patch.is_idempotent());
        assert!(!Method::Connect.is_idempotent());
    }

    #[test]
    fn method_into_http() {
        assert_eq!(http::Method::from(Method::Get), http::Method::GET);
        assert_eq!(http::Method::from(Method::Connect), http::Method::CONNECT);
    }

    #[test]
    fn method_from_http() {
        assert_eq!(
            Method::try_from(http::Method::POST).expect("POST"),
            Method::Post
        );
        let custom = http::Method::from_bytes(b"PURGE").expect("custom method");
        assert!(Method::try_from(custom).is_err());
    }

    #[test]
    fn method_serde_uses_tokens() {
        let json = serde_json::to_string(&Method::Delete).expect("serialize");
        assert_eq!(json, r#""DELETE""#);
        let method: Method = serde_json::from_str(r#""HEAD""#).expect("deserialize");
        assert_eq!(method, Method::Head);
    }
}
