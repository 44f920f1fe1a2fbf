//! Rendering of multi-valued query parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Collection format for multi-valued query parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionFormat {
    /// Repeated parameters: `?tags=a&tags=b&tags=c` (default)
    #[default]
    Exploded,
    /// Comma-separated: `?tags=a,b,c`
    Csv,
    /// Space-separated: `?tags=a%20b%20c`
    Ssv,
    /// Tab-separated: `?tags=a%09b%09c`
    Tsv,
    /// Pipe-separated: `?tags=a%7Cb%7Cc`
    Pipes,
}

impl CollectionFormat {
    /// Get the already-encoded separator for this format.
    ///
    /// Returns `None` for `Exploded` (uses repeated parameters).
    #[must_use]
    pub const fn separator(self) -> Option<&'static str> {
        match self {
            Self::Exploded => None,
            Self::Csv => Some(","),
            Self::Ssv => Some("%20"),
            Self::Tsv => Some("%09"),
            Self::Pipes => Some("%7C"),
        }
    }

    /// Render `name` with its values, e.g. `tags=a&tags=b` or `tags=a,b`.
    ///
    /// Values are expected to be encoded already.
    #[must_use]
    pub fn join(self, name: &str, values: &[String]) -> String {
        match self.separator() {
            None => values
                .iter()
                .map(|value| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("&"),
            Some(separator) => format!("{name}={}", values.join(separator)),
        }
    }
}

impl fmt::Display for CollectionFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Exploded => "exploded",
            Self::Csv => "csv",
            Self::Ssv => "ssv",
            Self::Tsv => "tsv",
            Self::Pipes => "pipes",
        };
        f.write_str(label)
    }
}

impl FromStr for CollectionFormat {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "exploded" | "multi" => Ok(Self::Exploded),
            "csv" | "comma" => Ok(Self::Csv),
            "ssv" | "space" => Ok(Self::Ssv),
            "tsv" | "tab" => Ok(Self::Tsv),
            "pipes" | "pipe" => Ok(Self::Pipes),
            _ => Err(crate::Error::invalid_argument(format!(
                "unknown collection format: {s}"
            ))),
        }
    }
}
