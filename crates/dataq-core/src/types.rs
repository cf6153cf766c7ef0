//! Output formats and the reserved form field.
//!
//! The explorer form carries one reserved field that selects the output
//! representation of the request; it is consumed during URL synthesis and
//! never serialized into the query string.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Name of the reserved form field that selects the output representation.
pub const RESERVED_FORMAT_FIELD: &str = "$format";

/// Default result-limit value applied while the html format is selected.
pub const DEFAULT_HTML_LIMIT: u32 = 100;

/// Output representation of a request.
///
/// Recognized formats get a variant; anything else passes through verbatim
/// as [`OutputFormat::Other`], matching the way the explorer appends the
/// selected value to the base href as a file extension.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum OutputFormat {
    /// Rendered HTML page (the default)
    #[default]
    Html,
    /// JSON document
    Json,
    /// JSON wrapped in a caller-supplied callback
    Jsonp,
    /// Comma-separated values
    Csv,
    /// XML document
    Xml,
    /// Any other extension, passed through verbatim
    Other(String),
}

impl OutputFormat {
    /// Returns the file extension appended to the base href.
    #[must_use]
    pub fn extension(&self) -> &str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
            Self::Jsonp => "jsonp",
            Self::Csv => "csv",
            Self::Xml => "xml",
            Self::Other(ext) => ext,
        }
    }

    /// Returns true for the html format.
    #[must_use]
    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html)
    }

    /// Returns true for the jsonp format.
    #[must_use]
    pub fn is_jsonp(&self) -> bool {
        matches!(self, Self::Jsonp)
    }

    /// Returns the formats the explorer offers out of the box.
    #[must_use]
    pub const fn well_known() -> &'static [Self] {
        &[Self::Html, Self::Json, Self::Jsonp, Self::Csv, Self::Xml]
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "" => Err(Error::InvalidFormat(
                "output format cannot be blank".to_string(),
            )),
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            "jsonp" => Ok(Self::Jsonp),
            "csv" => Ok(Self::Csv),
            "xml" => Ok(Self::Xml),
            _ => Ok(Self::Other(normalized)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl Serialize for OutputFormat {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.extension())
    }
}

impl<'de> Deserialize<'de> for OutputFormat {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
