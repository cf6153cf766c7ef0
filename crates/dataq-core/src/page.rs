//! Storage keys derived from page paths.
//!
//! Saved queries are namespaced per explorer page. The namespace key is the
//! page's path with the file extension of the final segment stripped, so
//! `/explore/orders.html` and `/explore/orders.json` share one registry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Strongly-typed storage key for per-page state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageKey(String);

impl PageKey {
    /// Derive a storage key from a page path.
    ///
    /// Strips the file extension from the final path segment. A leading dot
    /// in the final segment is not treated as an extension separator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] when the path is empty or blank.
    pub fn from_path(path: &str) -> Result<Self> {
        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(Error::ConfigError("page path cannot be empty".to_string()));
        }

        let segment_start = trimmed.rfind('/').map_or(0, |i| i + 1);
        let segment = &trimmed[segment_start..];
        let key = match segment.rfind('.') {
            Some(dot) if dot > 0 => &trimmed[..segment_start + dot],
            _ => trimmed,
        };

        Ok(Self(key.to_string()))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for PageKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_path(s)
    }
}

impl fmt::Display for PageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for PageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
