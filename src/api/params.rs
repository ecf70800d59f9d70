//
//  mediawiki-butt
//  api/params.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Request parameter builder.
//!
//! The MediaWiki API takes a flat set of form fields. The API distinguishes an
//! absent key from an empty string, and encodes boolean flags by presence
//! alone, so [`Params`] never writes `false` or `None`.
//!
//! ```rust
//! use mediawiki_butt::api::Params;
//!
//! let params = Params::action("block")
//!     .set("user", "Eve")
//!     .set_opt("reason", None::<&str>)
//!     .flag("nocreate", true)
//!     .flag("autoblock", false);
//!
//! assert_eq!(params.get("action"), Some("block"));
//! assert_eq!(params.get("nocreate"), Some("1"));
//! assert!(!params.contains("reason"));
//! assert!(!params.contains("autoblock"));
//! ```

use std::collections::BTreeMap;
use std::fmt::Display;

use super::common::{ApiError, ApiResult};

/// Marker value sent for boolean flags that are switched on.
pub const FLAG_ON: &str = "1";

/// Keys whose values must never appear in logs.
const SECRET_KEYS: &[&str] = &["lgpassword", "lgtoken", "token"];

/// A flat, ordered set of API parameters.
///
/// Keys are kept sorted so requests are deterministic and easy to assert on
/// in tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    fields: BTreeMap<String, String>,
}

impl Params {
    /// Starts a parameter set for the given `action`.
    pub fn action(action: &str) -> Self {
        Self::default().set("action", action)
    }

    /// Starts an `action=query` parameter set.
    pub fn query() -> Self {
        Self::action("query")
    }

    /// Inserts a value, replacing any previous value for `key`.
    pub fn set(mut self, key: &str, value: impl Display) -> Self {
        self.fields.insert(key.to_string(), value.to_string());
        self
    }

    /// Inserts a value only when it is present.
    pub fn set_opt<V: Display>(self, key: &str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.set(key, value),
            None => self,
        }
    }

    /// Inserts the flag marker when `enabled`; leaves the key absent otherwise.
    pub fn flag(self, key: &str, enabled: bool) -> Self {
        if enabled {
            self.set(key, FLAG_ON)
        } else {
            self
        }
    }

    /// Inserts a required string argument.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] when `value` is empty or only
    /// whitespace.
    pub fn require(self, key: &str, value: &str) -> ApiResult<Self> {
        if value.trim().is_empty() {
            return Err(ApiError::InvalidArgument(format!(
                "`{}` is required and must not be empty",
                key
            )));
        }
        Ok(self.set(key, value))
    }

    /// Returns the value stored under `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// The `action` this parameter set targets, if any.
    pub fn action_name(&self) -> Option<&str> {
        self.get("action")
    }

    /// Iterates over the key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether no fields are set.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Keys suitable for logging: secret values are never included.
    pub fn redacted(&self) -> String {
        self.fields
            .iter()
            .map(|(k, v)| {
                if SECRET_KEYS.contains(&k.as_str()) {
                    format!("{}=<redacted>", k)
                } else {
                    format!("{}={}", k, v)
                }
            })
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl IntoIterator for Params {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}
