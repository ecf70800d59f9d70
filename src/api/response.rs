//
//  mediawiki-butt
//  api/response.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Response Normalization
//!
//! Every MediaWiki reply arrives in the same envelope but with a different
//! payload layout per operation. This module turns those layouts into a small
//! set of stable shapes.
//!
//! ## Envelope
//!
//! ```json
//! {"error": {"code": "badtoken", "info": "Invalid CSRF token."}}
//! {"query": {"allusers": [{"name": "Alice", "userid": 1}]}}
//! {"query": {"pages": {"1234": {"title": "Foo", "contributors": [...]}}}}
//! ```
//!
//! An `error` object always wins over any partial payload next to it; see
//! [`check_envelope`].
//!
//! ## Shapes
//!
//! | [`Shape`] | Path | Result |
//! |-----------|------|--------|
//! | `List` | `query.<list>[*].<field>` | ordered values |
//! | `Map` | `query.<list>[*]` | `key -> value`, last duplicate wins |
//! | `Records` | `query.<list>[*]` | ordered raw objects |
//! | `Page` | `query.pages.<dynamic id>` | the page, or `None` when missing |
//!
//! ## Example
//!
//! ```rust
//! use mediawiki_butt::api::{normalize, Normalized, Shape};
//! use serde_json::json;
//!
//! let reply = json!({"query": {"tags": [{"name": "mobile edit"}, {"name": "visualeditor"}]}});
//! let tags = normalize(reply, Shape::List { list: "tags", field: "name" })
//!     .unwrap()
//!     .into_strings()
//!     .unwrap();
//!
//! assert_eq!(tags, vec!["mobile edit", "visualeditor"]);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde_json::{Map, Value};

use super::common::{ApiError, ApiResult, RemoteError};

/// The timestamp format used by the API (`2020-01-01T00:00:00Z`).
pub const TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Describes where an operation's payload lives and how to reshape it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape<'a> {
    /// One scalar field from every entry of `query.<list>`.
    List {
        /// The list module key, e.g. `allpages`.
        list: &'a str,
        /// The field extracted from each entry, e.g. `title`.
        field: &'a str,
    },

    /// A mapping built from two fields of every entry of `query.<list>`.
    Map {
        /// The list module key.
        list: &'a str,
        /// The field used as map key.
        key: &'a str,
        /// The field used as map value.
        value: &'a str,
    },

    /// The raw entries of `query.<list>`, for record-shaped results.
    Records {
        /// The list module key.
        list: &'a str,
    },

    /// The single entry of `query.pages`, keyed by an unknown page id.
    Page,
}

/// The normalized payload of a successful reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Normalized {
    /// Ordered scalar values.
    List(Vec<Value>),
    /// Keyed values.
    Map(BTreeMap<String, Value>),
    /// Ordered raw objects.
    Records(Vec<Map<String, Value>>),
    /// A single page; `None` when the page does not exist.
    Page(Option<Map<String, Value>>),
}

impl Normalized {
    /// Converts a `List` result into strings.
    pub fn into_strings(self) -> ApiResult<Vec<String>> {
        match self {
            Self::List(values) => values.iter().map(value_to_string).collect(),
            other => Err(shape_mismatch("list", &other)),
        }
    }

    /// Converts a `List` result into unsigned integers.
    pub fn into_ids(self) -> ApiResult<Vec<u64>> {
        match self {
            Self::List(values) => values.iter().map(value_to_u64).collect(),
            other => Err(shape_mismatch("list", &other)),
        }
    }

    /// Converts a `Map` result into a string-to-integer map.
    pub fn into_id_map(self) -> ApiResult<BTreeMap<String, u64>> {
        match self {
            Self::Map(map) => map
                .into_iter()
                .map(|(k, v)| value_to_u64(&v).map(|id| (k, id)))
                .collect(),
            other => Err(shape_mismatch("map", &other)),
        }
    }

    /// Returns the raw objects of a `Records` result.
    pub fn into_records(self) -> ApiResult<Vec<Map<String, Value>>> {
        match self {
            Self::Records(records) => Ok(records),
            other => Err(shape_mismatch("records", &other)),
        }
    }

    /// Returns the page of a `Page` result.
    pub fn into_page(self) -> ApiResult<Option<Map<String, Value>>> {
        match self {
            Self::Page(page) => Ok(page),
            other => Err(shape_mismatch("page", &other)),
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Records(_) => "records",
            Self::Page(_) => "page",
        }
    }
}

fn shape_mismatch(expected: &str, got: &Normalized) -> ApiError {
    ApiError::malformed(format!("expected a {} result, got {}", expected, got.kind()))
}

/// Separates remote errors from successful payloads.
///
/// # Errors
///
/// - [`ApiError::Remote`] when the envelope carries a non-null `error`,
///   regardless of anything else present.
/// - [`ApiError::MalformedResponse`] when the reply is not a JSON object.
pub fn check_envelope(reply: Value) -> ApiResult<Value> {
    let Some(object) = reply.as_object() else {
        return Err(ApiError::malformed("reply is not a JSON object"));
    };

    match object.get("error") {
        None | Some(Value::Null) => Ok(reply),
        Some(Value::Object(error)) => Err(ApiError::Remote(RemoteError {
            code: error
                .get("code")
                .and_then(Value::as_str)
                .unwrap_or("unknown")
                .to_string(),
            info: error
                .get("info")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        })),
        Some(other) => Err(ApiError::Remote(RemoteError {
            code: value_to_string(other).unwrap_or_else(|_| other.to_string()),
            info: String::new(),
        })),
    }
}

/// Checks the envelope, then reshapes the payload according to `shape`.
pub fn normalize(reply: Value, shape: Shape<'_>) -> ApiResult<Normalized> {
    let reply = check_envelope(reply)?;

    match shape {
        Shape::List { list, field } => {
            let entries = query_list(&reply, list)?;
            entries
                .iter()
                .map(|entry| required(as_object(entry, list)?, field).cloned())
                .collect::<ApiResult<Vec<_>>>()
                .map(Normalized::List)
        }
        Shape::Map { list, key, value } => {
            let mut map = BTreeMap::new();
            for entry in query_list(&reply, list)? {
                let entry = as_object(entry, list)?;
                let k = value_to_string(required(entry, key)?)?;
                map.insert(k, required(entry, value)?.clone());
            }
            Ok(Normalized::Map(map))
        }
        Shape::Records { list } => query_list(&reply, list)?
            .iter()
            .map(|entry| as_object(entry, list).cloned())
            .collect::<ApiResult<Vec<_>>>()
            .map(Normalized::Records),
        Shape::Page => single_page(&reply).map(Normalized::Page),
    }
}

/// Returns the `query` object of a successful reply.
pub fn query_section(reply: &Value) -> ApiResult<&Map<String, Value>> {
    reply
        .get("query")
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::malformed("missing `query` object"))
}

fn query_list<'v>(reply: &'v Value, list: &str) -> ApiResult<&'v Vec<Value>> {
    let query = query_section(reply)?;
    match query.get(list) {
        Some(Value::Array(entries)) => Ok(entries),
        // Empty list modules sometimes come back as `{}` in format version 1.
        Some(Value::Object(o)) if o.is_empty() => Ok(empty_list()),
        Some(_) => Err(ApiError::malformed(format!("`query.{}` is not a list", list))),
        None => Err(ApiError::malformed(format!("missing `query.{}`", list))),
    }
}

fn empty_list() -> &'static Vec<Value> {
    static EMPTY: Vec<Value> = Vec::new();
    &EMPTY
}

fn single_page(reply: &Value) -> ApiResult<Option<Map<String, Value>>> {
    let pages = query_section(reply)?
        .get("pages")
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::malformed("missing `query.pages`"))?;

    let mut entries = pages.values();
    let (Some(page), None) = (entries.next(), entries.next()) else {
        return Err(ApiError::malformed(format!(
            "expected exactly one page, got {}",
            pages.len()
        )));
    };

    let page = as_object(page, "pages")?;
    if page.contains_key("missing") || page.contains_key("invalid") {
        return Ok(None);
    }
    Ok(Some(page.clone()))
}

fn as_object<'v>(value: &'v Value, context: &str) -> ApiResult<&'v Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| ApiError::malformed(format!("entry of `{}` is not an object", context)))
}

/// Looks up a key that must be present.
pub fn required<'v>(object: &'v Map<String, Value>, key: &str) -> ApiResult<&'v Value> {
    object
        .get(key)
        .ok_or_else(|| ApiError::malformed(format!("missing `{}`", key)))
}

/// Reads a scalar as a string. Numbers are rendered in decimal.
pub fn value_to_string(value: &Value) -> ApiResult<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ApiError::malformed(format!("expected a string, got {}", other))),
    }
}

/// Reads a scalar as an unsigned integer. Numeric strings are accepted.
pub fn value_to_u64(value: &Value) -> ApiResult<u64> {
    match value {
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| ApiError::malformed(format!("expected an unsigned integer, got {}", n))),
        Value::String(s) => s
            .parse()
            .map_err(|_| ApiError::malformed(format!("expected an unsigned integer, got {:?}", s))),
        other => Err(ApiError::malformed(format!(
            "expected an unsigned integer, got {}",
            other
        ))),
    }
}

/// Parses an API timestamp into UTC.
///
/// # Errors
///
/// Returns [`ApiError::MalformedResponse`] when `raw` does not match
/// [`TIME_FORMAT`].
pub fn parse_timestamp(raw: &str) -> ApiResult<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(raw, TIME_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| ApiError::malformed(format!("bad timestamp {:?}: {}", raw, e)))
}

/// Formats a UTC date-time the way the API expects it in parameters.
pub fn format_timestamp(time: &DateTime<Utc>) -> String {
    time.format(TIME_FORMAT).to_string()
}
