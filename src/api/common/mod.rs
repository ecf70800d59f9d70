//
//  mediawiki-butt
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common types shared by every MediaWiki API operation.
//!
//! This module defines the error taxonomy used throughout the library and the
//! structured remote error that MediaWiki returns inside its JSON envelope.
//!
//! # Error Propagation
//!
//! | Variant | Raised when | Network call made? |
//! |---------|-------------|--------------------|
//! | [`ApiError::InvalidArgument`] | A caller precondition is violated | No |
//! | [`ApiError::TokenFetchFailed`] | A security token could not be acquired | Token fetch only |
//! | [`ApiError::Remote`] | The wiki replied with an `error` object | Yes |
//! | [`ApiError::MalformedResponse`] | The reply did not have the expected shape | Yes |
//! | [`ApiError::AuthenticationFailed`] | `action=login` did not succeed | Yes |
//! | [`ApiError::Network`] | The transport failed | Attempted |
//!
//! Remote errors are ordinary values: callers such as bot frameworks routinely
//! branch on codes like `alreadyblocked` or `protectedpage`, so
//! [`ApiError::code`] exposes the remote code without any string parsing.
//!
//! # Example
//!
//! ```rust
//! use mediawiki_butt::api::common::{ApiError, RemoteError};
//!
//! let err = ApiError::Remote(RemoteError {
//!     code: "alreadyblocked".to_string(),
//!     info: "The user is already blocked.".to_string(),
//! });
//!
//! assert_eq!(err.code(), Some("alreadyblocked"));
//! assert!(err.remote().is_some());
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result alias used by every library operation.
pub type ApiResult<T> = Result<T, ApiError>;

/// A structured error reported by the wiki.
///
/// MediaWiki failures look like:
///
/// ```json
/// {"error": {"code": "badtoken", "info": "Invalid CSRF token."}}
/// ```
///
/// Both fields are surfaced verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteError {
    /// Machine-readable error code (e.g. `badtoken`, `alreadyblocked`).
    pub code: String,

    /// Human-readable explanation supplied by the wiki.
    #[serde(default)]
    pub info: String,
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.info.is_empty() {
            write!(f, "{}", self.code)
        } else {
            write!(f, "{}: {}", self.code, self.info)
        }
    }
}

/// Unified error type for all MediaWiki API operations.
///
/// `ApiError` separates local faults (bad arguments, unexpected reply shapes)
/// from failures the remote wiki reported on purpose. Only
/// [`Network`](Self::Network) wraps a foreign error type; everything else
/// carries plain strings.
///
/// # Example
///
/// ```rust
/// use mediawiki_butt::api::common::ApiError;
///
/// fn check_limit(limit: i64) -> Result<(), ApiError> {
///     if limit <= 0 {
///         return Err(ApiError::InvalidArgument("limit must be positive".into()));
///     }
///     Ok(())
/// }
///
/// assert!(matches!(check_limit(0), Err(ApiError::InvalidArgument(_))));
/// ```
#[derive(Error, Debug)]
pub enum ApiError {
    /// A caller-supplied argument violated a precondition.
    ///
    /// Always detected before any request is sent.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Acquiring a security token failed.
    ///
    /// The write operation that needed the token is aborted without being
    /// transmitted.
    #[error("Failed to fetch {kind} token: {reason}")]
    TokenFetchFailed {
        /// The token kind that was requested (e.g. `csrf`).
        kind: String,
        /// Why the fetch failed.
        reason: String,
    },

    /// The wiki returned a structured error envelope.
    #[error("Remote error {0}")]
    Remote(RemoteError),

    /// The reply did not match the shape the operation expected.
    ///
    /// Covers missing keys, wrong JSON types and unparseable timestamps.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// `action=login` was rejected. Session state is left untouched.
    #[error("Authentication failed ({result}): {reason}")]
    AuthenticationFailed {
        /// The `login.result` value (e.g. `Failed`, `WrongPass`, `Throttled`).
        result: String,
        /// The reason supplied by the wiki, if any.
        reason: String,
    },

    /// The endpoint URL could not be used.
    #[error("Invalid wiki URL: {0}")]
    InvalidUrl(String),

    /// A network-level error occurred during the request.
    ///
    /// Propagated unchanged from the transport; nothing is retried.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Returns the remote error when this is a [`Remote`](Self::Remote) error.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(remote) => Some(remote),
            _ => None,
        }
    }

    /// Returns the remote error code, if the wiki reported one.
    pub fn code(&self) -> Option<&str> {
        self.remote().map(|r| r.code.as_str())
    }

    /// Whether the error was detected locally before any request was sent.
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::InvalidUrl(_))
    }

    pub(crate) fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse(message.into())
    }
}
