//
//  mediawiki-butt
//  api/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # API Client Layer
//!
//! This module talks to a wiki's `api.php` endpoint.
//!
//! ## Architecture
//!
//! - [`client`]: [`WikiClient`], the per-wiki entry point owning session and token state
//! - [`params`]: parameter maps with absent-vs-empty semantics
//! - [`limits`]: result limits clamped to the session's privilege tier
//! - [`response`]: error envelope detection and result reshaping
//! - [`transport`]: the HTTP boundary
//! - [`query`], [`admin`], [`edit`]: the operations themselves
//! - [`common`]: the shared error type
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mediawiki_butt::api::{Params, WikiClient};
//!
//! # async fn example() -> mediawiki_butt::ApiResult<()> {
//! let client = WikiClient::new("https://en.wikipedia.org/w")?;
//!
//! // Dedicated operations
//! let pages = client.random_pages(5, 0).await?;
//!
//! // Anything else through the raw path
//! let info = client
//!     .request(Params::query().set("meta", "siteinfo"))
//!     .await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Every operation returns [`ApiResult`]. Remote failures arrive as
//! [`ApiError::Remote`] with the wiki's own code and message.

/// Administrative write actions (block, unblock).
pub mod admin;

/// The per-wiki client.
pub mod client;

/// Shared error types.
pub mod common;

/// Page edits.
pub mod edit;

/// Limit normalization.
pub mod limits;

/// Request parameter maps.
pub mod params;

/// `action=query` operations.
pub mod query;

/// Envelope checking and result shapes.
pub mod response;

/// HTTP transport.
pub mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use client::WikiClient;
pub use common::{ApiError, ApiResult, RemoteError};
pub use limits::{normalize_limit, LimitCaps};
pub use params::Params;
pub use response::{check_envelope, normalize, Normalized, Shape};
pub use transport::{api_endpoint, HttpTransport, RawResponse, Transport};
