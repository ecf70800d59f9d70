//
//  mediawiki-butt
//  api/transport.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Transport Adapter
//!
//! The boundary between the library and the network. A [`Transport`] sends one
//! form-encoded POST to `api.php` and hands back the raw reply; it knows nothing
//! about tokens, limits or response shapes.
//!
//! [`HttpTransport`] is the production implementation built on `reqwest`. It
//! keeps a cookie store, because MediaWiki login sessions are cookie based.
//!
//! ## Endpoint URLs
//!
//! ```rust
//! use mediawiki_butt::api::api_endpoint;
//!
//! let url = api_endpoint("https://en.wikipedia.org/w").unwrap();
//! assert_eq!(url.as_str(), "https://en.wikipedia.org/w/api.php");
//!
//! let url = api_endpoint("https://wiki.example.org/api.php").unwrap();
//! assert_eq!(url.as_str(), "https://wiki.example.org/api.php");
//!
//! assert!(api_endpoint("ftp://wiki.example.org").is_err());
//! ```

use async_trait::async_trait;
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde_json::Value;
use url::Url;

use super::common::{ApiError, ApiResult};
use super::params::Params;

/// Completes a wiki URL into its `api.php` endpoint.
///
/// URLs already ending in `api.php` are used as-is; otherwise `/api.php` is
/// appended. Only `http` and `https` are accepted.
///
/// # Errors
///
/// Returns [`ApiError::InvalidUrl`] when the URL cannot be parsed or uses
/// another scheme.
pub fn api_endpoint(url: &str) -> ApiResult<Url> {
    let trimmed = url.trim().trim_end_matches('/');
    let full = if trimmed.ends_with("api.php") {
        trimmed.to_string()
    } else {
        format!("{}/api.php", trimmed)
    };

    let parsed = Url::parse(&full).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        scheme => Err(ApiError::InvalidUrl(format!(
            "{}: unsupported scheme `{}`",
            url, scheme
        ))),
    }
}

/// An unparsed reply, returned when the caller opts out of JSON parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text.
    pub body: String,
}

impl RawResponse {
    /// Parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MalformedResponse`] when the body is not JSON. The
    /// status code is included so HTML error pages from proxies are easy to
    /// recognize.
    pub fn json(&self) -> ApiResult<Value> {
        serde_json::from_str(&self.body).map_err(|e| {
            ApiError::MalformedResponse(format!(
                "HTTP {} reply is not JSON ({}): {}",
                self.status,
                e,
                preview(&self.body)
            ))
        })
    }
}

fn preview(body: &str) -> String {
    const MAX: usize = 120;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Sends parameter sets to the wiki.
///
/// Implementations perform exactly one request per call and never retry.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Sends `params` and returns the reply without parsing it.
    async fn post_raw(&self, params: &Params, user_agent: &str) -> ApiResult<RawResponse>;

    /// Sends `params` and parses the reply as JSON.
    async fn post(&self, params: &Params, user_agent: &str) -> ApiResult<Value> {
        self.post_raw(params, user_agent).await?.json()
    }
}

/// `reqwest`-backed transport with a per-instance cookie store.
pub struct HttpTransport {
    http: Client,
    endpoint: Url,
}

impl HttpTransport {
    /// Creates a transport for the given `api.php` endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] if the HTTP client could not be built.
    pub fn new(endpoint: Url) -> ApiResult<Self> {
        let http = Client::builder().cookie_store(true).build()?;
        Ok(Self { http, endpoint })
    }

    /// The endpoint every request is sent to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn post_raw(&self, params: &Params, user_agent: &str) -> ApiResult<RawResponse> {
        let form: Vec<(&str, &str)> = params.iter().collect();

        let response = self
            .http
            .post(self.endpoint.clone())
            .header(USER_AGENT, user_agent)
            .form(&form)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        tracing::debug!("{} -> HTTP {} ({} bytes)", self.endpoint, status, body.len());

        Ok(RawResponse { status, body })
    }
}
