//
//  mediawiki-butt
//  api/client.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # MediaWiki API Client
//!
//! This module provides [`WikiClient`], the entry point for every operation.
//! A client owns everything that is scoped to one wiki connection:
//!
//! - the [`Transport`] that talks to `api.php`
//! - the [`Session`] (who is logged in, which groups they hold)
//! - the [`TokenCache`] for write actions
//!
//! Nothing is shared between client instances.
//!
//! ## Request Pipeline
//!
//! ```text
//! Params ──> post ──> Transport ──> check_envelope ──> normalize ──> caller
//!   │                  (format=json,
//!   │                   User-Agent)
//!   └── write ops: token(kind) first, strictly before the write is sent
//! ```
//!
//! ## Example
//!
//! ```rust,no_run
//! use mediawiki_butt::WikiClient;
//!
//! # async fn example() -> mediawiki_butt::ApiResult<()> {
//! let client = WikiClient::new("https://wiki.example.org/w")?;
//! client.login("ExampleBot", "bot-password").await?;
//!
//! let tags = client.tags(50).await?;
//! println!("{} change tags", tags.len());
//! # Ok(())
//! # }
//! ```

use std::fmt;

use parking_lot::RwLock;
use serde_json::Value;

use super::common::{ApiError, ApiResult};
use super::limits::{normalize_limit, LimitCaps};
use super::params::Params;
use super::response::{check_envelope, normalize, query_section, Normalized, Shape};
use super::transport::{api_endpoint, HttpTransport, RawResponse, Transport};
use crate::auth::{Session, TokenCache, TokenKind};
use crate::config::WikiConfig;

/// A client bound to a single wiki.
///
/// All operations take `&self`; the client can be shared behind an `Arc`.
/// Session and token state are guarded internally, and login/logout are
/// serialized against each other.
pub struct WikiClient {
    transport: Box<dyn Transport>,
    pub(crate) session: RwLock<Session>,
    pub(crate) tokens: TokenCache,
    pub(crate) auth_lock: tokio::sync::Mutex<()>,
}

impl fmt::Debug for WikiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WikiClient")
            .field("session", &*self.session.read())
            .field("tokens", &self.tokens.len())
            .finish_non_exhaustive()
    }
}

impl WikiClient {
    /// Creates a client for the wiki at `url`.
    ///
    /// `url` may point at `api.php` directly or at the script path containing
    /// it (e.g. `https://en.wikipedia.org/w`).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] for unusable URLs and
    /// [`ApiError::Network`] if the HTTP client could not be built.
    pub fn new(url: &str) -> ApiResult<Self> {
        Self::with_user_agent(url, None)
    }

    /// Creates a client that always sends the given `User-Agent`.
    ///
    /// Wikimedia wikis ask bots to identify themselves with contact details,
    /// e.g. `MyBot/1.0 (https://example.org/bot; ops@example.org)`.
    pub fn with_user_agent(url: &str, user_agent: Option<String>) -> ApiResult<Self> {
        let endpoint = api_endpoint(url)?;
        tracing::debug!("Using API endpoint {}", endpoint);
        let transport = HttpTransport::new(endpoint)?;
        Ok(Self::with_transport(transport, user_agent))
    }

    /// Creates a client from the `[wiki]` section of the configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] when no URL is configured.
    pub fn from_config(config: &WikiConfig) -> ApiResult<Self> {
        let url = config.url.as_deref().ok_or_else(|| {
            ApiError::InvalidArgument("no wiki URL configured".to_string())
        })?;
        Self::with_user_agent(url, config.user_agent.clone())
    }

    /// Creates a client over any [`Transport`].
    pub fn with_transport(transport: impl Transport + 'static, user_agent: Option<String>) -> Self {
        Self {
            transport: Box::new(transport),
            session: RwLock::new(Session::new(user_agent)),
            tokens: TokenCache::new(),
            auth_lock: tokio::sync::Mutex::new(()),
        }
    }

    /// A snapshot of the current session.
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    /// Whether the client is logged in.
    pub fn is_logged_in(&self) -> bool {
        self.session.read().is_authenticated()
    }

    /// The logged-in username, if any.
    pub fn username(&self) -> Option<String> {
        self.session.read().username().map(str::to_string)
    }

    /// Whether the logged-in account is in the `bot` group.
    pub fn is_bot(&self) -> bool {
        self.session.read().is_bot()
    }

    /// The `User-Agent` header the next request will carry.
    pub fn user_agent(&self) -> String {
        self.session.read().user_agent()
    }

    /// Resolves a requested result count against the session's tier.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidArgument`] for non-positive requests.
    pub fn limit(&self, requested: i64, caps: LimitCaps) -> ApiResult<u32> {
        normalize_limit(requested, caps, self.is_bot())
    }

    /// Sends `params` and returns the parsed JSON reply as-is.
    ///
    /// `format=json` is always added. The reply is not checked for an error
    /// envelope; use [`request`](Self::request) for that. This is the escape
    /// hatch for API modules the library has no dedicated method for.
    pub async fn post(&self, params: Params) -> ApiResult<Value> {
        let params = params.set("format", "json");
        let user_agent = self.user_agent();
        tracing::debug!("POST {}", params.redacted());
        self.transport.post(&params, &user_agent).await
    }

    /// Sends `params` and returns the unparsed reply.
    pub async fn post_raw(&self, params: Params) -> ApiResult<RawResponse> {
        let params = params.set("format", "json");
        let user_agent = self.user_agent();
        tracing::debug!("POST (raw) {}", params.redacted());
        self.transport.post_raw(&params, &user_agent).await
    }

    /// Sends `params` and fails with [`ApiError::Remote`] on an error envelope.
    pub async fn request(&self, params: Params) -> ApiResult<Value> {
        let reply = self.post(params).await?;
        let result = check_envelope(reply);
        if let Err(ApiError::Remote(remote)) = &result {
            tracing::debug!("Remote error {}", remote);
        }
        result
    }

    /// Sends `params` and reshapes the reply according to `shape`.
    pub async fn fetch(&self, params: Params, shape: Shape<'_>) -> ApiResult<Normalized> {
        let reply = self.post(params).await?;
        normalize(reply, shape)
    }

    /// Returns a token of the given kind, fetching one if none is cached.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::TokenFetchFailed`] if the token request fails for
    /// any reason. Nothing is cached in that case.
    pub async fn token(&self, kind: TokenKind) -> ApiResult<String> {
        self.tokens
            .get_or_fetch(kind, || self.fetch_token(kind))
            .await
    }

    /// Drops every cached token.
    pub fn invalidate_tokens(&self) {
        self.tokens.invalidate();
    }

    /// Sends a write action carrying a token of the given kind.
    ///
    /// The token is obtained first; if that fails the write is never sent.
    pub async fn write(&self, params: Params, kind: TokenKind) -> ApiResult<Value> {
        let token = self.token(kind).await?;
        let result = self.request(params.set("token", token.as_str())).await;

        // Only the token that was rejected is dropped; a newer one stays.
        if matches!(&result, Err(e) if e.code() == Some("badtoken")) {
            self.tokens.invalidate_if(kind, &token);
        }
        result
    }

    async fn fetch_token(&self, kind: TokenKind) -> ApiResult<String> {
        let failed = |reason: String| ApiError::TokenFetchFailed {
            kind: kind.to_string(),
            reason,
        };

        let params = Params::query().set("meta", "tokens").set("type", kind);
        let reply = self.request(params).await.map_err(|e| failed(e.to_string()))?;

        let key = kind.response_key();
        query_section(&reply)
            .ok()
            .and_then(|query| query.get("tokens"))
            .and_then(|tokens| tokens.get(&key))
            .and_then(Value::as_str)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .ok_or_else(|| failed(format!("missing `query.tokens.{}`", key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use serde_json::json;

    fn token_reply(token: &str) -> Value {
        json!({"batchcomplete": "", "query": {"tokens": {"csrftoken": token}}})
    }

    #[tokio::test]
    async fn test_post_adds_format_and_user_agent() {
        let (transport, log) = MockTransport::new(|_| json!({"batchcomplete": ""}));
        let client = WikiClient::with_transport(transport, None);

        client.post(Params::query().set("meta", "siteinfo")).await.unwrap();

        let calls = log.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].params.get("format"), Some("json"));
        assert!(calls[0].user_agent.starts_with("unauthenticated/mediawiki-butt/"));
    }

    #[tokio::test]
    async fn test_user_agent_override() {
        let (transport, log) = MockTransport::new(|_| json!({}));
        let client = WikiClient::with_transport(transport, Some("TestBot/0.1".to_string()));

        client.post(Params::query()).await.unwrap();
        assert_eq!(log.calls()[0].user_agent, "TestBot/0.1");
    }

    #[tokio::test]
    async fn test_token_is_cached_per_session() {
        let (transport, log) = MockTransport::new(|_| token_reply("abc+\\"));
        let client = WikiClient::with_transport(transport, None);

        let first = client.token(TokenKind::Csrf).await.unwrap();
        let second = client.token(TokenKind::Csrf).await.unwrap();

        assert_eq!(first, "abc+\\");
        assert_eq!(first, second);
        assert_eq!(log.count(|p| p.get("meta") == Some("tokens")), 1);
        assert_eq!(log.calls()[0].params.get("type"), Some("csrf"));
    }

    #[tokio::test]
    async fn test_token_fetch_failure_is_reported() {
        let (transport, _log) = MockTransport::new(|_| {
            json!({"error": {"code": "readapidenied", "info": "denied"}})
        });
        let client = WikiClient::with_transport(transport, None);

        let err = client.token(TokenKind::Csrf).await.unwrap_err();
        match err {
            ApiError::TokenFetchFailed { kind, reason } => {
                assert_eq!(kind, "csrf");
                assert!(reason.contains("readapidenied"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(client.tokens.is_empty());
    }

    #[tokio::test]
    async fn test_empty_token_is_a_failure() {
        let (transport, _log) = MockTransport::new(|_| token_reply(""));
        let client = WikiClient::with_transport(transport, None);

        assert!(matches!(
            client.token(TokenKind::Csrf).await,
            Err(ApiError::TokenFetchFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_write_always_carries_token() {
        let (transport, log) = MockTransport::new(|p| match p.action_name() {
            Some("query") => token_reply("tok"),
            _ => json!({"purge": []}),
        });
        let client = WikiClient::with_transport(transport, None);

        client
            .write(Params::action("purge").set("titles", "Main Page"), TokenKind::Csrf)
            .await
            .unwrap();

        let purge = log.find("purge").unwrap();
        assert_eq!(purge.get("token"), Some("tok"));
    }

    #[tokio::test]
    async fn test_badtoken_drops_cached_token() {
        let (transport, _log) = MockTransport::new(|p| match p.action_name() {
            Some("query") => token_reply("stale"),
            _ => json!({"error": {"code": "badtoken", "info": "Invalid CSRF token."}}),
        });
        let client = WikiClient::with_transport(transport, None);

        let err = client
            .write(Params::action("purge"), TokenKind::Csrf)
            .await
            .unwrap_err();
        assert_eq!(err.code(), Some("badtoken"));
        assert!(client.tokens.cached(TokenKind::Csrf).is_none());
    }

    #[test]
    fn test_debug_shows_session_not_transport() {
        let (transport, _log) = MockTransport::new(|_| json!({}));
        let client = WikiClient::with_transport(transport, Some("TestBot/0.1".to_string()));

        let rendered = format!("{client:?}");
        assert!(rendered.starts_with("WikiClient"));
        assert!(rendered.contains("TestBot/0.1"));
        assert!(!rendered.contains("transport"));
    }

    #[tokio::test]
    async fn test_limit_uses_session_tier() {
        let (transport, _log) = MockTransport::new(|_| json!({}));
        let client = WikiClient::with_transport(transport, None);

        assert_eq!(client.limit(10_000, LimitCaps::DEFAULT).unwrap(), 500);

        {
            let mut session = client.session.write();
            session.sign_in("RoboAlice".to_string());
            session.set_groups(["bot".to_string()].into_iter().collect());
        }
        assert_eq!(client.limit(10_000, LimitCaps::DEFAULT).unwrap(), 5000);
    }

    #[test]
    fn test_from_config_requires_url() {
        let config = WikiConfig::default();
        assert!(matches!(
            WikiClient::from_config(&config),
            Err(ApiError::InvalidArgument(_))
        ));
    }
}
