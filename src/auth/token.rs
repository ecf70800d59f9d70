//
//  mediawiki-butt
//  auth/token.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Security Token Cache
//!
//! Every write action on a MediaWiki wiki must carry a token obtained from
//! `action=query&meta=tokens`. Tokens are bound to the login session, so they
//! can be reused for as long as the session lasts and must be thrown away
//! whenever it changes.
//!
//! ## States
//!
//! ```text
//!             get (miss)              fetch ok
//!   Absent ─────────────> Fetching ─────────────> Cached
//!     ^                      │                       │
//!     │      fetch failed    │                       │
//!     ├──────────────────────┘                       │
//!     │        login / logout / invalidate           │
//!     └──────────────────────────────────────────────┘
//! ```
//!
//! Concurrent requests for the same uncached kind share a single fetch. A
//! failed fetch is never cached; the next request tries again.
//!
//! ## Token Kinds
//!
//! | Kind | Used by |
//! |------|---------|
//! | `csrf` | block, unblock, edit, logout, and most other writes |
//! | `login` | `action=login` (never cached) |
//! | `watch`, `patrol`, `rollback`, `userrights`, `createaccount` | their namesake actions |

use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::api::common::{ApiError, ApiResult};

/// The kinds of token `meta=tokens` can issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    /// Cross-site request forgery token, used by most write actions.
    Csrf,
    /// Login token. Fetched fresh for every login attempt.
    Login,
    /// Watchlist token.
    Watch,
    /// Patrol token.
    Patrol,
    /// Rollback token.
    Rollback,
    /// User rights token.
    UserRights,
    /// Account creation token.
    CreateAccount,
}

impl TokenKind {
    /// The value sent as `type=` in the token request.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csrf => "csrf",
            Self::Login => "login",
            Self::Watch => "watch",
            Self::Patrol => "patrol",
            Self::Rollback => "rollback",
            Self::UserRights => "userrights",
            Self::CreateAccount => "createaccount",
        }
    }

    /// The key the token is returned under in `query.tokens`.
    pub fn response_key(&self) -> String {
        format!("{}token", self.as_str())
    }

    /// Whether tokens of this kind may be reused across requests.
    pub fn is_cacheable(&self) -> bool {
        !matches!(self, Self::Login)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TokenKind {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "csrf" => Ok(Self::Csrf),
            "login" => Ok(Self::Login),
            "watch" => Ok(Self::Watch),
            "patrol" => Ok(Self::Patrol),
            "rollback" => Ok(Self::Rollback),
            "userrights" => Ok(Self::UserRights),
            "createaccount" => Ok(Self::CreateAccount),
            other => Err(ApiError::InvalidArgument(format!(
                "unknown token kind `{}`",
                other
            ))),
        }
    }
}

/// Process-lifetime store of tokens, one slot per kind.
#[derive(Debug, Default)]
pub struct TokenCache {
    slots: Mutex<HashMap<TokenKind, Arc<OnceCell<String>>>>,
}

impl TokenCache {
    /// Creates an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached token for `kind` without fetching.
    pub fn cached(&self, kind: TokenKind) -> Option<String> {
        self.slots
            .lock()
            .get(&kind)
            .and_then(|slot| slot.get().cloned())
    }

    /// Returns the cached token, or runs `fetch` to obtain one.
    ///
    /// Only one `fetch` runs at a time per kind; callers arriving while it is
    /// in flight wait for its outcome. An error from `fetch` is returned to
    /// every waiter and leaves the slot empty.
    pub async fn get_or_fetch<F, Fut>(&self, kind: TokenKind, fetch: F) -> ApiResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = ApiResult<String>>,
    {
        if !kind.is_cacheable() {
            return fetch().await;
        }

        let slot = self.slot(kind);
        if let Some(token) = slot.get() {
            tracing::debug!("{} token cache hit", kind);
            return Ok(token.clone());
        }

        tracing::debug!("{} token cache miss", kind);
        slot.get_or_try_init(fetch).await.cloned()
    }

    /// Drops every cached token.
    pub fn invalidate(&self) {
        self.slots.lock().clear();
    }

    /// Drops the cached token for `kind` only if it is still `token`.
    pub fn invalidate_if(&self, kind: TokenKind, token: &str) {
        let mut slots = self.slots.lock();
        let stale = slots
            .get(&kind)
            .and_then(|slot| slot.get())
            .is_some_and(|cached| cached == token);
        if stale {
            tracing::debug!("Dropping rejected {} token", kind);
            slots.remove(&kind);
        }
    }

    /// Number of kinds currently holding a token.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| slot.initialized())
            .count()
    }

    /// Whether no token is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, kind: TokenKind) -> Arc<OnceCell<String>> {
        self.slots.lock().entry(kind).or_default().clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_second_get_uses_cache() {
        let cache = TokenCache::new();
        let fetches = AtomicUsize::new(0);

        for _ in 0..3 {
            let token = cache
                .get_or_fetch(TokenKind::Csrf, || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok("abc+\\".to_string())
                })
                .await
                .unwrap();
            assert_eq!(token, "abc+\\");
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached(TokenKind::Csrf).as_deref(), Some("abc+\\"));
    }

    #[tokio::test]
    async fn test_failure_is_not_cached() {
        let cache = TokenCache::new();

        let result = cache
            .get_or_fetch(TokenKind::Csrf, || async {
                Err(ApiError::TokenFetchFailed {
                    kind: "csrf".to_string(),
                    reason: "offline".to_string(),
                })
            })
            .await;
        let err = tokio_test::assert_err!(result);
        assert!(matches!(err, ApiError::TokenFetchFailed { .. }));
        assert!(cache.cached(TokenKind::Csrf).is_none());

        let token = cache
            .get_or_fetch(TokenKind::Csrf, || async { Ok("fresh".to_string()) })
            .await
            .unwrap();
        assert_eq!(token, "fresh");
    }

    #[tokio::test]
    async fn test_invalidate_if_matches_value() {
        let cache = TokenCache::new();
        cache
            .get_or_fetch(TokenKind::Csrf, || async { Ok("current".to_string()) })
            .await
            .unwrap();

        cache.invalidate_if(TokenKind::Csrf, "older");
        assert_eq!(cache.cached(TokenKind::Csrf).as_deref(), Some("current"));

        cache.invalidate_if(TokenKind::Csrf, "current");
        assert!(cache.cached(TokenKind::Csrf).is_none());
    }

    #[tokio::test]
    async fn test_invalidate_forces_refetch() {
        let cache = TokenCache::new();
        cache
            .get_or_fetch(TokenKind::Csrf, || async { Ok("old".to_string()) })
            .await
            .unwrap();
        cache
            .get_or_fetch(TokenKind::Watch, || async { Ok("w".to_string()) })
            .await
            .unwrap();
        assert_eq!(cache.len(), 2);

        cache.invalidate_if(TokenKind::Watch, "w");
        assert_eq!(cache.len(), 1);

        cache.invalidate();
        assert!(cache.is_empty());

        let token = cache
            .get_or_fetch(TokenKind::Csrf, || async { Ok("new".to_string()) })
            .await
            .unwrap();
        assert_eq!(token, "new");
    }

    #[tokio::test]
    async fn test_login_tokens_are_never_cached() {
        let cache = TokenCache::new();
        let fetches = AtomicUsize::new(0);

        for _ in 0..2 {
            cache
                .get_or_fetch(TokenKind::Login, || async {
                    fetches.fetch_add(1, Ordering::SeqCst);
                    Ok("login".to_string())
                })
                .await
                .unwrap();
        }

        assert_eq!(fetches.load(Ordering::SeqCst), 2);
        assert!(cache.cached(TokenKind::Login).is_none());
    }

    #[tokio::test]
    async fn test_concurrent_misses_share_one_fetch() {
        let cache = Arc::new(TokenCache::new());
        let fetches = Arc::new(AtomicUsize::new(0));

        let mut handles = Vec::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let fetches = Arc::clone(&fetches);
            handles.push(tokio::spawn(async move {
                cache
                    .get_or_fetch(TokenKind::Csrf, || async {
                        fetches.fetch_add(1, Ordering::SeqCst);
                        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
                        Ok("shared".to_string())
                    })
                    .await
            }));
        }

        for handle in handles {
            assert_eq!(handle.await.unwrap().unwrap(), "shared");
        }
        assert_eq!(fetches.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_kind_round_trip_and_keys() {
        assert_eq!("csrf".parse::<TokenKind>().unwrap(), TokenKind::Csrf);
        assert_eq!(TokenKind::UserRights.response_key(), "userrightstoken");
        assert!("block".parse::<TokenKind>().is_err());
    }
}
