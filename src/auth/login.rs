//
//  mediawiki-butt
//  auth/login.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Login and logout.
//!
//! `action=login` is meant for bot passwords (`User@BotName`). Both operations
//! hold the client's auth lock, so a logout can never interleave with a login
//! on the same client.

use serde_json::Value;

use crate::api::common::{ApiError, ApiResult};
use crate::api::params::Params;
use crate::api::WikiClient;
use crate::auth::TokenKind;

/// `login.result` of a successful login.
const LOGIN_SUCCESS: &str = "Success";

impl WikiClient {
    /// Logs in with a username and (bot) password.
    ///
    /// On success the session records the user and their groups, and every
    /// cached token is dropped.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] for an empty username or password.
    /// - [`ApiError::TokenFetchFailed`] when no login token could be obtained.
    /// - [`ApiError::AuthenticationFailed`] when the wiki refuses the login.
    ///   The session is left as it was.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<()> {
        let params = Params::action("login")
            .require("lgname", username)?
            .require("lgpassword", password)?;

        let _guard = self.auth_lock.lock().await;

        let token = self.token(TokenKind::Login).await?;
        let reply = self.request(params.set("lgtoken", token)).await?;

        let login = reply
            .get("login")
            .and_then(Value::as_object)
            .ok_or_else(|| ApiError::malformed("missing `login` object"))?;
        let result = login
            .get("result")
            .and_then(Value::as_str)
            .ok_or_else(|| ApiError::malformed("missing `login.result`"))?;

        if result != LOGIN_SUCCESS {
            let reason = login
                .get("reason")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            tracing::debug!("Login as {} failed: {}", username, result);
            return Err(ApiError::AuthenticationFailed {
                result: result.to_string(),
                reason,
            });
        }

        let canonical = login
            .get("lgusername")
            .and_then(Value::as_str)
            .unwrap_or(username)
            .to_string();
        self.session.write().sign_in(canonical.clone());
        self.tokens.invalidate();

        match self.current_user_groups().await {
            Ok(groups) => self.session.write().set_groups(groups),
            Err(e) => tracing::warn!("Logged in as {} but could not read groups: {}", canonical, e),
        }

        tracing::debug!("Logged in as {}", canonical);
        Ok(())
    }

    /// Logs out and resets the session.
    ///
    /// The local session is reset and the token cache cleared even when the
    /// wiki reports an error; that error is still returned afterwards.
    pub async fn logout(&self) -> ApiResult<()> {
        let _guard = self.auth_lock.lock().await;

        let result = self
            .write(Params::action("logout"), TokenKind::Csrf)
            .await
            .map(|_| ());

        self.session.write().sign_out();
        self.tokens.invalidate();

        if let Err(e) = &result {
            tracing::warn!("Logout request failed: {}", e);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn wiki(login_result: &'static str) -> impl Fn(&Params) -> Value + Send + Sync {
        let csrf_fetches = Arc::new(AtomicUsize::new(0));
        move |p: &Params| match (p.action_name(), p.get("meta"), p.get("type")) {
            (Some("query"), Some("tokens"), Some("login")) => {
                json!({"query": {"tokens": {"logintoken": "login-tok+\\"}}})
            }
            (Some("query"), Some("tokens"), _) => {
                let n = csrf_fetches.fetch_add(1, Ordering::SeqCst);
                json!({"query": {"tokens": {"csrftoken": format!("csrf-{}+\\", n)}}})
            }
            (Some("query"), Some("userinfo"), _) => json!({"query": {"userinfo": {
                "id": 5, "name": "RoboAlice", "groups": ["*", "user", "bot"]
            }}}),
            (Some("login"), _, _) => match login_result {
                "Success" => json!({"login": {"result": "Success", "lguserid": 5, "lgusername": "RoboAlice"}}),
                other => json!({"login": {"result": other, "reason": "Incorrect username or password entered."}}),
            },
            (Some("logout"), _, _) => json!({}),
            _ => json!({"error": {"code": "unexpected", "info": "unexpected request"}}),
        }
    }

    #[tokio::test]
    async fn test_login_sets_session_and_drops_tokens() {
        let (transport, log) = MockTransport::new(wiki("Success"));
        let client = WikiClient::with_transport(transport, None);

        let before = client.token(TokenKind::Csrf).await.unwrap();
        client.login("RoboAlice@tool", "secret").await.unwrap();

        assert!(client.is_logged_in());
        assert_eq!(client.username().as_deref(), Some("RoboAlice"));
        assert!(client.is_bot());
        assert!(client.user_agent().starts_with("RoboAlice/mediawiki-butt/"));

        let sent = log.find("login").unwrap();
        assert_eq!(sent.get("lgname"), Some("RoboAlice@tool"));
        assert_eq!(sent.get("lgtoken"), Some("login-tok+\\"));

        let after = client.token(TokenKind::Csrf).await.unwrap();
        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn test_wrong_password_leaves_session_alone() {
        let (transport, log) = MockTransport::new(wiki("WrongPass"));
        let client = WikiClient::with_transport(transport, None);

        let err = client.login("Alice", "nope").await.unwrap_err();
        match err {
            ApiError::AuthenticationFailed { result, reason } => {
                assert_eq!(result, "WrongPass");
                assert!(reason.contains("Incorrect"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert!(!client.is_logged_in());
        assert_eq!(client.username(), None);
        assert_eq!(log.count(|p| p.get("meta") == Some("userinfo")), 0);
    }

    #[tokio::test]
    async fn test_login_tokens_are_never_cached() {
        let (transport, log) = MockTransport::new(wiki("Failed"));
        let client = WikiClient::with_transport(transport, None);

        let _ = client.login("Alice", "a").await;
        let _ = client.login("Alice", "b").await;

        assert_eq!(log.count(|p| p.get("type") == Some("login")), 2);
    }

    #[tokio::test]
    async fn test_empty_credentials_are_rejected_locally() {
        let (transport, log) = MockTransport::new(wiki("Success"));
        let client = WikiClient::with_transport(transport, None);

        assert!(matches!(
            client.login("Alice", "").await,
            Err(ApiError::InvalidArgument(_))
        ));
        assert!(log.calls().is_empty());
    }

    #[tokio::test]
    async fn test_logout_resets_session_and_tokens() {
        let (transport, log) = MockTransport::new(wiki("Success"));
        let client = WikiClient::with_transport(transport, Some("TestBot/0.1".to_string()));

        client.login("RoboAlice", "secret").await.unwrap();
        let before = client.token(TokenKind::Csrf).await.unwrap();

        client.logout().await.unwrap();

        assert!(!client.is_logged_in());
        assert!(!client.is_bot());
        assert!(client.session().groups().is_empty());
        assert_eq!(client.user_agent(), "TestBot/0.1");
        assert!(log.find("logout").unwrap().contains("token"));

        let after = client.token(TokenKind::Csrf).await.unwrap();
        assert_ne!(before, after);
    }

    #[tokio::test]
    async fn test_logout_resets_even_on_remote_error() {
        let (transport, _log) = MockTransport::new(|p| match p.action_name() {
            Some("query") => json!({"query": {"tokens": {"csrftoken": "t"}}}),
            _ => json!({"error": {"code": "assertuserfailed", "info": "gone"}}),
        });
        let client = WikiClient::with_transport(transport, None);
        client.session.write().sign_in("Alice".to_string());

        let err = client.logout().await.unwrap_err();
        assert_eq!(err.code(), Some("assertuserfailed"));
        assert!(!client.is_logged_in());
        assert!(client.tokens.is_empty());
    }
}
