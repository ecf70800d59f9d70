//
//  mediawiki-butt
//  api/admin.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Administrative Actions
//!
//! Blocking and unblocking users. Both are write actions: a `csrf` token is
//! fetched (or taken from the cache) strictly before the action is sent, and
//! a failed token fetch aborts the action without transmitting it.
//!
//! ## Example
//!
//! ```rust,no_run
//! use mediawiki_butt::api::admin::BlockRequest;
//! use mediawiki_butt::WikiClient;
//!
//! # async fn example(client: &WikiClient) -> mediawiki_butt::ApiResult<()> {
//! let request = BlockRequest::new("Eve")
//!     .expiry("2 weeks")
//!     .reason("Vandalism");
//!
//! match client.block(&request).await {
//!     Ok(id) => println!("Block {} created", id),
//!     Err(e) if e.code() == Some("alreadyblocked") => println!("Already blocked"),
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use serde_json::Value;

use crate::api::common::{ApiError, ApiResult};
use crate::api::params::Params;
use crate::api::response::value_to_u64;
use crate::api::WikiClient;
use crate::auth::TokenKind;

/// Block duration used when none is given.
pub const DEFAULT_EXPIRY: &str = "2 weeks";

/// Parameters for [`WikiClient::block`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRequest {
    pub user: String,
    /// A relative duration (`2 weeks`), a timestamp, or `infinite`.
    pub expiry: String,
    pub reason: Option<String>,
    /// Prevent account creation.
    pub no_create: bool,
    /// Block the last IP address the user edited from.
    pub autoblock: bool,
    /// Prevent the user from sending email.
    pub no_email: bool,
    /// Let the user keep editing their own talk page.
    pub allow_user_talk: bool,
    /// Replace an existing block instead of failing with `alreadyblocked`.
    pub reblock: bool,
}

impl BlockRequest {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            expiry: DEFAULT_EXPIRY.to_string(),
            reason: None,
            no_create: true,
            autoblock: false,
            no_email: false,
            allow_user_talk: false,
            reblock: false,
        }
    }

    pub fn expiry(mut self, expiry: impl Into<String>) -> Self {
        self.expiry = expiry.into();
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn no_create(mut self, enabled: bool) -> Self {
        self.no_create = enabled;
        self
    }

    pub fn autoblock(mut self, enabled: bool) -> Self {
        self.autoblock = enabled;
        self
    }

    pub fn no_email(mut self, enabled: bool) -> Self {
        self.no_email = enabled;
        self
    }

    pub fn allow_user_talk(mut self, enabled: bool) -> Self {
        self.allow_user_talk = enabled;
        self
    }

    pub fn reblock(mut self, enabled: bool) -> Self {
        self.reblock = enabled;
        self
    }

    fn to_params(&self) -> ApiResult<Params> {
        Ok(Params::action("block")
            .require("user", &self.user)?
            .require("expiry", &self.expiry)?
            .set_opt("reason", self.reason.as_deref())
            .flag("nocreate", self.no_create)
            .flag("autoblock", self.autoblock)
            .flag("noemail", self.no_email)
            .flag("allowusertalk", self.allow_user_talk)
            .flag("reblock", self.reblock))
    }
}

/// Reads the block id from a `block`/`unblock` reply.
///
/// Current MediaWiki nests it as `<action>.id`; very old versions put it at
/// the top level.
fn action_id(reply: &Value, action: &str) -> ApiResult<u64> {
    reply
        .get(action)
        .and_then(|section| section.get("id"))
        .or_else(|| reply.get("id"))
        .ok_or_else(|| ApiError::malformed(format!("missing `{}.id`", action)))
        .and_then(value_to_u64)
}

impl WikiClient {
    /// Blocks a user and returns the id of the new block.
    ///
    /// # Errors
    ///
    /// - [`ApiError::InvalidArgument`] for an empty user or expiry.
    /// - [`ApiError::TokenFetchFailed`] when no csrf token could be obtained;
    ///   the block is not sent.
    /// - [`ApiError::Remote`] for refusals such as `alreadyblocked` or
    ///   `permissiondenied`.
    pub async fn block(&self, request: &BlockRequest) -> ApiResult<u64> {
        let params = request.to_params()?;
        let reply = self.write(params, TokenKind::Csrf).await?;
        let id = action_id(&reply, "block")?;
        tracing::debug!("Blocked {} (block id {})", request.user, id);
        Ok(id)
    }

    /// Lifts the block on `user` and returns the id of the removed block.
    pub async fn unblock(&self, user: &str, reason: Option<&str>) -> ApiResult<u64> {
        let params = Params::action("unblock")
            .require("user", user)?
            .set_opt("reason", reason);
        let reply = self.write(params, TokenKind::Csrf).await?;
        let id = action_id(&reply, "unblock")?;
        tracing::debug!("Unblocked {} (block id {})", user, id);
        Ok(id)
    }
}
