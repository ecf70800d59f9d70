//
//  mediawiki-butt
//  auth/session.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Session state for one client.
//!
//! A [`Session`] records who the client is logged in as and which user groups
//! that account belongs to. The groups decide the limit tier (bots get higher
//! caps) and the username feeds the `User-Agent` header.
//!
//! ```rust
//! use mediawiki_butt::auth::Session;
//!
//! let session = Session::new(None);
//! assert!(!session.is_authenticated());
//! assert!(session.user_agent().starts_with("unauthenticated/mediawiki-butt/"));
//!
//! let custom = Session::new(Some("MyBot/1.0 (ops@example.org)".to_string()));
//! assert_eq!(custom.user_agent(), "MyBot/1.0 (ops@example.org)");
//! ```

use std::collections::BTreeSet;

/// The group that grants bot limits.
pub const BOT_GROUP: &str = "bot";

/// Name used in the `User-Agent` header when nobody is logged in.
pub const ANONYMOUS_AGENT: &str = "unauthenticated";

/// Library signature appended to generated user agents.
pub fn library_signature() -> String {
    format!("mediawiki-butt/{}", crate::VERSION)
}

/// Authentication state of a client.
///
/// `username` is set if and only if the session is authenticated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    authenticated: bool,
    username: Option<String>,
    groups: BTreeSet<String>,
    user_agent_override: Option<String>,
}

impl Session {
    /// Creates an unauthenticated session.
    pub fn new(user_agent_override: Option<String>) -> Self {
        Self {
            user_agent_override,
            ..Self::default()
        }
    }

    /// Whether a login succeeded and no logout happened since.
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    /// The logged-in username.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The logged-in account's groups. Empty when unauthenticated.
    pub fn groups(&self) -> &BTreeSet<String> {
        &self.groups
    }

    /// Whether the session gets bot limits.
    ///
    /// Unauthenticated sessions never do.
    pub fn is_bot(&self) -> bool {
        self.authenticated && self.groups.contains(BOT_GROUP)
    }

    /// The configured `User-Agent` override, if any.
    pub fn user_agent_override(&self) -> Option<&str> {
        self.user_agent_override.as_deref()
    }

    /// The `User-Agent` header value for the next request.
    pub fn user_agent(&self) -> String {
        if let Some(agent) = &self.user_agent_override {
            return agent.clone();
        }
        let who = self.username.as_deref().unwrap_or(ANONYMOUS_AGENT);
        format!("{}/{}", who, library_signature())
    }

    pub(crate) fn sign_in(&mut self, username: String) {
        self.authenticated = true;
        self.username = Some(username);
        self.groups.clear();
    }

    pub(crate) fn set_groups(&mut self, groups: BTreeSet<String>) {
        if self.authenticated {
            self.groups = groups;
        }
    }

    /// Resets to the initial unauthenticated state, keeping the agent override.
    pub(crate) fn sign_out(&mut self) {
        let user_agent_override = self.user_agent_override.take();
        *self = Self::new(user_agent_override);
    }
}
