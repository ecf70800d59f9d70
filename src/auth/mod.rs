//
//  mediawiki-butt
//  auth/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Authentication Module
//!
//! Session state and security tokens for a [`WikiClient`](crate::WikiClient).
//!
//! ## Module Structure
//!
//! - [`session`]: who the client is logged in as, and the resulting `User-Agent`
//! - [`token`]: the per-session token cache used by write actions
//! - `login`: `login` / `logout` on [`WikiClient`](crate::WikiClient)
//!
//! ## Example
//!
//! ```rust,no_run
//! use mediawiki_butt::WikiClient;
//!
//! # async fn example() -> mediawiki_butt::ApiResult<()> {
//! let client = WikiClient::new("https://wiki.example.org/w")?;
//! client.login("Alice@maintenance", "bot-password").await?;
//! assert!(client.is_logged_in());
//!
//! client.logout().await?;
//! assert!(!client.is_logged_in());
//! # Ok(())
//! # }
//! ```

mod login;

/// Authentication state.
pub mod session;

/// Security tokens.
pub mod token;

pub use session::{library_signature, Session, ANONYMOUS_AGENT, BOT_GROUP};
pub use token::{TokenCache, TokenKind};
