//
//  mediawiki-butt
//  lib.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # MediaWiki Butt
//!
//! A client library for the MediaWiki action API, plus the `mwb` command line
//! tool built on it.
//!
//! ## Overview
//!
//! [`WikiClient`] is bound to one wiki and owns that connection's state: the
//! login session, the user's groups and the security tokens used for writes.
//! Nothing is global; two clients never share state.
//!
//! ## Features
//!
//! - **Lists**: categories, files, pages by namespace, users, blocks,
//!   transclusions, deleted files, protected titles, random pages, tags
//! - **Logs**: deletions and restorations, filtered by user, page and time
//! - **Pages**: logged-in and anonymous contributors
//! - **Users**: group membership and bot detection
//! - **Writes**: block, unblock and edit, with cached tokens
//! - **Limits**: every requested limit is clamped to what the account may ask for
//!
//! ## Module Structure
//!
//! - [`api`]: the client, request parameters, reply handling and operations
//! - [`auth`]: session state, token cache, login and logout
//! - [`config`]: the `mwb` configuration file
//! - [`constants`]: well-known namespace ids
//! - [`cli`]: `mwb` command definitions
//! - [`output`]: table and JSON output
//! - [`interactive`]: terminal prompts
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use mediawiki_butt::WikiClient;
//!
//! # async fn example() -> mediawiki_butt::ApiResult<()> {
//! let client = WikiClient::new("https://en.wikipedia.org/w")?;
//!
//! for event in client.delete_log(&Default::default()).await? {
//!     println!("{} deleted {} at {}", event.user, event.title, event.timestamp);
//! }
//! # Ok(())
//! # }
//! ```

/// MediaWiki API client and operations.
pub mod api;

/// Session state, tokens, login and logout.
pub mod auth;

/// Command-line interface definitions.
pub mod cli;

/// Configuration file management.
pub mod config;

/// Namespace ids.
pub mod constants;

/// Terminal prompts.
pub mod interactive;

/// Output formatting.
///
/// - Table format: human-readable tables for interactive use
/// - JSON format: machine-readable output for scripting
pub mod output;

pub use api::{ApiError, ApiResult, RemoteError, WikiClient};

pub use auth::{Session, TokenKind};

pub use cli::Cli;

pub use config::Config;

/// Name of the command line binary and its config directory.
pub const APP_NAME: &str = "mwb";

/// Library version, also used in the generated `User-Agent`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Process exit codes used by `mwb`.
pub mod exit_codes {
    /// Command completed successfully.
    pub const SUCCESS: i32 = 0;

    /// Generic failure.
    pub const ERROR: i32 = 1;

    /// Invalid arguments, detected before contacting the wiki.
    pub const USAGE: i32 = 2;

    /// Login was refused.
    pub const AUTH_ERROR: i32 = 4;

    /// The page or user does not exist.
    pub const NOT_FOUND: i32 = 8;

    /// The wiki answered with an error code.
    pub const REMOTE: i32 = 16;
}
