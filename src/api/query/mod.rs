//
//  mediawiki-butt
//  api/query/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Read Operations
//!
//! Everything under `action=query`, grouped by submodule kind:
//!
//! - [`lists`]: wiki-wide enumerations (`list=allpages`, `list=tags`, ...)
//! - [`log`]: log events (`list=logevents`)
//! - [`properties`]: per-page data (`prop=contributors`)
//! - [`meta`]: user information (`meta=userinfo`, `list=users`)
//!
//! All operations are methods on [`WikiClient`](crate::WikiClient) and take a
//! requested limit that is clamped to the session's tier before sending.

pub mod lists;
pub mod log;
pub mod meta;
pub mod properties;

pub use lists::DEFAULT_LIMIT;
pub use log::{LogEvent, LogFilter, DELETE_ACTION, RESTORE_ACTION};
pub use properties::Contributors;
