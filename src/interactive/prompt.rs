//
//  mediawiki-butt
//  interactive/prompt.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Interactive Prompts Module
//!
//! Thin wrappers over `dialoguer` for the few questions `mwb` ever asks:
//! a login password and confirmation before administrative actions.
//!
//! # Example
//!
//! ```no_run
//! use mediawiki_butt::interactive::prompt::{prompt_confirm, prompt_password};
//!
//! let password = prompt_password("Password for ExampleBot")?;
//!
//! if prompt_confirm("Block Eve for 2 weeks?", false)? {
//!     println!("Blocking");
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::Result;
use dialoguer::{Confirm, Password};

/// Prompts for a password without echoing it.
pub fn prompt_password(message: &str) -> Result<String> {
    let password = Password::new().with_prompt(message).interact()?;
    Ok(password)
}

/// Prompts for a yes/no answer, pre-selecting `default`.
pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    let confirmed = Confirm::new()
        .with_prompt(message)
        .default(default)
        .interact()?;
    Ok(confirmed)
}
