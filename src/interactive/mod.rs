//
//  mediawiki-butt
//  interactive/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Terminal prompts used by the CLI.

pub mod prompt;

pub use prompt::{prompt_confirm, prompt_password};
