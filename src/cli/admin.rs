//
//  mediawiki-butt
//  cli/admin.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Administrative commands: block and unblock.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::json;

use super::{connect, GlobalOptions, Login};
use crate::api::admin::{BlockRequest, DEFAULT_EXPIRY};
use crate::config::Config;
use crate::interactive::prompt_confirm;

#[derive(Args, Debug)]
pub struct BlockCommand {
    /// User name or IP address to block
    pub user: String,

    /// Duration (e.g. "2 weeks", "infinite") or timestamp
    #[arg(long, short = 'e', default_value = DEFAULT_EXPIRY)]
    pub expiry: String,

    /// Reason shown in the block log
    #[arg(long, short = 'r')]
    pub reason: Option<String>,

    /// Let the user keep creating accounts
    #[arg(long)]
    pub allow_account_creation: bool,

    /// Also block the last IP address used
    #[arg(long)]
    pub autoblock: bool,

    /// Prevent sending email
    #[arg(long)]
    pub no_email: bool,

    /// Let the user keep editing their own talk page
    #[arg(long)]
    pub allow_user_talk: bool,

    /// Replace an existing block
    #[arg(long)]
    pub reblock: bool,

    /// Skip the confirmation prompt
    #[arg(long, short = 'y')]
    pub yes: bool,
}

#[derive(Args, Debug)]
pub struct UnblockCommand {
    /// User name or IP address to unblock
    pub user: String,

    /// Reason shown in the block log
    #[arg(long, short = 'r')]
    pub reason: Option<String>,
}

impl BlockCommand {
    fn request(&self) -> BlockRequest {
        let request = BlockRequest::new(self.user.clone())
            .expiry(self.expiry.clone())
            .no_create(!self.allow_account_creation)
            .autoblock(self.autoblock)
            .no_email(self.no_email)
            .allow_user_talk(self.allow_user_talk)
            .reblock(self.reblock);
        match &self.reason {
            Some(reason) => request.reason(reason.clone()),
            None => request,
        }
    }

    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let output = global.output(&config);

        if !self.yes && !global.no_prompt {
            let question = format!("Block {} for {}?", self.user, self.expiry);
            if !prompt_confirm(&question, false)? {
                output.write_info("Cancelled");
                return Ok(());
            }
        }

        let client = connect(global, &config, Login::Required).await?;
        let id = client
            .block(&self.request())
            .await
            .with_context(|| format!("Failed to block {}", self.user))?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&json!({"user": self.user, "id": id}))?);
        } else {
            output.write_success(&format!("Blocked {} (block id {})", self.user, id));
        }
        Ok(())
    }
}

impl UnblockCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let output = global.output(&config);
        let client = connect(global, &config, Login::Required).await?;

        let id = client
            .unblock(&self.user, self.reason.as_deref())
            .await
            .with_context(|| format!("Failed to unblock {}", self.user))?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&json!({"user": self.user, "id": id}))?);
        } else {
            output.write_success(&format!("Unblocked {} (block id {})", self.user, id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_defaults() {
        let command = BlockCommand {
            user: "Eve".to_string(),
            expiry: DEFAULT_EXPIRY.to_string(),
            reason: None,
            allow_account_creation: false,
            autoblock: false,
            no_email: false,
            allow_user_talk: false,
            reblock: false,
            yes: true,
        };
        assert_eq!(command.request(), BlockRequest::new("Eve"));
    }
}
