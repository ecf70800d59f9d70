//
//  mediawiki-butt
//  cli/user.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! User commands: group membership and the current session.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use super::{connect, GlobalOptions, Login, NotFound};
use crate::auth::BOT_GROUP;
use crate::config::Config;
use crate::output::{format_bool, print_field, print_header, TableOutput};

#[derive(Args, Debug)]
pub struct GroupsCommand {
    /// User to look up; defaults to the logged-in user
    pub user: Option<String>,
}

#[derive(Args, Debug)]
pub struct WhoamiCommand {}

#[derive(Debug, Clone, Serialize)]
struct UserGroups {
    user: String,
    groups: Vec<String>,
    bot: bool,
}

impl TableOutput for UserGroups {
    fn print_table(&self, color: bool) {
        print_header(&self.user);
        print_field("Groups", &self.groups.join(", "), color);
        print_field("Bot", &format_bool(self.bot, color), color);
    }
}

#[derive(Debug, Clone, Serialize)]
struct Identity {
    logged_in: bool,
    username: Option<String>,
    bot: bool,
    groups: Vec<String>,
    user_agent: String,
}

impl TableOutput for Identity {
    fn print_table(&self, color: bool) {
        match &self.username {
            Some(name) => print_field("Logged in as", name, color),
            None => print_field("Logged in as", "(anonymous)", color),
        }
        if self.logged_in {
            print_field("Groups", &self.groups.join(", "), color);
            print_field("Bot", &format_bool(self.bot, color), color);
        }
        print_field("User-Agent", &self.user_agent, color);
    }
}

impl GroupsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let output = global.output(&config);

        let view = match &self.user {
            Some(user) => {
                let client = connect(global, &config, Login::IfConfigured).await?;
                let groups = client
                    .user_groups(user)
                    .await
                    .with_context(|| format!("Failed to read groups of {}", user))?
                    .ok_or_else(|| NotFound(format!("User '{}'", user)))?;
                UserGroups {
                    user: user.clone(),
                    bot: groups.contains(BOT_GROUP),
                    groups: groups.into_iter().collect(),
                }
            }
            None => {
                let client = connect(global, &config, Login::Required).await?;
                let session = client.session();
                UserGroups {
                    user: session.username().unwrap_or_default().to_string(),
                    bot: session.is_bot(),
                    groups: session.groups().iter().cloned().collect(),
                }
            }
        };

        output.write(&view)
    }
}

impl WhoamiCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = connect(global, &config, Login::IfConfigured).await?;
        let output = global.output(&config);

        let session = client.session();
        let identity = Identity {
            logged_in: session.is_authenticated(),
            username: session.username().map(str::to_string),
            bot: session.is_bot(),
            groups: session.groups().iter().cloned().collect(),
            user_agent: session.user_agent(),
        };

        output.write(&identity)
    }
}
