//
//  mediawiki-butt
//  cli/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI command definitions using clap derive macros

mod admin;
mod completion;
mod config;
mod edit;
mod list;
mod log;
mod page;
mod user;

pub use admin::{BlockCommand, UnblockCommand};
pub use completion::CompletionCommand;
pub use config::ConfigCommand;
pub use edit::EditCommand;
pub use list::ListCommand;
pub use log::LogCommand;
pub use page::ContributorsCommand;
pub use user::{GroupsCommand, WhoamiCommand};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use thiserror::Error;

use crate::api::{ApiError, WikiClient};
use crate::config::Config;
use crate::exit_codes;
use crate::interactive::prompt_password;
use crate::output::{OutputFormat, OutputWriter};

/// Main CLI structure
#[derive(Parser, Debug)]
#[command(
    name = "mwb",
    version,
    about = "Query and administer MediaWiki wikis from the command line",
    long_about = "mwb talks to any MediaWiki wiki through its action API.\n\n\
                  It lists pages, users and logs, and performs edits and blocks.",
    propagate_version = true,
    after_help = "Use 'mwb <command> --help' for more information about a command."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub global: GlobalOptions,
}

/// Options shared by every command
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Wiki script path or api.php URL (e.g. https://en.wikipedia.org/w)
    #[arg(long, global = true, env = "MWB_URL")]
    pub url: Option<String>,

    /// Log in as this user (bot passwords: User@BotName)
    #[arg(long, short = 'u', global = true, env = "MWB_USERNAME")]
    pub username: Option<String>,

    /// Password for --username
    #[arg(long, global = true, env = "MWB_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Send this User-Agent instead of the generated one
    #[arg(long, global = true, env = "MWB_USER_AGENT")]
    pub user_agent: Option<String>,

    /// Output JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Never prompt; fail instead
    #[arg(long, global = true, env = "MWB_NO_PROMPT")]
    pub no_prompt: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List wiki-wide collections (pages, users, tags, ...)
    #[command(visible_alias = "ls")]
    List(ListCommand),

    /// Read deletion and restoration logs
    Log(LogCommand),

    /// Show who contributed to a page
    Contributors(ContributorsCommand),

    /// Show a user's groups
    Groups(GroupsCommand),

    /// Block a user
    Block(BlockCommand),

    /// Lift a block
    Unblock(UnblockCommand),

    /// Replace the text of a page
    Edit(EditCommand),

    /// Show the current session
    Whoami(WhoamiCommand),

    /// Manage configuration
    Config(ConfigCommand),

    /// Generate shell completions
    Completion(CompletionCommand),

    /// Show version information
    Version,
}

/// A page or user that does not exist on the wiki.
#[derive(Debug, Error)]
#[error("{0} not found")]
pub struct NotFound(pub String);

impl GlobalOptions {
    /// Picks the output format: `--json` wins over the configured format.
    pub fn output(&self, config: &Config) -> OutputWriter {
        if self.json {
            return OutputWriter::json();
        }
        let format = config.output.format.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring unknown output format '{}'", config.output.format);
            OutputFormat::Table
        });
        OutputWriter::new(format)
    }
}

/// How a command needs the session to be set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Login {
    /// Log in only if a username is configured.
    IfConfigured,
    /// Fail unless a username is configured.
    Required,
}

/// Builds a client from flags, environment and config file, logging in as needed.
pub async fn connect(global: &GlobalOptions, config: &Config, login: Login) -> Result<WikiClient> {
    let url = global
        .url
        .as_deref()
        .or(config.wiki.url.as_deref())
        .context("No wiki URL. Use --url, set MWB_URL, or run 'mwb config set wiki.url <url>'")?;
    let user_agent = global.user_agent.clone().or_else(|| config.wiki.user_agent.clone());

    let client = WikiClient::with_user_agent(url, user_agent)
        .with_context(|| format!("Cannot use wiki URL '{}'", url))?;

    let username = global.username.as_deref().or(config.wiki.username.as_deref());
    let Some(username) = username else {
        if login == Login::Required {
            anyhow::bail!("This command requires login. Use --username or set wiki.username");
        }
        return Ok(client);
    };

    let password = match &global.password {
        Some(password) => password.clone(),
        None if global.no_prompt => {
            anyhow::bail!("No password for {}. Use --password or set MWB_PASSWORD", username)
        }
        None => prompt_password(&format!("Password for {}", username))?,
    };

    client
        .login(username, &password)
        .await
        .with_context(|| format!("Login as {} failed", username))?;
    tracing::debug!("Logged in as {}", username);
    Ok(client)
}

/// Maps an error to the process exit code.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    if err.chain().any(|cause| cause.is::<NotFound>()) {
        return exit_codes::NOT_FOUND;
    }
    match err.chain().find_map(|cause| cause.downcast_ref::<ApiError>()) {
        Some(e) if e.is_local() => exit_codes::USAGE,
        Some(ApiError::AuthenticationFailed { .. }) => exit_codes::AUTH_ERROR,
        Some(ApiError::Remote(_)) => exit_codes::REMOTE,
        _ => exit_codes::ERROR,
    }
}
