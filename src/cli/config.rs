//
//  mediawiki-butt
//  cli/config.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! CLI configuration commands
//!
//! Get, set and list values in the configuration file, or print its path.

use anyhow::Result;
use clap::{Args, Subcommand};
use console::style;

use crate::config::{Config, KEYS};

use super::GlobalOptions;

#[derive(Args, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigSubcommand {
    /// Print a value
    Get(GetArgs),

    /// Set a value (an empty value clears it)
    Set(SetArgs),

    /// Print every value
    #[command(visible_alias = "ls")]
    List,

    /// Print the configuration file path
    Path,
}

#[derive(Args, Debug)]
pub struct GetArgs {
    /// One of wiki.url, wiki.username, wiki.user_agent, output.format
    pub key: String,
}

#[derive(Args, Debug)]
pub struct SetArgs {
    pub key: String,

    pub value: String,
}

impl ConfigCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        match &self.command {
            ConfigSubcommand::Get(args) => self.get(args, global),
            ConfigSubcommand::Set(args) => self.set(args, global),
            ConfigSubcommand::List => self.list(global),
            ConfigSubcommand::Path => self.path(global),
        }
    }

    fn get(&self, args: &GetArgs, global: &GlobalOptions) -> Result<()> {
        if !KEYS.contains(&args.key.as_str()) {
            anyhow::bail!("Unknown config key '{}'. Valid keys: {}", args.key, KEYS.join(", "));
        }
        let config = Config::load()?;
        let value = config.get(&args.key);

        if global.json {
            let result = serde_json::json!({
                "key": args.key,
                "value": value,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else if let Some(v) = value {
            println!("{}", v);
        }
        Ok(())
    }

    fn set(&self, args: &SetArgs, global: &GlobalOptions) -> Result<()> {
        let mut config = Config::load()?;
        config.set(&args.key, args.value.clone())?;
        config.save()?;

        if !global.json {
            println!("{} Set {} = {}", style("✓").green(), args.key, args.value);
        }
        Ok(())
    }

    fn list(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;

        if global.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
            return Ok(());
        }
        for key in KEYS {
            let value = config.get(key).unwrap_or_default();
            println!("{} = {}", style(key).cyan(), value);
        }
        Ok(())
    }

    fn path(&self, global: &GlobalOptions) -> Result<()> {
        let path = Config::config_path()?;
        if global.json {
            let result = serde_json::json!({ "path": path });
            println!("{}", serde_json::to_string_pretty(&result)?);
        } else {
            println!("{}", path.display());
        }
        Ok(())
    }
}
