//
//  mediawiki-butt
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Settings for the `mwb` command line tool, stored as TOML.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/mwb/config.toml`
//! - **macOS**: `~/Library/Application Support/mwb/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\mwb\config\config.toml`
//!
//! The `MWB_CONFIG` environment variable overrides the location.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [wiki]
//! url = "https://en.wikipedia.org/w"
//! username = "ExampleBot@maintenance"
//! user_agent = "ExampleBot/1.0 (ops@example.org)"
//!
//! [output]
//! format = "table"
//! ```
//!
//! Passwords are never stored; pass `--password`, set `MWB_PASSWORD`, or let
//! `mwb` prompt for it.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use mediawiki_butt::config::Config;
//!
//! let mut config = Config::load()?;
//! config.set("wiki.url", "https://wiki.example.org/w".to_string())?;
//! config.save()?;
//!
//! assert_eq!(config.get("wiki.url").as_deref(), Some("https://wiki.example.org/w"));
//! # Ok::<(), anyhow::Error>(())
//! ```

mod file;

pub use file::*;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding the configuration file path.
pub const CONFIG_ENV: &str = "MWB_CONFIG";

/// Keys accepted by [`Config::get`] and [`Config::set`].
pub const KEYS: &[&str] = &["wiki.url", "wiki.username", "wiki.user_agent", "output.format"];

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub wiki: WikiConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

/// Which wiki to talk to and how to identify.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WikiConfig {
    /// Script path or `api.php` URL.
    #[serde(default)]
    pub url: Option<String>,

    /// Default login name; a bot password name like `User@Bot` works too.
    #[serde(default)]
    pub username: Option<String>,

    /// Replaces the generated `User-Agent` header.
    #[serde(default)]
    pub user_agent: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// `table` or `json`.
    #[serde(default = "default_format")]
    pub format: String,
}

fn default_format() -> String {
    "table".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
        }
    }
}

impl Config {
    /// Loads from the default location, or returns defaults if there is no file.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads from `path`, or returns defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }
        let content = read_config_file(path)?;
        toml::from_str(&content).with_context(|| format!("Invalid config file {}", path.display()))
    }

    /// Saves to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;
        write_config_file(path, &content)
    }

    /// The configuration file path, honoring `MWB_CONFIG`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
            return Ok(PathBuf::from(path));
        }
        let dirs = ProjectDirs::from("", "", crate::APP_NAME)
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Reads a dotted key such as `wiki.url`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "wiki.url" => self.wiki.url.clone(),
            "wiki.username" => self.wiki.username.clone(),
            "wiki.user_agent" => self.wiki.user_agent.clone(),
            "output.format" => Some(self.output.format.clone()),
            _ => None,
        }
    }

    /// Sets a dotted key. An empty value clears optional keys.
    pub fn set(&mut self, key: &str, value: String) -> Result<()> {
        let optional = |value: String| (!value.trim().is_empty()).then_some(value);
        match key {
            "wiki.url" => self.wiki.url = optional(value),
            "wiki.username" => self.wiki.username = optional(value),
            "wiki.user_agent" => self.wiki.user_agent = optional(value),
            "output.format" => match value.as_str() {
                "table" | "json" => self.output.format = value,
                other => bail!("Unknown output format '{}' (expected table or json)", other),
            },
            other => bail!("Unknown config key '{}'. Valid keys: {}", other, KEYS.join(", ")),
        }
        Ok(())
    }
}
