//
//  mediawiki-butt
//  cli/list.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! List commands.
//!
//! Each subcommand maps to one `list=` module:
//! - categories, images, pages, users, blocks, tags
//! - transcluders of a template
//! - deleted files and create-protected titles (need extra rights)
//! - random pages

use std::collections::BTreeMap;
use std::fmt::Display;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{connect, GlobalOptions, Login};
use crate::api::query::DEFAULT_LIMIT;
use crate::config::Config;
use crate::constants::parse_namespace;
use crate::output::{TableBuilder, TableOutput};

#[derive(Args, Debug)]
pub struct ListCommand {
    #[command(subcommand)]
    pub command: ListSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ListSubcommand {
    /// All categories
    Categories(LimitArgs),

    /// All files
    Images(LimitArgs),

    /// All pages in a namespace
    Pages(PagesArgs),

    /// All users, or the members of a group
    Users(UsersArgs),

    /// Ids of active blocks
    Blocks(LimitArgs),

    /// Pages that transclude a page
    Transcluders(TranscludersArgs),

    /// Deleted files (needs the deletedhistory right)
    DeletedFiles(LimitArgs),

    /// Titles protected from creation
    ProtectedTitles(ProtectedTitlesArgs),

    /// Random pages
    Random(RandomArgs),

    /// Change tags
    Tags(LimitArgs),
}

#[derive(Args, Debug)]
pub struct LimitArgs {
    /// Maximum number of results (capped at 500, or 5000 for bots)
    #[arg(long, short = 'L', default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,
}

#[derive(Args, Debug)]
pub struct PagesArgs {
    /// Namespace id or name
    #[arg(long, short = 'n', default_value = "0", value_parser = namespace_arg)]
    pub namespace: i32,

    #[command(flatten)]
    pub limit: LimitArgs,
}

#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Only list members of this group
    #[arg(long, short = 'g')]
    pub group: Option<String>,

    #[command(flatten)]
    pub limit: LimitArgs,
}

#[derive(Args, Debug)]
pub struct TranscludersArgs {
    /// The transcluded page, usually a template
    pub page: String,

    #[command(flatten)]
    pub limit: LimitArgs,
}

#[derive(Args, Debug)]
pub struct ProtectedTitlesArgs {
    /// Only titles protected at this level (e.g. sysop)
    #[arg(long)]
    pub level: Option<String>,

    #[command(flatten)]
    pub limit: LimitArgs,
}

#[derive(Args, Debug)]
pub struct RandomArgs {
    /// Number of pages (capped at 10, or 20 for bots)
    #[arg(long, short = 'c', default_value_t = 1, allow_negative_numbers = true)]
    pub count: i64,

    /// Namespace id or name
    #[arg(long, short = 'n', default_value = "0", value_parser = namespace_arg)]
    pub namespace: i32,
}

fn namespace_arg(value: &str) -> Result<i32, String> {
    parse_namespace(value).ok_or_else(|| format!("unknown namespace '{}'", value))
}

/// A single-column result. Serializes as a bare JSON array.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub(crate) struct Column<T> {
    #[serde(skip)]
    pub header: &'static str,
    pub items: Vec<T>,
}

impl<T> Column<T> {
    pub fn new(header: &'static str, items: Vec<T>) -> Self {
        Self { header, items }
    }
}

impl<T: Display> TableOutput for Column<T> {
    fn print_table(&self, color: bool) {
        if self.items.is_empty() {
            println!("No results");
            return;
        }
        TableBuilder::new()
            .color(color)
            .headers([self.header])
            .rows(self.items.iter().map(|item| [item.to_string()]))
            .print();
    }
}

/// Users with their ids.
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
struct UserTable(BTreeMap<String, u64>);

impl TableOutput for UserTable {
    fn print_table(&self, color: bool) {
        if self.0.is_empty() {
            println!("No users");
            return;
        }
        TableBuilder::new()
            .color(color)
            .headers(["Name", "User ID"])
            .rows(self.0.iter().map(|(name, id)| [name.clone(), id.to_string()]))
            .print();
    }
}

impl ListCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = connect(global, &config, Login::IfConfigured).await?;
        let output = global.output(&config);

        match &self.command {
            ListSubcommand::Categories(args) => {
                let items = client
                    .all_categories(args.limit)
                    .await
                    .context("Failed to list categories")?;
                output.write(&Column::new("Category", items))
            }
            ListSubcommand::Images(args) => {
                let items = client
                    .all_images(args.limit)
                    .await
                    .context("Failed to list files")?;
                output.write(&Column::new("File", items))
            }
            ListSubcommand::Pages(args) => {
                let items = client
                    .all_pages_in_namespace(args.namespace, args.limit.limit)
                    .await
                    .context("Failed to list pages")?;
                output.write(&Column::new("Title", items))
            }
            ListSubcommand::Users(args) => {
                let users = client
                    .all_users(args.group.as_deref(), args.limit.limit)
                    .await
                    .context("Failed to list users")?;
                output.write(&UserTable(users))
            }
            ListSubcommand::Blocks(args) => {
                let ids = client
                    .all_blocks(args.limit)
                    .await
                    .context("Failed to list blocks")?;
                output.write(&Column::new("Block ID", ids))
            }
            ListSubcommand::Transcluders(args) => {
                let items = client
                    .all_transcluders(&args.page, args.limit.limit)
                    .await
                    .with_context(|| format!("Failed to list transclusions of {}", args.page))?;
                output.write(&Column::new("Title", items))
            }
            ListSubcommand::DeletedFiles(args) => {
                let items = client
                    .all_deleted_files(args.limit)
                    .await
                    .context("Failed to list deleted files")?;
                output.write(&Column::new("File", items))
            }
            ListSubcommand::ProtectedTitles(args) => {
                let items = client
                    .all_protected_titles(args.level.as_deref(), args.limit.limit)
                    .await
                    .context("Failed to list protected titles")?;
                output.write(&Column::new("Title", items))
            }
            ListSubcommand::Random(args) => {
                let items = client
                    .random_pages(args.count, args.namespace)
                    .await
                    .context("Failed to fetch random pages")?;
                output.write(&Column::new("Title", items))
            }
            ListSubcommand::Tags(args) => {
                let items = client
                    .tags(args.limit)
                    .await
                    .context("Failed to list tags")?;
                output.write(&Column::new("Tag", items))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_serializes_as_array() {
        let column = Column::new("Title", vec!["A".to_string(), "B".to_string()]);
        assert_eq!(serde_json::to_string(&column).unwrap(), r#"["A","B"]"#);
    }

    #[test]
    fn test_namespace_arg() {
        assert_eq!(namespace_arg("Template"), Ok(10));
        assert_eq!(namespace_arg("4"), Ok(4));
        assert!(namespace_arg("Nowhere").is_err());
    }
}
