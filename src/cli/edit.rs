//
//  mediawiki-butt
//  cli/edit.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Edit command

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::{connect, GlobalOptions, Login};
use crate::api::edit::{EditOutcome, EditRequest};
use crate::config::Config;
use crate::output::{print_field, TableOutput};

#[derive(Args, Debug)]
pub struct EditCommand {
    /// Page title
    pub title: String,

    /// New page text
    #[arg(long, short = 't', conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the new text from a file ("-" for stdin)
    #[arg(long, short = 'f')]
    pub file: Option<PathBuf>,

    /// Edit summary
    #[arg(long, short = 's')]
    pub summary: Option<String>,

    /// Mark as a minor edit
    #[arg(long)]
    pub minor: bool,

    /// Mark as a bot edit
    #[arg(long)]
    pub bot: bool,

    /// Fail if the page already exists
    #[arg(long, conflicts_with = "no_create")]
    pub create_only: bool,

    /// Fail if the page does not exist
    #[arg(long)]
    pub no_create: bool,
}

impl TableOutput for EditOutcome {
    fn print_table(&self, color: bool) {
        print_field("Page", &self.title, color);
        print_field("Page ID", &self.page_id.to_string(), color);
        match self.new_revid {
            Some(revid) => print_field("Revision", &revid.to_string(), color),
            None => print_field("Revision", "unchanged", color),
        }
    }
}

impl EditCommand {
    fn read_text(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }
        match &self.file {
            Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read {}", path.display())),
            _ => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .context("Failed to read page text from stdin")?;
                Ok(text)
            }
        }
    }

    fn request(&self, text: String) -> EditRequest {
        let request = EditRequest::new(self.title.clone(), text)
            .minor(self.minor)
            .bot(self.bot)
            .create_only(self.create_only)
            .no_create(self.no_create);
        match &self.summary {
            Some(summary) => request.summary(summary.clone()),
            None => request,
        }
    }

    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let output = global.output(&config);
        let text = self.read_text()?;

        let client = connect(global, &config, Login::IfConfigured).await?;
        let outcome = client
            .edit(&self.request(text))
            .await
            .with_context(|| format!("Failed to edit {}", self.title))?;

        if outcome.no_change {
            output.write_success(&format!("{} is unchanged", outcome.title));
        } else {
            output.write_success(&format!("Saved {}", outcome.title));
        }
        output.write(&outcome)
    }
}
