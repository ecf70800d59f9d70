//
//  mediawiki-butt
//  cli/page.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Page commands

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use super::{connect, GlobalOptions, Login, NotFound};
use crate::api::query::DEFAULT_LIMIT;
use crate::config::Config;
use crate::output::{print_field, print_header, TableBuilder, TableOutput};

#[derive(Args, Debug)]
pub struct ContributorsCommand {
    /// Page title
    pub title: String,

    /// Only print the number of anonymous contributors
    #[arg(long, conflicts_with = "total")]
    pub anonymous: bool,

    /// Only print the total number of contributors
    #[arg(long)]
    pub total: bool,

    /// Maximum number of named contributors to fetch
    #[arg(long, short = 'L', default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,
}

#[derive(Debug, Clone, Serialize)]
struct ContributorsView {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    contributors: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    anonymous: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    total: Option<u64>,
}

impl TableOutput for ContributorsView {
    fn print_table(&self, color: bool) {
        if let Some(names) = &self.contributors {
            print_header(&self.title);
            if let Some(anonymous) = self.anonymous {
                print_field("Anonymous contributors", &anonymous.to_string(), color);
            }
            if let Some(total) = self.total {
                print_field("Total contributors", &total.to_string(), color);
            }
            if !names.is_empty() {
                println!();
                TableBuilder::new()
                    .color(color)
                    .headers(["Contributor"])
                    .rows(names.iter().map(|name| [name.clone()]))
                    .print();
            }
            return;
        }

        // Single-number modes print just the number, for shell use.
        if let Some(count) = self.total.or(self.anonymous) {
            println!("{}", count);
        }
    }
}

impl ContributorsCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = connect(global, &config, Login::IfConfigured).await?;
        let output = global.output(&config);
        let not_found = || NotFound(format!("Page '{}'", self.title));

        let view = if self.anonymous {
            let anonymous = client
                .anonymous_contributors_count(&self.title, self.limit)
                .await
                .context("Failed to read contributors")?
                .ok_or_else(not_found)?;
            ContributorsView {
                title: self.title.clone(),
                contributors: None,
                anonymous: Some(anonymous),
                total: None,
            }
        } else if self.total {
            let total = client
                .total_contributors(&self.title, self.limit)
                .await
                .context("Failed to read contributors")?
                .ok_or_else(not_found)?;
            ContributorsView {
                title: self.title.clone(),
                contributors: None,
                anonymous: None,
                total: Some(total),
            }
        } else {
            let found = client
                .contributors(&self.title, self.limit)
                .await
                .context("Failed to read contributors")?
                .ok_or_else(not_found)?;
            ContributorsView {
                title: self.title.clone(),
                anonymous: Some(found.anonymous),
                total: Some(found.total()),
                contributors: Some(found.names),
            }
        };

        output.write(&view)
    }
}
