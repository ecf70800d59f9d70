//
//  mediawiki-butt
//  cli/log.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Log commands

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Subcommand};
use serde::Serialize;

use super::{connect, GlobalOptions, Login};
use crate::api::query::{LogEvent, LogFilter, DEFAULT_LIMIT};
use crate::config::Config;
use crate::output::{truncate, TableBuilder, TableOutput};

#[derive(Args, Debug)]
pub struct LogCommand {
    #[command(subcommand)]
    pub command: LogSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LogSubcommand {
    /// Page deletions
    Delete(LogArgs),

    /// Page restorations
    Restore(LogArgs),
}

#[derive(Args, Debug)]
pub struct LogArgs {
    /// Only actions performed by this user
    #[arg(long)]
    pub user: Option<String>,

    /// Only actions on this page
    #[arg(long)]
    pub title: Option<String>,

    /// Newest timestamp to include (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = timestamp_arg)]
    pub start: Option<DateTime<Utc>>,

    /// Oldest timestamp to include (RFC 3339 or YYYY-MM-DD)
    #[arg(long, value_parser = timestamp_arg)]
    pub end: Option<DateTime<Utc>>,

    /// Maximum number of events
    #[arg(long, short = 'L', default_value_t = DEFAULT_LIMIT, allow_negative_numbers = true)]
    pub limit: i64,
}

impl LogArgs {
    fn filter(&self) -> LogFilter {
        LogFilter {
            user: self.user.clone(),
            title: self.title.clone(),
            start: self.start,
            end: self.end,
            limit: self.limit,
        }
    }
}

fn timestamp_arg(value: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(time) = DateTime::parse_from_rfc3339(value) {
        return Ok(time.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
        .ok_or_else(|| format!("invalid timestamp '{}'", value))
}

#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
struct LogTable(Vec<LogEvent>);

impl TableOutput for LogTable {
    fn print_table(&self, color: bool) {
        if self.0.is_empty() {
            println!("No log events");
            return;
        }
        TableBuilder::new()
            .color(color)
            .headers(["ID", "Timestamp", "User", "Title", "Comment"])
            .rows(self.0.iter().map(|event| {
                [
                    event.id.to_string(),
                    event.timestamp.format("%Y-%m-%d %H:%M").to_string(),
                    event.user.clone(),
                    event.title.clone(),
                    truncate(event.comment.as_deref().unwrap_or("-"), 60),
                ]
            }))
            .print();
    }
}

impl LogCommand {
    pub async fn run(&self, global: &GlobalOptions) -> Result<()> {
        let config = Config::load()?;
        let client = connect(global, &config, Login::IfConfigured).await?;
        let output = global.output(&config);

        let events = match &self.command {
            LogSubcommand::Delete(args) => client
                .delete_log(&args.filter())
                .await
                .context("Failed to read the deletion log")?,
            LogSubcommand::Restore(args) => client
                .restore_log(&args.filter())
                .await
                .context("Failed to read the restoration log")?,
        };

        output.write(&LogTable(events))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_timestamp_arg() {
        assert_eq!(
            timestamp_arg("2020-01-01").unwrap(),
            Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            timestamp_arg("2021-06-01T14:00:00+02:00").unwrap(),
            Utc.with_ymd_and_hms(2021, 6, 1, 12, 0, 0).unwrap()
        );
        assert!(timestamp_arg("last week").is_err());
    }
}
