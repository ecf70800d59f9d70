//
//  mediawiki-butt
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! # Output Module
//!
//! Output formatting for the `mwb` binary:
//!
//! - **Table format**: human-readable tables for interactive terminal use
//! - **JSON format**: pretty-printed JSON for scripting and automation
//!
//! ## Core Components
//!
//! - [`OutputFormat`]: the available output formats
//! - [`OutputWriter`]: main entry point for writing formatted output
//! - [`TableOutput`]: trait for types that can render themselves as a table
//!
//! ## Example
//!
//! ```rust,ignore
//! use mediawiki_butt::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Json);
//! writer.write(&events)?;
//! writer.write_success("Blocked Eve (block id 31)");
//! ```

mod table;

pub use table::*;

use std::str::FromStr;

use serde::Serialize;

/// Output format for command results.
///
/// The default is [`OutputFormat::Table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("Unknown output format '{}'", other),
        }
    }
}

/// Writes command results in the selected [`OutputFormat`].
///
/// Status messages (`write_success`, `write_error`, ...) are styled with
/// `console` when the terminal supports colors.
pub struct OutputWriter {
    format: OutputFormat,
    color: bool,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            color: console::colors_enabled(),
        }
    }

    pub fn json() -> Self {
        Self::new(OutputFormat::Json)
    }

    pub fn table() -> Self {
        Self::new(OutputFormat::Table)
    }

    pub fn color_enabled(&self) -> bool {
        self.color
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Writes a value as pretty JSON or as its table rendering.
    pub fn write<T: Serialize + TableOutput>(&self, value: &T) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(value)?;
                println!("{}", json);
            }
            OutputFormat::Table => {
                value.print_table(self.color);
            }
        }
        Ok(())
    }

    pub fn write_error(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("error:").red().bold(), msg);
        } else {
            eprintln!("error: {}", msg);
        }
    }

    pub fn write_warning(&self, msg: &str) {
        use console::style;
        if self.color {
            eprintln!("{} {}", style("warning:").yellow().bold(), msg);
        } else {
            eprintln!("warning: {}", msg);
        }
    }

    pub fn write_info(&self, msg: &str) {
        println!("{}", msg);
    }

    /// Prints a success line. Suppressed in JSON mode so stdout stays parseable.
    pub fn write_success(&self, msg: &str) {
        use console::style;
        if self.format == OutputFormat::Json {
            return;
        }
        if self.color {
            println!("{} {}", style("✓").green().bold(), msg);
        } else {
            println!("✓ {}", msg);
        }
    }
}

/// Types that know how to print themselves for humans.
pub trait TableOutput {
    fn print_table(&self, color: bool);
}

pub fn print_header(text: &str) {
    use console::style;
    println!("{}", style(text).bold());
    println!("{}", "-".repeat(text.chars().count()));
}

pub fn print_field(key: &str, value: &str, color: bool) {
    use console::style;
    if color {
        println!("{}: {}", style(key).dim(), value);
    } else {
        println!("{}: {}", key, value);
    }
}
