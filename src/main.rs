//
//  mediawiki-butt
//  main.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/17.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use mediawiki_butt::cli::{exit_code, Cli, Commands};
use mediawiki_butt::exit_codes;

#[tokio::main]
async fn main() {
    // Initialize logging
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Execute command
    let result = run(cli).await;

    // Handle result and exit
    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(exit_code(&e));
        }
    }
}

/// Initialize logging based on environment
fn init_logging() {
    let filter = EnvFilter::try_from_env("MWB_DEBUG")
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

/// Main command dispatcher
async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::List(cmd) => cmd.run(&cli.global).await,
        Commands::Log(cmd) => cmd.run(&cli.global).await,
        Commands::Contributors(cmd) => cmd.run(&cli.global).await,
        Commands::Groups(cmd) => cmd.run(&cli.global).await,
        Commands::Block(cmd) => cmd.run(&cli.global).await,
        Commands::Unblock(cmd) => cmd.run(&cli.global).await,
        Commands::Edit(cmd) => cmd.run(&cli.global).await,
        Commands::Whoami(cmd) => cmd.run(&cli.global).await,
        Commands::Config(cmd) => cmd.run(&cli.global).await,
        Commands::Completion(cmd) => cmd.run(&cli.global).await,
        Commands::Version => {
            println!("{} version {}", mediawiki_butt::APP_NAME, mediawiki_butt::VERSION);
            Ok(())
        }
    }
}
