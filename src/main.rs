// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//
//! Yardsweep CLI - sweep a directory yard for uncommitted changes

use anyhow::{Context, Result};
use clap::Parser;
use yardsweep::git::GitCli;
use yardsweep::render::{self, RenderConfig};
use yardsweep::scanner;

#[derive(Parser)]
#[command(name = "yardsweep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Directory to start scanning from (defaults to the current directory)
    path: Option<std::path::PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    no_color: bool,

    /// Output in JSON format
    #[arg(long)]
    json: bool,

    /// Frame width of the rendered report
    #[arg(long, default_value_t = 80)]
    width: usize,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = match cli.verbose {
        0 if cli.quiet => tracing::Level::ERROR,
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let start = match cli.path {
        Some(path) => path,
        None => std::env::current_dir().context("Failed to resolve the current directory")?,
    };
    let start = start
        .canonicalize()
        .with_context(|| format!("Failed to resolve start path {}", start.display()))?;

    let config = RenderConfig {
        width: cli.width,
        color: !cli.no_color,
    };

    if !cli.json {
        println!("{}", render::scanning_banner(&config));
    }

    let report = scanner::scan_path(&start, &GitCli);

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    if report.is_empty() {
        println!("{}", render::all_clean_banner(&config));
        return Ok(());
    }

    print!("{}", render::render_report(&report, &config));
    Ok(())
}
