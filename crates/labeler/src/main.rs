//! CLI for the pull request labeler
//!
//! Run `labeler --help` for usage information.

// CLI binaries legitimately need println! for user output
#![allow(clippy::disallowed_macros)]

use anyhow::{Context, Result};
use clap::Parser;
use labeler::{Labeler, RunArgs, RunReport};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "labeler")]
#[command(about = "Label pull requests from the paths they change")]
#[command(version)]
struct Cli {
    /// Output format: json, text
    #[arg(short, long, default_value = "text")]
    format: OutputFormat,

    /// Log format: text, json
    #[arg(long, default_value = "text")]
    log_format: OutputFormat,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(flatten)]
    run: RunArgs,
}

#[derive(Clone, Copy, Default, clap::ValueEnum)]
enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    match cli.log_format {
        OutputFormat::Text => tracing_subscriber::registry()
            .with(fmt::layer().with_target(false))
            .with(filter)
            .init(),
        OutputFormat::Json => tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(filter)
            .init(),
    }

    let config = cli.run.resolve().context("Invalid labeler settings")?;
    let pr_number = config.pr_number;

    let report = Labeler::new(config)?
        .run()
        .await
        .with_context(|| format!("Failed to label PR #{pr_number}"))?;

    print_report(&report, cli.format)
}

fn print_report(report: &RunReport, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(report)?);
        }
        OutputFormat::Text => {
            let prefix = if report.dry_run { "[dry run] " } else { "" };
            println!(
                "{prefix}PR #{}: {} changed files, labels to add: [{}], labels to remove: [{}]",
                report.pr_number,
                report.changed_files,
                report.to_add.join(", "),
                report.to_remove.join(", ")
            );
            if !report.to_remove.is_empty() && report.removed.is_empty() && !report.dry_run {
                println!("   (sync-labels is off, stale labels were kept)");
            }
        }
    }

    Ok(())
}
