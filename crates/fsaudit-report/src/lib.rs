/// fsaudit Report — CLI argument handling and report rendering.
///
/// Owns everything presentation-side: argument parsing, root validation,
/// the text report, and the JSON/CSV output modes. The scan itself and
/// all analysis live in `fsaudit-core`; this crate only formats what the
/// core exposes as plain read-only data.
pub mod export;
pub mod report;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use fsaudit_core::analysis::DEFAULT_THRESHOLD_MB;
use fsaudit_core::classify::{InferSniffer, NoopSniffer};
use fsaudit_core::scanner::{scan_directory, ScanOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// fsaudit — analyze disk usage, file types, and permission risks.
#[derive(Debug, Parser)]
#[command(name = "fsaudit", version, about, long_about = None)]
pub struct Cli {
    /// Path to the directory to analyze
    pub directory: PathBuf,

    /// Size threshold in MB for large file detection
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_MB)]
    pub threshold: u64,

    /// Show files with unusual permissions after the main report
    #[arg(long)]
    pub show_permissions: bool,

    /// Only report files with unusual permissions
    #[arg(long)]
    pub permissions_only: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Follow symlinks during traversal
    #[arg(long)]
    pub follow_links: bool,

    /// Skip hidden files and directories
    #[arg(long)]
    pub skip_hidden: bool,

    /// Disable content sniffing for files without a recognised extension
    #[arg(long)]
    pub no_sniff: bool,

    /// Suppress the per-file table in text output
    #[arg(short, long)]
    pub quiet: bool,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
}

impl Cli {
    fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            follow_links: self.follow_links,
            include_hidden: !self.skip_hidden,
            sniffer: if self.no_sniff {
                Arc::new(NoopSniffer)
            } else {
                Arc::new(InferSniffer)
            },
        }
    }
}

/// Parse arguments, run the scan, render the report to stdout.
pub fn run() -> anyhow::Result<()> {
    run_with(Cli::parse(), &mut io::stdout().lock())
}

/// Scan and render with pre-parsed arguments — separated so tests can
/// capture the output.
pub fn run_with(cli: Cli, out: &mut impl Write) -> anyhow::Result<()> {
    // A non-directory root is fatal before the core runs.
    anyhow::ensure!(
        cli.directory.is_dir(),
        "'{}' is not a valid directory",
        cli.directory.display()
    );

    if cli.format == OutputFormat::Table {
        writeln!(out, "Analyzing directory: {}", cli.directory.display())?;
    }

    info!("Scanning {}", cli.directory.display());
    let records = scan_directory(cli.directory.clone(), cli.scan_options())
        .context("scan did not complete")?;

    match cli.format {
        OutputFormat::Table => {
            let opts = report::ReportOptions {
                threshold_mb: cli.threshold,
                show_permissions: cli.show_permissions,
                permissions_only: cli.permissions_only,
                quiet: cli.quiet,
            };
            report::write_text_report(out, &records, &opts)?;
        }
        OutputFormat::Json => export::write_json(out, &records, cli.threshold)?,
        OutputFormat::Csv => export::write_csv(out, &records)?,
    }

    Ok(())
}
