use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;

use crate::app::settings::{load_settings, load_settings_from};
use crate::app::FileDataProvider;
use crate::fs_op::error::ErrorKind;
use crate::runner::logging::init_logging;

/// List a directory, descending into archives, addressed by path segments.
#[derive(Parser, Debug)]
#[command(name = "fileTree", version, about)]
pub struct Cli {
    /// Directory to resolve segments against (overrides `base_dir`).
    #[arg(long, value_name = "DIR")]
    pub base: Option<PathBuf>,

    /// Settings file to use instead of the per-user one.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Indent the JSON output.
    #[arg(long)]
    pub pretty: bool,

    /// Path segments, one hop per argument. None lists the base directory.
    #[arg(value_name = "SEGMENT")]
    pub segments: Vec<String>,
}

/// Process exit status reported for each failure kind.
pub fn exit_code(kind: ErrorKind) -> u8 {
    match kind {
        ErrorKind::Io => 1,
        ErrorKind::NotFound => 2,
        ErrorKind::InvalidPath => 3,
        ErrorKind::NotExpandable => 4,
        ErrorKind::UnsupportedContainer => 5,
    }
}

/// Resolve `cli.segments` and print the listing as JSON on stdout.
///
/// Listing failures are reported on stderr and turned into an exit status;
/// only setup problems (bad settings, closed stdout) are returned as errors.
pub fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let mut settings = match &cli.config {
        Some(path) => load_settings_from(path)?,
        None => load_settings()?,
    };
    init_logging(&settings.log_filter);

    if let Some(base) = cli.base {
        settings.base_dir = base;
    }
    let provider = FileDataProvider::from_settings(&settings);

    match provider.list(cli.segments.as_slice()) {
        Ok(listing) => {
            let json = if cli.pretty {
                serde_json::to_string_pretty(&listing)
            } else {
                serde_json::to_string(&listing)
            }
            .context("serializing listing")?;
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", json).context("writing listing")?;
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::debug!(error = ?e, "listing failed");
            eprintln!("{}", e);
            Ok(ExitCode::from(exit_code(e.kind())))
        }
    }
}
