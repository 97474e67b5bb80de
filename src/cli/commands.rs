use crate::decoder::{Decode, SpreadsheetDecoder};
use crate::error::RadarResult;
use crate::input::{CandidateFile, DropInputAdapter, InputChannel};
use crate::preview::{self, PreviewTable};
use crate::session::ImportSession;
use crate::transfer::{SessionCredentials, TransferClient, TransferConfig, TransferOutcome};
use colored::Colorize;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber; `RUST_LOG` wins over `verbose`
pub fn init_logging(verbose: bool) {
    let default = if verbose {
        "release_radar=debug"
    } else {
        "release_radar=warn"
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .try_init();
}

/// Execute the preview command
pub fn preview(file: PathBuf, rows: usize, json: bool) -> RadarResult<()> {
    let candidate = CandidateFile::from_path(&file)?;
    let chosen = DropInputAdapter::new().accept(InputChannel::Picker, vec![candidate])?;
    let grid = SpreadsheetDecoder::new().decode(chosen.file.bytes())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    println!("{}", "📅 Release Radar - Preview".bold().green());
    println!("   File: {}", file.display());
    println!(
        "   Size: {} rows, {} columns\n",
        grid.row_count(),
        grid.column_count()
    );

    print_table(preview::render(&grid), rows);
    Ok(())
}

/// Options for the upload command
#[derive(Debug, Clone)]
pub struct UploadOptions {
    pub file: PathBuf,
    pub endpoint: String,
    pub cookies: Vec<String>,
    pub timeout: Duration,
    pub show_preview: bool,
    pub rows: usize,
}

/// Execute the upload command
pub async fn upload(options: UploadOptions) -> RadarResult<()> {
    let config = TransferConfig {
        timeout: options.timeout,
        ..TransferConfig::with_base_url(options.endpoint.clone())
    };
    let client = TransferClient::new(&config)?;

    let mut session = ImportSession::new(client);
    let credentials = SessionCredentials::from_cookie_args(&options.cookies)?;
    if !credentials.is_empty() {
        session = session.with_credentials(credentials);
    }

    println!("{}", "📅 Release Radar - Upload".bold().green());
    println!("   File:     {}", options.file.display());
    println!("   Endpoint: {}", config.endpoint_url());

    let candidate = CandidateFile::from_path(&options.file)?;
    session.offer(InputChannel::Picker, vec![candidate])?;
    println!("   Selected: {}\n", session.file_label().bright_blue());

    if options.show_preview {
        session.settle().await;
        match session.decode_error() {
            Some(e) => println!(
                "{}",
                format!("⚠️  Preview unavailable ({}), uploading anyway", e).yellow()
            ),
            None => print_table(session.preview(), options.rows),
        }
    }

    let outcome = session.submit().await?;
    print_outcome(&outcome);
    outcome.into_result().map(|_| ())
}

fn print_table(table: Option<PreviewTable>, rows: usize) {
    match table {
        Some(table) => println!("{}", table.truncated(rows)),
        None => println!("{}", "(spreadsheet is empty, nothing to preview)".dimmed()),
    }
}

fn print_outcome(outcome: &TransferOutcome) {
    match outcome {
        TransferOutcome::Succeeded { status } => {
            println!("{} (HTTP {})", outcome.notice().bold().green(), status);
        }
        TransferOutcome::Rejected { status, detail } => {
            println!("{} (HTTP {})", outcome.notice().bold().red(), status);
            if let Some(detail) = detail {
                println!("   {}", detail);
            }
        }
        TransferOutcome::NetworkFailure { reason } => {
            println!("{}", outcome.notice().bold().red());
            println!("   {}", reason);
        }
    }
}
