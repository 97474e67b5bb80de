use clap::{Parser, Subcommand};
use release_radar::cli::{self, UploadOptions};
use release_radar::REMINDER_LEAD_DAYS;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(name = "release-radar")]
#[command(about = "Upload the annual release calendar and preview it before sending.")]
#[command(long_about = long_about())]
#[command(version)]
struct Cli {
    /// Show debug logs on stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Show the first sheet of a workbook.

The first row is shown as column headers and every following row as-is.
Nothing is validated: dates, names and empty cells are shown exactly as
stored in the workbook.

EXAMPLES:
  release-radar preview calendar-2025.xlsx
  release-radar preview calendar-2025.xlsx --rows 50
  release-radar preview calendar-2025.xlsx --json")]
    /// Show the first sheet of a workbook
    Preview {
        /// Path to the workbook (.xlsx or .xls)
        file: PathBuf,

        /// Maximum body rows to show
        #[arg(short, long, default_value = "20")]
        rows: usize,

        /// Print the decoded rows as a JSON array of arrays
        #[arg(long)]
        json: bool,
    },

    #[command(long_about = "Send a workbook to the ingestion service.

The file is uploaded exactly as it is on disk, as the 'file' field of a
multipart POST to <endpoint>/api/import/upload. A preview is printed first;
a workbook that cannot be previewed is still uploaded.

There is no automatic retry. Exit code is 0 only when the server accepts
the upload (HTTP 2xx).

EXAMPLES:
  release-radar upload calendar-2025.xlsx
  RELEASE_RADAR_ENDPOINT=http://radar.internal:8080 release-radar upload calendar-2025.xlsx
  release-radar upload calendar-2025.xlsx --cookie 'JSESSIONID=abc; XSRF-TOKEN=def'")]
    /// Upload a workbook to the ingestion service
    Upload {
        /// Path to the workbook (.xlsx or .xls)
        file: PathBuf,

        /// Ingestion service base URL
        #[arg(
            short,
            long,
            default_value = "http://localhost:8080",
            env = "RELEASE_RADAR_ENDPOINT"
        )]
        endpoint: String,

        /// Session cookie(s) as name=value; may be repeated
        #[arg(short, long, env = "RELEASE_RADAR_COOKIE")]
        cookie: Vec<String>,

        /// Request timeout in seconds
        #[arg(short, long, default_value = "60", env = "RELEASE_RADAR_TIMEOUT")]
        timeout: u64,

        /// Skip the preview and upload straight away
        #[arg(long)]
        no_preview: bool,

        /// Maximum body rows to show in the preview
        #[arg(short, long, default_value = "20")]
        rows: usize,
    },
}

/// Top-level help; the lead time is the one the ingestion service uses
fn long_about() -> String {
    format!(
        "Release Radar - annual release calendar intake

Upload the yearly release calendar as an Excel workbook. Once the ingestion
service stores it, the responsible teams are emailed a reminder {} days before
every date in the calendar.

COMMANDS:
  preview  - Show the first sheet of a workbook
  upload   - Preview, then send the original file to the ingestion service

ACCEPTED FILES:
  .xlsx (Excel workbook), .xls (Excel 97-2003 workbook)

EXAMPLES:
  release-radar preview calendar-2025.xlsx
  release-radar upload calendar-2025.xlsx --endpoint http://radar.internal:8080
  release-radar upload calendar-2025.xlsx --cookie JSESSIONID=abc123",
        REMINDER_LEAD_DAYS
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli::init_logging(cli.verbose);

    match cli.command {
        Commands::Preview { file, rows, json } => cli::preview(file, rows, json)?,

        Commands::Upload {
            file,
            endpoint,
            cookie,
            timeout,
            no_preview,
            rows,
        } => {
            cli::upload(UploadOptions {
                file,
                endpoint,
                cookies: cookie,
                timeout: Duration::from_secs(timeout),
                show_preview: !no_preview,
                rows,
            })
            .await?
        }
    }

    Ok(())
}
