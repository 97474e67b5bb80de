//! Release Radar - annual release calendar intake
//!
//! Accepts one Excel workbook, previews its first sheet, and uploads the
//! original file to the ingestion service, which stores the calendar and
//! emails reminders ahead of every listed date.
//!
//! # Features
//!
//! - Drag-and-drop and file-picker intake with a single type gate (.xlsx, .xls)
//! - First-sheet decoding into a header + body preview
//! - Last-select-wins: a slow decode never overwrites a newer selection
//! - One-shot multipart upload with distinct rejected / unreachable outcomes
//!
//! # Example
//!
//! ```no_run
//! use release_radar::input::{CandidateFile, InputChannel};
//! use release_radar::session::ImportSession;
//! use release_radar::transfer::{TransferClient, TransferConfig};
//!
//! # async fn run() -> release_radar::RadarResult<()> {
//! let client = TransferClient::new(&TransferConfig::default())?;
//! let mut session = ImportSession::new(client);
//!
//! let candidate = CandidateFile::from_path("calendar-2025.xlsx")?;
//! session.offer(InputChannel::Picker, vec![candidate])?;
//! session.settle().await;
//!
//! if let Some(table) = session.preview() {
//!     println!("{}", table);
//! }
//!
//! let outcome = session.submit().await?;
//! println!("{}", outcome.notice());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod decoder;
pub mod error;
pub mod input;
pub mod preview;
pub mod selection;
pub mod session;
pub mod transfer;
pub mod types;

/// Days before each listed date that the ingestion service sends reminders
pub const REMINDER_LEAD_DAYS: u32 = 5;

// Re-export commonly used types
pub use error::{RadarError, RadarResult};
pub use types::{CellValue, ChosenFile, DecodedGrid};
