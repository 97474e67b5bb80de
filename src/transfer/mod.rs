//! Upload of the chosen file to the ingestion service
//!
//! One multipart POST per call, no retries. The result is a
//! [`TransferOutcome`] that keeps server rejections apart from transport
//! failures so callers can word their notices differently.

pub mod client;
pub mod config;
pub mod outcome;

pub use client::TransferClient;
pub use config::{SessionCredentials, TransferConfig};
pub use outcome::TransferOutcome;
