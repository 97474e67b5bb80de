//! Ingestion endpoint client.
//!
//! Async reqwest client. Sends the chosen file exactly as it was picked, as
//! the `file` field of a multipart form.

use reqwest::header::COOKIE;
use reqwest::multipart::{Form, Part};
use tracing::{debug, info, warn};

use super::config::{SessionCredentials, TransferConfig};
use super::outcome::TransferOutcome;
use crate::error::{RadarError, RadarResult};
use crate::types::ChosenFile;

/// Multipart field the ingestion service reads the workbook from
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone)]
pub struct TransferClient {
    http: reqwest::Client,
    endpoint: String,
}

impl TransferClient {
    pub fn new(config: &TransferConfig) -> RadarResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("release-radar/{}", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(|e| RadarError::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            endpoint: config.endpoint_url(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Upload the file once and classify the response
    pub async fn upload(
        &self,
        file: &ChosenFile,
        credentials: Option<&SessionCredentials>,
    ) -> TransferOutcome {
        let form = Form::new().part(FILE_FIELD, file_part(file));
        let mut request = self.http.post(&self.endpoint).multipart(form);
        if let Some(creds) = credentials.filter(|c| !c.is_empty()) {
            request = request.header(COOKIE, creds.cookie_header());
        }

        debug!(endpoint = %self.endpoint, name = file.name(), bytes = file.len(), "uploading");

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!(endpoint = %self.endpoint, error = %e, "upload did not reach the server");
                return TransferOutcome::NetworkFailure {
                    reason: describe_transport_error(&e),
                };
            }
        };

        let status = response.status();
        if status.is_success() {
            info!(status = status.as_u16(), name = file.name(), "upload accepted");
            return TransferOutcome::Succeeded {
                status: status.as_u16(),
            };
        }

        // The body may explain the rejection; losing it is not fatal
        let detail = response
            .text()
            .await
            .ok()
            .map(|body| body.trim().to_string())
            .filter(|body| !body.is_empty());
        warn!(status = status.as_u16(), detail = ?detail, "upload rejected");

        TransferOutcome::Rejected {
            status: status.as_u16(),
            detail,
        }
    }
}

/// The file part: original bytes, name and declared type
fn file_part(file: &ChosenFile) -> Part {
    let part = || Part::bytes(file.bytes().to_vec()).file_name(file.name().to_string());
    match part().mime_str(file.mime()) {
        Ok(part) => part,
        Err(_) => part(),
    }
}

fn describe_transport_error(e: &reqwest::Error) -> String {
    if e.is_timeout() {
        format!("timed out: {}", e)
    } else if e.is_connect() {
        format!("could not connect: {}", e)
    } else {
        e.to_string()
    }
}
