use thiserror::Error;

use crate::decoder::DecodeError;
use crate::input::InputRejected;

pub type RadarResult<T> = Result<T, RadarError>;

#[derive(Error, Debug)]
pub enum RadarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Input rejected: {0}")]
    InputRejected(#[from] InputRejected),

    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    #[error("No file selected")]
    NothingSelected,

    #[error("Upload rejected by server (HTTP {status}){}", detail_suffix(.detail))]
    TransferRejected { status: u16, detail: Option<String> },

    #[error("Upload failed, server unreachable: {0}")]
    TransferNetworkFailure(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(d) => format!(": {}", d),
        None => String::new(),
    }
}
