use serde::Serialize;

use crate::error::{RadarError, RadarResult};

/// Result of a single upload attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum TransferOutcome {
    /// Server answered 2xx
    Succeeded { status: u16 },
    /// Server answered with any other status
    Rejected {
        status: u16,
        #[serde(skip_serializing_if = "Option::is_none")]
        detail: Option<String>,
    },
    /// No HTTP status was received
    NetworkFailure { reason: String },
}

impl TransferOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransferOutcome::Succeeded { .. })
    }

    /// Operator-facing notice for this outcome
    pub fn notice(&self) -> &'static str {
        match self {
            TransferOutcome::Succeeded { .. } => "Upload successful!",
            TransferOutcome::Rejected { .. } => "An error occurred during upload.",
            TransferOutcome::NetworkFailure { .. } => "Server error.",
        }
    }

    /// Turn the failure variants into errors for `?` propagation
    pub fn into_result(self) -> RadarResult<u16> {
        match self {
            TransferOutcome::Succeeded { status } => Ok(status),
            TransferOutcome::Rejected { status, detail } => {
                Err(RadarError::TransferRejected { status, detail })
            }
            TransferOutcome::NetworkFailure { reason } => {
                Err(RadarError::TransferNetworkFailure(reason))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_result() {
        assert_eq!(
            TransferOutcome::Succeeded { status: 201 }.into_result().unwrap(),
            201
        );

        let err = TransferOutcome::Rejected {
            status: 500,
            detail: Some("duplicate calendar".to_string()),
        }
        .into_result()
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Upload rejected by server (HTTP 500): duplicate calendar"
        );

        let err = TransferOutcome::NetworkFailure {
            reason: "connection refused".to_string(),
        }
        .into_result()
        .unwrap_err();
        assert!(matches!(err, RadarError::TransferNetworkFailure(_)));
    }

    #[test]
    fn test_rejected_without_detail_message() {
        let err = TransferOutcome::Rejected {
            status: 404,
            detail: None,
        }
        .into_result()
        .unwrap_err();
        assert_eq!(err.to_string(), "Upload rejected by server (HTTP 404)");
    }

    #[test]
    fn test_notices_differ() {
        let ok = TransferOutcome::Succeeded { status: 200 };
        let rejected = TransferOutcome::Rejected {
            status: 400,
            detail: None,
        };
        let down = TransferOutcome::NetworkFailure {
            reason: "dns".to_string(),
        };
        assert!(ok.is_success());
        assert!(!rejected.is_success());
        assert_ne!(rejected.notice(), down.notice());
        assert_ne!(ok.notice(), rejected.notice());
    }

    #[test]
    fn test_serialize() {
        let json = serde_json::to_string(&TransferOutcome::Rejected {
            status: 500,
            detail: None,
        })
        .unwrap();
        assert_eq!(json, r#"{"outcome":"rejected","status":500}"#);
    }
}
