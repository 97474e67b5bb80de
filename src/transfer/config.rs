//! Ingestion endpoint settings and session credentials

use std::time::Duration;

use crate::error::{RadarError, RadarResult};

/// Where and how to upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferConfig {
    /// Scheme, host and port, e.g. `http://localhost:8080`
    pub base_url: String,
    pub upload_path: String,
    pub timeout: Duration,
}

impl Default for TransferConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            upload_path: "/api/import/upload".to_string(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl TransferConfig {
    /// Config for another host, keeping the standard upload path
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn endpoint_url(&self) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            self.upload_path.trim_start_matches('/')
        )
    }
}

/// Cookies of an existing session, forwarded with the upload
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCredentials {
    cookies: Vec<(String, String)>,
}

impl SessionCredentials {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.push((name.into(), value.into()));
        self
    }

    /// Parse `name=value` pairs separated by `;`, as in a `Cookie` header
    pub fn parse_cookie_header(header: &str) -> RadarResult<Self> {
        let mut credentials = Self::new();
        for pair in header.split(';').map(str::trim).filter(|p| !p.is_empty()) {
            let (name, value) = pair
                .split_once('=')
                .ok_or_else(|| RadarError::Config(format!("cookie '{}' is not name=value", pair)))?;
            let name = name.trim();
            if name.is_empty() {
                return Err(RadarError::Config(format!("cookie '{}' has no name", pair)));
            }
            credentials.cookies.push((name.to_string(), value.trim().to_string()));
        }
        Ok(credentials)
    }

    /// Merge several `Cookie`-style strings
    pub fn from_cookie_args<S: AsRef<str>>(args: &[S]) -> RadarResult<Self> {
        let mut credentials = Self::new();
        for arg in args {
            credentials
                .cookies
                .extend(Self::parse_cookie_header(arg.as_ref())?.cookies);
        }
        Ok(credentials)
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }

    /// Value for the `Cookie` request header
    pub fn cookie_header(&self) -> String {
        self.cookies
            .iter()
            .map(|(name, value)| format!("{}={}", name, value))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
