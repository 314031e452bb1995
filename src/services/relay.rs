use crate::domain::models::EncryptedPayload;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_RELAY_URL: &str = "https://api.ruleshare.dev/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PreviewMetadata {
    pub file_count: usize,
    pub total_size_bytes: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishRequest {
    #[serde(flatten)]
    pub payload: EncryptedPayload,
    pub source_dialect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_metadata: Option<PreviewMetadata>,
    pub expires_in_days: u32,
    pub max_uses: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublishReceipt {
    pub share_code: String,
    pub expires_at: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchedShare {
    #[serde(flatten)]
    pub payload: EncryptedPayload,
    pub source_dialect: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule_metadata: Option<PreviewMetadata>,
}

#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    /// Deliberately distinct from crypto failures: an expired or unknown
    /// code must never read as "wrong password".
    #[error("share code not found or expired: {0}")]
    NotFound(String),
    #[error("relay request failed: {0}")]
    Transport(String),
}

/// Contract with the external storage service. The relay alone guarantees
/// code uniqueness and enforces expiry and usage limits.
pub trait Relay {
    fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, RelayError>;
    fn fetch(&self, share_code: &str) -> Result<FetchedShare, RelayError>;
    /// Best-effort counter bump; callers treat failures as non-critical.
    fn increment_usage(&self, share_code: &str) -> Result<(), RelayError>;
}

pub struct HttpRelay {
    base_url: String,
}

impl HttpRelay {
    pub fn new(base_url: &str) -> Self {
        HttpRelay {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn client(&self) -> Result<reqwest::blocking::Client, RelayError> {
        reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| RelayError::Transport(e.to_string()))
    }
}

impl Relay for HttpRelay {
    fn publish(&self, request: &PublishRequest) -> Result<PublishReceipt, RelayError> {
        let resp = self
            .client()?
            .post(format!("{}/shares", self.base_url))
            .json(request)
            .send()
            .map_err(|e| RelayError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        resp.json().map_err(|e| RelayError::Transport(e.to_string()))
    }

    fn fetch(&self, share_code: &str) -> Result<FetchedShare, RelayError> {
        let resp = self
            .client()?
            .get(format!("{}/shares/{}", self.base_url, share_code))
            .send()
            .map_err(|e| RelayError::Transport(e.to_string()))?;

        match resp.status().as_u16() {
            404 | 410 => return Err(RelayError::NotFound(share_code.to_string())),
            _ => {}
        }
        let resp = resp
            .error_for_status()
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        resp.json().map_err(|e| RelayError::Transport(e.to_string()))
    }

    fn increment_usage(&self, share_code: &str) -> Result<(), RelayError> {
        self.client()?
            .post(format!("{}/shares/{}/access", self.base_url, share_code))
            .send()
            .map_err(|e| RelayError::Transport(e.to_string()))?
            .error_for_status()
            .map_err(|e| RelayError::Transport(e.to_string()))?;
        Ok(())
    }
}
