use std::time::Duration;

use log::warn;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use crate::types::{Coordinate, Vin};

const UPDATE_PATH: &str = "phone_update_inventory.php";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const MAX_ATTEMPTS: u32 = 3;
const RETRY_BASE_DELAY_MS: u64 = 100;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no location fix available")]
    LocationUnavailable,
    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),
    #[error("server rejected request with HTTP {0}")]
    ServerRejected(u16),
    #[error("empty or unparseable response body")]
    EmptyBody,
    #[error("inventory update rejected: {0}")]
    Rejected(String),
    #[error("invalid inventory endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
}

impl ReportError {
    /// Transient failures are worth another attempt. Application-level
    /// rejections and client errors are not; the request itself was bad.
    fn is_transient(&self) -> bool {
        match self {
            ReportError::Network(_) => true,
            ReportError::ServerRejected(code) => *code == 429 || (500..=599).contains(code),
            _ => false,
        }
    }
}

#[derive(Debug, Serialize)]
struct UpdateRequest<'a> {
    vin: &'a str,
    coordinates: String,
}

#[derive(Debug, Deserialize)]
struct UpdateResponse {
    status: String,
    #[serde(default)]
    message: String,
}

/// Client for the remote inventory service. Cheap to clone; overlapping
/// submissions share the underlying connection pool.
#[derive(Clone)]
pub struct InventoryClient {
    client: reqwest::Client,
    update_url: Url,
}

impl InventoryClient {
    /// The trailing slash on `base_url` is significant: the update path is
    /// joined onto it, replacing any final non-directory segment.
    pub fn new(base_url: &str) -> Result<Self, ReportError> {
        let update_url = Url::parse(base_url)?.join(UPDATE_PATH)?;
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(InventoryClient { client, update_url })
    }

    /// Issues exactly one update POST and classifies the outcome. A 2xx
    /// status only means the transport worked; the body's `status` field
    /// decides application success.
    pub async fn submit(&self, vin: &Vin, location: Coordinate) -> Result<String, ReportError> {
        let request = UpdateRequest {
            vin: vin.as_str(),
            coordinates: location.to_string(),
        };
        let response = self
            .client
            .post(self.update_url.clone())
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ReportError::ServerRejected(status.as_u16()));
        }
        let body = response.text().await?;
        let parsed: UpdateResponse =
            serde_json::from_str(&body).map_err(|_| ReportError::EmptyBody)?;
        if parsed.status == "success" {
            Ok(parsed.message)
        } else {
            Err(ReportError::Rejected(parsed.message))
        }
    }

    /// `submit` under a bounded backoff policy: transient failures are
    /// retried with a doubling delay, everything else is terminal.
    pub async fn submit_with_retry(
        &self,
        vin: &Vin,
        location: Coordinate,
    ) -> Result<String, ReportError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.submit(vin, location).await {
                Ok(message) => return Ok(message),
                Err(e) if e.is_transient() && attempt < MAX_ATTEMPTS => {
                    let delay = Duration::from_millis(RETRY_BASE_DELAY_MS * 2u64.pow(attempt));
                    warn!(
                        "Update attempt {} for {} failed ({}); retrying in {:?}",
                        attempt, vin, e, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
