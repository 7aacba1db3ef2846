//! Best-effort signed webhook delivery.
//!
//! Status reporting is telemetry, not a consistency-critical operation: the
//! notifier returns a [`DeliveryOutcome`] the caller may log, but never an
//! error it must handle. A broken endpoint cannot fail an otherwise
//! successful job.

pub mod signing;

use std::time::Duration;

use renova_core::WebhookPayload;
use secrecy::{ExposeSecret, SecretString};
use tracing::{info, warn};

/// Header carrying the lowercase hex HMAC-SHA256 of the body bytes.
pub const SIGNATURE_HEADER: &str = "x-webhook-signature";

const DELIVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// How a delivery attempt ended. Informational only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DeliveryOutcome {
    /// 2xx from the endpoint.
    Delivered { status: u16 },
    /// Endpoint answered with a non-2xx status.
    Rejected { status: u16 },
    /// Transport or serialization failure before a response arrived.
    Failed { reason: String },
}

pub struct WebhookNotifier {
    client: reqwest::Client,
    endpoint: String,
    secret: SecretString,
}

impl WebhookNotifier {
    pub fn new(endpoint: impl Into<String>, secret: SecretString) -> Self {
        let client = reqwest::Client::builder()
            .timeout(DELIVERY_TIMEOUT)
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            endpoint: endpoint.into(),
            secret,
        }
    }

    /// Serialize once, sign those exact bytes, POST them. All failures are
    /// logged and swallowed into the returned outcome.
    pub async fn notify(&self, payload: &WebhookPayload) -> DeliveryOutcome {
        let body = match serde_json::to_vec(payload) {
            Ok(body) => body,
            Err(e) => {
                warn!(error = %e, "webhook payload serialization failed");
                return DeliveryOutcome::Failed {
                    reason: format!("serialization: {e}"),
                };
            }
        };

        let signature = signing::sign(&body, self.secret.expose_secret().as_bytes());

        let response = self
            .client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .header(SIGNATURE_HEADER, signature)
            .body(body)
            .send()
            .await;

        match response {
            Ok(resp) => {
                let status = resp.status().as_u16();
                if resp.status().is_success() {
                    info!(status, job_status = payload.status.as_str(), "webhook delivered");
                    DeliveryOutcome::Delivered { status }
                } else {
                    warn!(status, job_status = payload.status.as_str(), "webhook rejected");
                    DeliveryOutcome::Rejected { status }
                }
            }
            Err(e) => {
                warn!(error = %e, job_status = payload.status.as_str(), "webhook delivery failed");
                DeliveryOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }
}
