//! HTTP client for the billing collaborator's create-provider operation.

use std::time::Duration;

use async_trait::async_trait;
use mockall::automock;
use reqwest::{Client, Response, header::RETRY_AFTER};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::{
    billing::{
        errors::{AttemptFailure, BillingServiceError},
        retry::RetryPolicy,
    },
    domain::candidates::records::ProviderId,
};

/// Longest error body kept on a failure, in characters.
const MAX_ERROR_BODY_CHARS: usize = 512;

/// Settings for [`HttpBillingClient`].
#[derive(Debug, Clone)]
pub struct BillingClientConfig {
    /// Billing service base URL, e.g. `"http://billing:8080"`.
    pub base_url: String,

    /// Budget for one attempt, from connect to the last body byte.
    pub timeout: Duration,

    /// Budget for establishing the connection.
    pub connect_timeout: Duration,

    /// Backoff between attempts
    pub retry: RetryPolicy,
}

/// reqwest-backed billing client with classified retries.
#[derive(Debug, Clone)]
pub struct HttpBillingClient {
    http: Client,
    endpoint: String,
    retry: RetryPolicy,
}

impl HttpBillingClient {
    /// Build a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying HTTP client cannot be constructed.
    pub fn new(config: &BillingClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            http,
            endpoint: format!("{}/provider", config.base_url.trim_end_matches('/')),
            retry: config.retry,
        })
    }

    async fn attempt(&self, name: &str) -> Result<ProviderId, AttemptFailure> {
        let response = self
            .http
            .post(&self.endpoint)
            .json(&CreateProviderRequest { name })
            .send()
            .await
            .map_err(|e| classify_transport_error(&e))?;

        let status = response.status();

        if status.is_success() {
            let body: CreateProviderResponse = response
                .json()
                .await
                .map_err(|e| classify_body_error(&e))?;

            return Ok(ProviderId::new(body.id));
        }

        let retry_after = parse_retry_after(&response);

        let body = response
            .text()
            .await
            .unwrap_or_default()
            .chars()
            .take(MAX_ERROR_BODY_CHARS)
            .collect();

        Err(AttemptFailure::Status {
            status: status.as_u16(),
            retry_after,
            body,
        })
    }
}

#[async_trait]
impl BillingClient for HttpBillingClient {
    #[tracing::instrument(name = "billing.client.create_provider", skip(self), err)]
    async fn create_provider(&self, name: &str) -> Result<ProviderId, BillingServiceError> {
        let mut attempt: u32 = 0;

        loop {
            attempt += 1;

            let failure = match self.attempt(name).await {
                Ok(provider_id) => {
                    if attempt > 1 {
                        info!(attempt, %provider_id, "created provider after retries");
                    }

                    return Ok(provider_id);
                }
                Err(failure) => failure,
            };

            match self.retry.next_delay(attempt, &failure) {
                Some(delay) => {
                    warn!(
                        attempt,
                        max_attempts = self.retry.max_attempts(),
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %failure,
                        "billing attempt failed, retrying"
                    );

                    tokio::time::sleep(delay).await;
                }
                None if failure.is_retryable() => {
                    error!(attempts = attempt, error = %failure, "billing retries exhausted");

                    return Err(BillingServiceError::Exhausted {
                        attempts: attempt,
                        failure,
                    });
                }
                None => {
                    return Err(BillingServiceError::Rejected {
                        attempts: attempt,
                        failure,
                    });
                }
            }
        }
    }
}

#[automock]
#[async_trait]
/// Creates providers in the billing collaborator.
pub trait BillingClient: Send + Sync {
    /// Creates one provider named `name`, retrying transient failures.
    async fn create_provider(&self, name: &str) -> Result<ProviderId, BillingServiceError>;
}

#[derive(Debug, Serialize)]
struct CreateProviderRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreateProviderResponse {
    #[serde(alias = "provider_id")]
    id: i64,
}

fn classify_transport_error(error: &reqwest::Error) -> AttemptFailure {
    if error.is_timeout() {
        AttemptFailure::Timeout
    } else if error.is_builder() {
        AttemptFailure::Request(error.to_string())
    } else {
        AttemptFailure::Connect(error.to_string())
    }
}

/// A 2xx body that stalls past the timeout is retried like any other timeout. One that
/// arrives but cannot be decoded is not.
fn classify_body_error(error: &reqwest::Error) -> AttemptFailure {
    if error.is_timeout() {
        AttemptFailure::Timeout
    } else {
        AttemptFailure::InvalidResponse(error.to_string())
    }
}

/// Integer seconds only; other forms are ignored.
fn parse_retry_after(response: &Response) -> Option<Duration> {
    response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map(Duration::from_secs)
}
