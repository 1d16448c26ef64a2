//! Billing collaborator client.

pub mod client;
pub mod errors;
pub mod retry;

pub use client::{BillingClient, BillingClientConfig, HttpBillingClient, MockBillingClient};
pub use errors::{AttemptFailure, BillingServiceError};
pub use retry::RetryPolicy;
