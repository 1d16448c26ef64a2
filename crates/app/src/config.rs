//! Configuration groups shared by the CLI commands.

use std::time::Duration;

use clap::Args;

use crate::billing::{BillingClientConfig, RetryPolicy};

/// Database settings.
#[derive(Debug, Args)]
pub struct DatabaseConfig {
    /// `PostgreSQL` connection string
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: String,

    /// Maximum pooled database connections
    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 10)]
    pub database_max_connections: u32,
}

/// Billing collaborator settings.
#[derive(Debug, Args)]
pub struct BillingConfig {
    /// Billing service base URL
    #[arg(long, env = "BILLING_URL")]
    pub billing_url: String,

    /// Per-attempt request timeout in milliseconds
    #[arg(long, env = "BILLING_TIMEOUT_MS", default_value_t = 5_000)]
    pub billing_timeout_ms: u64,

    /// Connect timeout in milliseconds
    #[arg(long, env = "BILLING_CONNECT_TIMEOUT_MS", default_value_t = 2_000)]
    pub billing_connect_timeout_ms: u64,

    /// Retries after the initial create-provider attempt
    #[arg(long, env = "BILLING_MAX_RETRIES", default_value_t = 3)]
    pub billing_max_retries: u32,

    /// Backoff before the first retry in milliseconds; doubled for each later retry
    #[arg(long, env = "BILLING_BASE_DELAY_MS", default_value_t = 500)]
    pub billing_base_delay_ms: u64,

    /// Upper bound on honoured `Retry-After` values in seconds
    #[arg(long, env = "BILLING_MAX_RETRY_AFTER_SECS", default_value_t = 30)]
    pub billing_max_retry_after_secs: u64,
}

impl BillingConfig {
    /// Client settings with millisecond and second values turned into durations.
    #[must_use]
    pub fn client_config(&self) -> BillingClientConfig {
        BillingClientConfig {
            base_url: self.billing_url.clone(),
            timeout: Duration::from_millis(self.billing_timeout_ms),
            connect_timeout: Duration::from_millis(self.billing_connect_timeout_ms),
            retry: RetryPolicy {
                max_retries: self.billing_max_retries,
                base_delay: Duration::from_millis(self.billing_base_delay_ms),
                max_retry_after: Duration::from_secs(self.billing_max_retry_after_secs),
            },
        }
    }
}

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "RUST_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact, global = true)]
    pub log_format: LogFormat,
}
