//! Billing client errors.

use std::time::Duration;

use thiserror::Error;

/// Status codes worth another attempt.
pub const RETRYABLE_STATUSES: [u16; 5] = [429, 500, 502, 503, 504];

/// Why a single create-provider attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttemptFailure {
    /// No connection could be established.
    #[error("connection failed: {0}")]
    Connect(String),

    /// The attempt ran past its timeout.
    #[error("request timed out")]
    Timeout,

    /// A non-success response.
    #[error("billing responded with status {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,

        /// Parsed `Retry-After` header, if any.
        retry_after: Option<Duration>,

        /// Start of the response body.
        body: String,
    },

    /// The request could not be built; nothing was sent.
    #[error("invalid request: {0}")]
    Request(String),

    /// A success status whose body could not be read. The provider may exist remotely.
    #[error("unreadable billing response: {0}")]
    InvalidResponse(String),
}

impl AttemptFailure {
    /// Whether another attempt could succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connect(_) | Self::Timeout => true,
            Self::Status { status, .. } => RETRYABLE_STATUSES.contains(status),
            Self::Request(_) | Self::InvalidResponse(_) => false,
        }
    }

    /// HTTP status, when a response was received.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Collaborator-supplied wait before the next attempt.
    #[must_use]
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            Self::Status { retry_after, .. } => *retry_after,
            _ => None,
        }
    }
}

/// Outcome of a create-provider call that never succeeded.
#[derive(Debug, Error)]
pub enum BillingServiceError {
    /// The collaborator refused the request; retrying cannot help.
    #[error("billing rejected create provider after {attempts} attempt(s): {failure}")]
    Rejected {
        /// Attempts made, including the first.
        attempts: u32,

        /// Last failure observed.
        failure: AttemptFailure,
    },

    /// Every allowed attempt failed with a retryable error.
    #[error("billing unavailable after {attempts} attempt(s): {failure}")]
    Exhausted {
        /// Attempts made, including the first.
        attempts: u32,

        /// Last failure observed.
        failure: AttemptFailure,
    },
}

impl BillingServiceError {
    /// Attempts made, including the first.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        match self {
            Self::Rejected { attempts, .. } | Self::Exhausted { attempts, .. } => *attempts,
        }
    }

    /// The last failure observed before giving up.
    #[must_use]
    pub fn failure(&self) -> &AttemptFailure {
        match self {
            Self::Rejected { failure, .. } | Self::Exhausted { failure, .. } => failure,
        }
    }

    /// HTTP status of the last failure, if it had one.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        self.failure().status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(status: u16) -> AttemptFailure {
        AttemptFailure::Status {
            status,
            retry_after: None,
            body: String::new(),
        }
    }

    #[test]
    fn transient_failures_are_retryable() {
        for code in [429, 500, 502, 503, 504] {
            assert!(status(code).is_retryable(), "{code} should be retryable");
        }

        assert!(AttemptFailure::Timeout.is_retryable());
        assert!(AttemptFailure::Connect("refused".into()).is_retryable());
    }

    #[test]
    fn request_defects_are_not_retryable() {
        for code in [400, 401, 404, 409, 422, 501] {
            assert!(!status(code).is_retryable(), "{code} should not be retryable");
        }

        assert!(!AttemptFailure::InvalidResponse("eof".into()).is_retryable());
        assert!(!AttemptFailure::Request("bad url".into()).is_retryable());
    }

    #[test]
    fn exhausted_display_names_status() {
        let err = BillingServiceError::Exhausted {
            attempts: 4,
            failure: AttemptFailure::Status {
                status: 500,
                retry_after: None,
                body: "boom".into(),
            },
        };

        assert_eq!(
            err.to_string(),
            "billing unavailable after 4 attempt(s): billing responded with status 500: boom"
        );
        assert_eq!(err.status(), Some(500));
        assert_eq!(err.attempts(), 4);
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<BillingServiceError>();
    }
}
