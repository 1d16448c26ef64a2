//! Candidate Approvals

pub mod errors;
pub mod service;

pub use errors::ApprovalServiceError;
pub use service::*;
