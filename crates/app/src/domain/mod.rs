//! Onboarding Domain Concerns

pub mod approvals;
pub mod candidates;
