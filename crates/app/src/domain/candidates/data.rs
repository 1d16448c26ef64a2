//! Candidates Data

use crate::domain::candidates::records::{
    CandidateRecord, CandidateStatus, CandidateUuid, Product, ProviderId,
};

/// New Candidate Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCandidate {
    /// Candidate UUID
    pub uuid: CandidateUuid,

    /// Company name
    pub company_name: String,

    /// Contact email; must not match an existing candidate, ignoring case.
    pub contact_email: String,

    /// Contact phone number
    pub phone: Option<String>,

    /// Delivered products; duplicates are collapsed on insert.
    pub products: Vec<Product>,

    /// Trucks in the fleet
    pub truck_count: u32,

    /// Daily delivery capacity in tons
    pub capacity_tons_per_day: u32,

    /// Free-form location
    pub location: Option<String>,
}

/// Field changes applied by a version-guarded update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateMutation {
    /// Target status
    pub status: CandidateStatus,

    /// Provider to record; required by storage when approving.
    pub provider_id: Option<ProviderId>,

    /// Reason to record; only accepted by storage when rejecting.
    pub rejection_reason: Option<String>,
}

impl CandidateMutation {
    /// Approve with the provider billing created.
    #[must_use]
    pub fn approve(provider_id: ProviderId) -> Self {
        Self {
            status: CandidateStatus::Approved,
            provider_id: Some(provider_id),
            rejection_reason: None,
        }
    }

    /// Reject with an optional reason. Blank reasons are stored as null.
    #[must_use]
    pub fn reject(reason: Option<String>) -> Self {
        Self {
            status: CandidateStatus::Rejected,
            provider_id: None,
            rejection_reason: reason
                .map(|reason| reason.trim().to_string())
                .filter(|reason| !reason.is_empty()),
        }
    }
}

/// Candidate list filter; `None` fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CandidateFilter {
    /// Only candidates in this status.
    pub status: Option<CandidateStatus>,

    /// Only candidates delivering this product.
    pub product: Option<Product>,
}

/// One page of candidates plus the filtered total.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidatePage {
    /// Requested page, newest first.
    pub items: Vec<CandidateRecord>,

    /// Matching candidates across all pages.
    pub total: u64,
}
