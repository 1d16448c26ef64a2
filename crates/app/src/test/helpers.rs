//! Test Helpers

use jiff::Timestamp;

use crate::domain::candidates::{
    data::NewCandidate,
    records::{CandidateRecord, CandidateStatus, CandidateUuid, Product, ProviderId},
};

pub(crate) fn new_candidate(company_name: &str, contact_email: &str) -> NewCandidate {
    NewCandidate {
        uuid: CandidateUuid::new(),
        company_name: company_name.to_string(),
        contact_email: contact_email.to_string(),
        phone: Some("+972-4-000-0000".to_string()),
        products: vec![Product::Orange, Product::Grapefruit],
        truck_count: 3,
        capacity_tons_per_day: 40,
        location: Some("Haifa".to_string()),
    }
}

/// An in-memory record in a state the storage checks would accept.
pub(crate) fn candidate_record(status: CandidateStatus, version: u64) -> CandidateRecord {
    let now = Timestamp::now();

    CandidateRecord {
        uuid: CandidateUuid::new(),
        company_name: "Grove & Sons".to_string(),
        contact_email: "grove@example.com".to_string(),
        phone: None,
        products: vec![Product::Orange],
        truck_count: 2,
        capacity_tons_per_day: 25,
        location: None,
        status,
        provider_id: (status == CandidateStatus::Approved).then_some(ProviderId::new(1)),
        rejection_reason: (status == CandidateStatus::Rejected)
            .then(|| "not a citrus grower".to_string()),
        version,
        created_at: now,
        updated_at: now,
    }
}
