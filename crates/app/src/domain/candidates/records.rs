//! Candidate Records

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use thiserror::Error;
use uuid::Uuid;

/// Candidate UUID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CandidateUuid(Uuid);

impl CandidateUuid {
    /// Generate a new time-ordered candidate identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    /// Wrap an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID, as bound to SQL parameters.
    #[must_use]
    pub const fn into_uuid(self) -> Uuid {
        self.0
    }
}

impl Default for CandidateUuid {
    fn default() -> Self {
        Self::new()
    }
}

impl Display for CandidateUuid {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

impl FromStr for CandidateUuid {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

impl From<Uuid> for CandidateUuid {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

/// Identifier assigned to a provider by the billing collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProviderId(i64);

impl ProviderId {
    /// Wrap a billing-assigned id.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Raw value, as stored in `provider_id`.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        Display::fmt(&self.0, f)
    }
}

/// Approval state of a candidate.
///
/// `Pending` is the only non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CandidateStatus {
    /// Awaiting a decision.
    Pending,
    /// Provider created in billing.
    Approved,
    /// Turned down, optionally with a reason.
    Rejected,
}

impl CandidateStatus {
    /// Lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Whether no further transition is possible.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl Display for CandidateStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Returned when text names no known status.
#[derive(Debug, Error)]
#[error("unknown candidate status: {0}")]
pub struct ParseStatusError(String);

impl FromStr for CandidateStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(ParseStatusError(s.to_string())),
        }
    }
}

/// Produce a provider can deliver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Product {
    /// Oranges
    Orange,
    /// Tangerines
    Tangerine,
    /// Clementines
    Clementine,
    /// Grapefruit
    Grapefruit,
    /// Mandarins
    Mandarin,
}

impl Product {
    /// Lowercase name used in storage and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Orange => "orange",
            Self::Tangerine => "tangerine",
            Self::Clementine => "clementine",
            Self::Grapefruit => "grapefruit",
            Self::Mandarin => "mandarin",
        }
    }
}

impl Display for Product {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Returned when text names no known product.
#[derive(Debug, Error)]
#[error("unknown product: {0}")]
pub struct ParseProductError(String);

impl FromStr for Product {
    type Err = ParseProductError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "orange" => Ok(Self::Orange),
            "tangerine" => Ok(Self::Tangerine),
            "clementine" => Ok(Self::Clementine),
            "grapefruit" => Ok(Self::Grapefruit),
            "mandarin" => Ok(Self::Mandarin),
            _ => Err(ParseProductError(s.to_string())),
        }
    }
}

/// Candidate Record
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateRecord {
    /// Candidate UUID
    pub uuid: CandidateUuid,

    /// Company name, also sent to billing as the provider name.
    pub company_name: String,

    /// Contact email, unique ignoring case.
    pub contact_email: String,

    /// Contact phone number
    pub phone: Option<String>,

    /// Delivered products, without duplicates.
    pub products: Vec<Product>,

    /// Trucks in the fleet; at least one.
    pub truck_count: u32,

    /// Daily delivery capacity in tons; at least one.
    pub capacity_tons_per_day: u32,

    /// Free-form location
    pub location: Option<String>,

    /// Approval state
    pub status: CandidateStatus,

    /// Set exactly when `status` is approved.
    pub provider_id: Option<ProviderId>,

    /// Only ever set when `status` is rejected.
    pub rejection_reason: Option<String>,

    /// Starts at 1 and grows by one on every successful update.
    pub version: u64,

    /// Created At
    pub created_at: Timestamp,

    /// Updated At
    pub updated_at: Timestamp,
}
