//! Candidates Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as, query_scalar};

use crate::domain::candidates::{
    data::{CandidateFilter, CandidateMutation, NewCandidate},
    records::{CandidateRecord, CandidateStatus, CandidateUuid, Product, ProviderId},
};

const GET_CANDIDATE_SQL: &str = include_str!("sql/get_candidate.sql");
const CREATE_CANDIDATE_SQL: &str = include_str!("sql/create_candidate.sql");
const UPDATE_CANDIDATE_SQL: &str = include_str!("sql/update_candidate.sql");
const LIST_CANDIDATES_SQL: &str = include_str!("sql/list_candidates.sql");
const COUNT_CANDIDATES_SQL: &str = include_str!("sql/count_candidates.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgCandidatesRepository;

impl PgCandidatesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn get_candidate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CandidateUuid,
    ) -> Result<CandidateRecord, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(GET_CANDIDATE_SQL)
            .bind(candidate.into_uuid())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn create_candidate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: NewCandidate,
    ) -> Result<CandidateRecord, sqlx::Error> {
        let truck_count = to_db_int("truck_count", candidate.truck_count)?;
        let capacity = to_db_int("capacity_tons_per_day", candidate.capacity_tons_per_day)?;

        query_as::<Postgres, CandidateRecord>(CREATE_CANDIDATE_SQL)
            .bind(candidate.uuid.into_uuid())
            .bind(candidate.company_name)
            .bind(candidate.contact_email)
            .bind(candidate.phone)
            .bind(product_names(&candidate.products))
            .bind(truck_count)
            .bind(capacity)
            .bind(candidate.location)
            .fetch_one(&mut **tx)
            .await
    }

    /// Applies `mutation` only while the row is pending and its stored version equals
    /// `expected_version`.
    ///
    /// Returns `None` when no row matched.
    pub(crate) async fn update_candidate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        candidate: CandidateUuid,
        expected_version: u64,
        mutation: CandidateMutation,
    ) -> Result<Option<CandidateRecord>, sqlx::Error> {
        let expected_version =
            i64::try_from(expected_version).map_err(|e| sqlx::Error::ColumnDecode {
                index: "version".to_string(),
                source: Box::new(e),
            })?;

        query_as::<Postgres, CandidateRecord>(UPDATE_CANDIDATE_SQL)
            .bind(candidate.into_uuid())
            .bind(expected_version)
            .bind(mutation.status.as_str())
            .bind(mutation.provider_id.map(ProviderId::get))
            .bind(mutation.rejection_reason)
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn list_candidates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: CandidateFilter,
        limit: u32,
        offset: u32,
    ) -> Result<Vec<CandidateRecord>, sqlx::Error> {
        query_as::<Postgres, CandidateRecord>(LIST_CANDIDATES_SQL)
            .bind(filter.status.map(CandidateStatus::as_str))
            .bind(filter.product.map(Product::as_str))
            .bind(i64::from(limit))
            .bind(i64::from(offset))
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn count_candidates(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        filter: CandidateFilter,
    ) -> Result<i64, sqlx::Error> {
        query_scalar::<Postgres, i64>(COUNT_CANDIDATES_SQL)
            .bind(filter.status.map(CandidateStatus::as_str))
            .bind(filter.product.map(Product::as_str))
            .fetch_one(&mut **tx)
            .await
    }
}

fn to_db_int(column: &str, value: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

fn from_db_int(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|e| sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(e),
    })
}

/// Lowercase product names, duplicates removed, first occurrence wins.
fn product_names(products: &[Product]) -> Vec<String> {
    let mut names: Vec<String> = Vec::with_capacity(products.len());

    for product in products {
        let name = product.as_str();

        if !names.iter().any(|existing| existing == name) {
            names.push(name.to_string());
        }
    }

    names
}

impl<'r> FromRow<'r, PgRow> for CandidateRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<CandidateStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        let products = row
            .try_get::<Vec<String>, _>("products")?
            .iter()
            .map(|name| name.parse::<Product>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "products".to_string(),
                source: Box::new(e),
            })?;

        let version: i64 = row.try_get("version")?;

        let version = u64::try_from(version).map_err(|e| sqlx::Error::ColumnDecode {
            index: "version".to_string(),
            source: Box::new(e),
        })?;

        Ok(Self {
            uuid: CandidateUuid::from_uuid(row.try_get("uuid")?),
            company_name: row.try_get("company_name")?,
            contact_email: row.try_get("contact_email")?,
            phone: row.try_get("phone")?,
            products,
            truck_count: from_db_int(row, "truck_count")?,
            capacity_tons_per_day: from_db_int(row, "capacity_tons_per_day")?,
            location: row.try_get("location")?,
            status,
            provider_id: row
                .try_get::<Option<i64>, _>("provider_id")?
                .map(ProviderId::new),
            rejection_reason: row.try_get("rejection_reason")?,
            version,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
