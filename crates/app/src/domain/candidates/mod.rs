//! Candidates

pub mod data;
pub mod errors;
pub mod records;
mod repository;
pub mod store;

pub use errors::CandidateStoreError;
pub use store::*;
