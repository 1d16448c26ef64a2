//! Provider onboarding: candidate storage, billing provider creation and
//! exactly-once approval decisions.

pub mod billing;
pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod observability;

#[cfg(test)]
mod test;
