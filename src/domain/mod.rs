// Domain layer - lookup rules with no HTTP concerns.
// Handlers call into these and decide the status code per endpoint.

pub mod patients;
pub mod suspect_cases;

use crate::db::DatabaseError;

// Domain error type - no HTTP concerns
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<DatabaseError> for DomainError {
    fn from(e: DatabaseError) -> Self {
        DomainError::Database(e.to_string())
    }
}

pub use patients::{lookup_patient_id, resolve_patient, SearchToken};
pub use suspect_cases::{case_with_patient, cases_for_patient, demographic_for_patient};
