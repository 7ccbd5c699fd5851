use sqlx::PgPool;
use tracing::info;

use super::{resolve_patient, DomainError};
use crate::db;
use crate::models::{CaseResponse, Demographic, Sospecha};

pub const CASE_NOT_FOUND: &str = "No existe el caso";
pub const PATIENT_NOT_FOUND: &str = "No existe el paciente";
pub const DEMOGRAPHIC_NOT_FOUND: &str = "No existe el demografico";

/// Every suspect case of the patient named by `token`, in wire shape
#[tracing::instrument(skip(pool))]
pub async fn cases_for_patient(pool: &PgPool, token: &str) -> Result<Vec<Sospecha>, DomainError> {
    let patient = resolve_patient(pool, token)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("No patient matches '{}'", token)))?;

    let cases = db::list_suspect_cases_by_patient_id(pool, patient.id).await?;

    Ok(cases.iter().map(|c| c.to_sospecha()).collect())
}

/// Demographics of the patient named by `token`.
/// An unknown patient is an error; a known patient without demographics is not.
#[tracing::instrument(skip(pool))]
pub async fn demographic_for_patient(
    pool: &PgPool,
    token: &str,
) -> Result<Option<Demographic>, DomainError> {
    let patient = resolve_patient(pool, token)
        .await?
        .ok_or_else(|| DomainError::NotFound(format!("No patient matches '{}'", token)))?;

    Ok(db::find_demographic_by_patient_id(pool, patient.id).await?)
}

/// Case, patient and demographics for one case number.
/// Stops at the first missing link; never returns a partial composite.
#[tracing::instrument(skip(pool))]
pub async fn case_with_patient(pool: &PgPool, case_id: i64) -> Result<CaseResponse, DomainError> {
    let case = db::find_suspect_case_by_id(pool, case_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(CASE_NOT_FOUND.to_string()))?;

    let patient = db::find_patient_by_id(pool, case.patient_id)
        .await?
        .ok_or_else(|| DomainError::NotFound(PATIENT_NOT_FOUND.to_string()))?;

    let demographic = db::find_demographic_by_patient_id(pool, patient.id)
        .await?
        .ok_or_else(|| DomainError::NotFound(DEMOGRAPHIC_NOT_FOUND.to_string()))?;

    info!(patient_id = patient.id, "Suspect case assembled");

    Ok(CaseResponse {
        caso: case.to_clinical_sospecha(),
        paciente: patient,
        demografico: demographic,
    })
}
