use sqlx::PgPool;
use tracing::{debug, info};

use super::DomainError;
use crate::db;
use crate::models::{Patient, PatientLookup};

/// A free-text patient search: either a RUN (without check digit) or some
/// other identification such as a passport number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchToken<'a> {
    pub raw: &'a str,
    pub run: Option<i32>,
}

impl<'a> SearchToken<'a> {
    pub fn parse(raw: &'a str) -> Self {
        Self {
            raw,
            run: raw.trim().parse::<i32>().ok(),
        }
    }
}

/// Resolve a search token to a single patient.
///
/// A token that parses as a RUN is looked up by `run` first; when that finds
/// nothing, or the token is not numeric, the raw token is matched against
/// `other_identification`. Returns `None` when neither key matches.
#[tracing::instrument(skip(pool))]
pub async fn resolve_patient(pool: &PgPool, token: &str) -> Result<Option<Patient>, DomainError> {
    let token = SearchToken::parse(token);

    match token.run {
        Some(run) => {
            if let Some(patient) = db::find_patient_by_run(pool, run).await? {
                info!(patient_id = patient.id, "Patient resolved by run");
                return Ok(Some(patient));
            }
            debug!("No patient with run {}, trying other identification", run);
        }
        None => debug!("Search token is not a run, trying other identification"),
    }

    let patient = db::find_patient_by_other_identification(pool, token.raw).await?;
    info!(found = patient.is_some(), "Patient resolved by other identification");
    Ok(patient)
}

/// Internal id of the patient named by an explicit lookup.
///
/// Unlike [`resolve_patient`] there is no fallback: a non-empty `run` must be
/// numeric and is the only key used.
#[tracing::instrument(skip(pool))]
pub async fn lookup_patient_id(
    pool: &PgPool,
    lookup: &PatientLookup,
) -> Result<Option<i64>, DomainError> {
    let patient = match lookup.run.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        Some(run) => {
            let run = run
                .parse::<i32>()
                .map_err(|e| DomainError::Validation(format!("Invalid run '{}': {}", run, e)))?;
            db::find_patient_by_run(pool, run).await?
        }
        None => match lookup.other_id.as_deref() {
            Some(other_id) => db::find_patient_by_other_identification(pool, other_id).await?,
            None => None,
        },
    };

    Ok(patient.map(|p| p.id))
}
