use axum::{extract::State, Json};
use tracing::{error, info, warn};

use super::{log_store_fault, PATIENT_NOT_FOUND, TRY_LATER};
use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::db;
use crate::domain::{self, DomainError};
use crate::models::{NewPatient, Patient, PatientLookup};

/// Internal id for an explicit run or other identification, or `null`
#[tracing::instrument(skip(state))]
pub async fn get_patient_id(
    State(state): State<AppState>,
    Json(lookup): Json<PatientLookup>,
) -> ApiResult<Json<Option<i64>>> {
    match domain::lookup_patient_id(&state.pool, &lookup).await {
        Ok(id) => Ok(Json(id)),
        Err(DomainError::Validation(msg)) => {
            warn!("Rejected patient lookup: {}", msg);
            Err(state.bad_request(TRY_LATER, msg))
        }
        Err(e) => {
            error!(error = %e, "Patient id lookup failed");
            Err(state.bad_request(TRY_LATER, e))
        }
    }
}

#[tracing::instrument(skip(state, patient), fields(run = ?patient.run))]
pub async fn add_patient(
    State(state): State<AppState>,
    Json(patient): Json<NewPatient>,
) -> ApiResult<Json<i64>> {
    let id = db::insert_patient(&state.pool, &patient).await.map_err(|e| {
        log_store_fault("AddPatients", &e);
        state.bad_request(TRY_LATER, e)
    })?;

    info!(patient_id = id, "Patient registered");
    Ok(Json(id))
}

/// Patient by free-text token (run first, then other identification)
#[tracing::instrument(skip(state))]
pub async fn get_patient(
    State(state): State<AppState>,
    Json(token): Json<String>,
) -> ApiResult<Json<Option<Patient>>> {
    domain::resolve_patient(&state.pool, &token)
        .await
        .map(Json)
        .map_err(|e| {
            error!(error = %e, "Patient search failed");
            state.bad_request(PATIENT_NOT_FOUND, e)
        })
}
