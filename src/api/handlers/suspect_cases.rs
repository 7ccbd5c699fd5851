use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, info, warn};

use super::{log_store_fault, NOT_SAVED, SUSPECT_CASE_NOT_FOUND, SYSTEM_ERROR};
use crate::api::error::{ApiError, ApiResult};
use crate::api::server::AppState;
use crate::db;
use crate::domain::{self, DomainError};
use crate::models::{CaseResponse, Sospecha};

pub const RECEPTION_SAVED: &str = "Se Guardo correctamente...";
pub const RESULT_SAVED: &str = "Exito... se actualizo los resultado..";

/// Register a new suspect case and return its id
#[tracing::instrument(skip(state, request), fields(patient_id = ?request.patient_id))]
pub async fn add_suspect_case(
    State(state): State<AppState>,
    Json(request): Json<Sospecha>,
) -> ApiResult<Json<i64>> {
    let case = request.to_new_suspect_case();

    let id = db::insert_suspect_case(&state.pool, &case).await.map_err(|e| {
        log_store_fault("addSospecha", &e);
        state.bad_request(NOT_SAVED, e)
    })?;

    info!(case_id = id, "Suspect case registered");
    Ok(Json(id))
}

/// Stamp the sample-reception fields of an existing case
#[tracing::instrument(skip(state, request), fields(case_id = ?request.id))]
pub async fn record_sample_reception(
    State(state): State<AppState>,
    Json(request): Json<Sospecha>,
) -> ApiResult<&'static str> {
    let reception = request
        .to_sample_reception()
        .ok_or_else(|| state.bad_request(NOT_SAVED, "missing case id"))?;

    let updated = db::update_sample_reception(&state.pool, &reception)
        .await
        .map_err(|e| {
            log_store_fault("recepcionMuestra", &e);
            state.bad_request(NOT_SAVED, e)
        })?;

    if !updated {
        warn!("Sample reception for unknown case");
        return Err(state.bad_request(NOT_SAVED, domain::suspect_cases::CASE_NOT_FOUND));
    }

    Ok(RECEPTION_SAVED)
}

/// Stamp the PCR result fields of an existing case.
/// An unknown or absent case id answers 404 with the request echoed back.
#[tracing::instrument(skip(state, request), fields(case_id = ?request.id))]
pub async fn record_result(
    State(state): State<AppState>,
    Json(request): Json<Sospecha>,
) -> Result<Response, ApiError> {
    let Some(outcome) = request.to_case_result() else {
        warn!("Result without case id");
        return Ok(unknown_case(request));
    };

    let updated = db::update_case_result(&state.pool, &outcome)
        .await
        .map_err(|e| {
            log_store_fault("resultado", &e);
            state.bad_request(NOT_SAVED, e)
        })?;

    if !updated {
        warn!("Result for unknown case");
        return Ok(unknown_case(request));
    }

    Ok(RESULT_SAVED.into_response())
}

fn unknown_case(request: Sospecha) -> Response {
    (StatusCode::NOT_FOUND, Json(request)).into_response()
}

/// Every case of the patient named by a search token
#[tracing::instrument(skip(state))]
pub async fn list_suspect_cases(
    State(state): State<AppState>,
    Json(token): Json<String>,
) -> ApiResult<Json<Vec<Sospecha>>> {
    domain::cases_for_patient(&state.pool, &token)
        .await
        .map(Json)
        .map_err(|e| {
            if !matches!(e, DomainError::NotFound(_)) {
                error!(error = %e, "Suspect case listing failed");
            }
            state.bad_request(SUSPECT_CASE_NOT_FOUND, e)
        })
}

/// Case with its patient and demographics
#[tracing::instrument(skip(state))]
pub async fn get_suspect_case(
    State(state): State<AppState>,
    Json(case_id): Json<i64>,
) -> ApiResult<Json<CaseResponse>> {
    match domain::case_with_patient(&state.pool, case_id).await {
        Ok(response) => Ok(Json(response)),
        Err(DomainError::NotFound(msg)) => Err(ApiError::BadRequest(msg)),
        Err(e) => {
            error!(error = %e, "Suspect case lookup failed");
            Err(state.bad_request(SYSTEM_ERROR, e))
        }
    }
}
