use axum::{extract::State, Json};
use tracing::{error, info};

use super::{log_store_fault, DEMOGRAPHIC_NOT_FOUND, DEMOGRAPHIC_SAVE_FAILED};
use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::db;
use crate::domain::{self, DomainError};
use crate::models::{Demographic, NewDemographic};

pub const DEMOGRAPHIC_SAVED: &str = "Se Guardo Correctamente la Demografía";

#[tracing::instrument(skip(state, demographic), fields(patient_id = demographic.patient_id))]
pub async fn add_demographic(
    State(state): State<AppState>,
    Json(demographic): Json<NewDemographic>,
) -> ApiResult<&'static str> {
    let id = db::insert_demographic(&state.pool, &demographic)
        .await
        .map_err(|e| {
            log_store_fault("AddDemograph", &e);
            state.bad_request(DEMOGRAPHIC_SAVE_FAILED, e)
        })?;

    info!(demographic_id = id, "Demographics saved");
    Ok(DEMOGRAPHIC_SAVED)
}

/// Demographics for a patient token. A known patient without demographics
/// yields `null`; an unknown patient is a 400.
#[tracing::instrument(skip(state))]
pub async fn get_demographic(
    State(state): State<AppState>,
    Json(token): Json<String>,
) -> ApiResult<Json<Option<Demographic>>> {
    match domain::demographic_for_patient(&state.pool, &token).await {
        Ok(demographic) => Ok(Json(demographic)),
        Err(e @ DomainError::NotFound(_)) => Err(state.bad_request(DEMOGRAPHIC_NOT_FOUND, e)),
        Err(e) => {
            error!(error = %e, "Demographics lookup failed");
            Err(state.bad_request(DEMOGRAPHIC_NOT_FOUND, e))
        }
    }
}
