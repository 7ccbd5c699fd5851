use axum::{extract::State, Json};

use super::{log_store_fault, TRY_LATER};
use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::db;
use crate::models::Commune;

/// Commune by DEIS code, e.g. `"2101"`
#[tracing::instrument(skip(state))]
pub async fn get_commune(
    State(state): State<AppState>,
    Json(code_deis): Json<String>,
) -> ApiResult<Json<Option<Commune>>> {
    db::find_commune_by_code_deis(&state.pool, &code_deis)
        .await
        .map(Json)
        .map_err(|e| {
            log_store_fault("getComuna", &e);
            state.bad_request(TRY_LATER, e)
        })
}
