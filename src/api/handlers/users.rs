use axum::{extract::State, Json};

use super::{log_store_fault, TRY_LATER};
use crate::api::error::ApiResult;
use crate::api::server::AppState;
use crate::db;
use crate::models::{User, UserLookup};

/// Staff user by run, or `null`
#[tracing::instrument(skip(state), fields(run = lookup.run))]
pub async fn get_user(
    State(state): State<AppState>,
    Json(lookup): Json<UserLookup>,
) -> ApiResult<Json<Option<User>>> {
    db::find_user_by_run(&state.pool, lookup.run)
        .await
        .map(Json)
        .map_err(|e| {
            log_store_fault("user", &e);
            state.bad_request(TRY_LATER, e)
        })
}
