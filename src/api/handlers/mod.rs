// ApoloHRA handlers - thin layer that maps domain outcomes to each
// endpoint's status codes and fixed response texts

pub mod communes;
pub mod demographics;
pub mod patients;
pub mod suspect_cases;
pub mod users;

use axum::Json;
use tracing::{error, warn};

use crate::db::DatabaseError;

pub const TRY_LATER: &str = "Error.... Intente más tarde.";
pub const DEMOGRAPHIC_SAVE_FAILED: &str = "Error.....Intente más Tarde";
pub const NOT_SAVED: &str = "No se guardo correctamente....";
pub const PATIENT_NOT_FOUND: &str = "No se Encontro Paciente.... problema";
pub const SUSPECT_CASE_NOT_FOUND: &str = "No se Encontro sospecha.... problema";
pub const DEMOGRAPHIC_NOT_FOUND: &str = "No se Encontro Demografico.... problema";
pub const SYSTEM_ERROR: &str = "Computer system error.";

/// Liveness probe for ApoloHRA clients
pub async fn echo_ping() -> Json<bool> {
    Json(true)
}

/// Constraint violations are the caller's data; anything else is the store
pub(crate) fn log_store_fault(endpoint: &str, err: &DatabaseError) {
    if err.is_integrity_error() {
        warn!(endpoint, error = %err, "Rejected by store constraints");
    } else {
        error!(endpoint, error = %err, "Store operation failed");
    }
}
