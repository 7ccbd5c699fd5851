use sqlx::PgPool;
use tracing::{debug, info};

use crate::db::errors::{DatabaseError, Result};
use crate::models::{Commune, Demographic, Patient, SuspectCase, User};

/// Load a monitor user by RUN
#[tracing::instrument(skip(pool))]
pub async fn find_user_by_run(pool: &PgPool, run: i32) -> Result<Option<User>> {
    debug!("Loading user for run: {}", run);

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT
            id,
            run,
            dv,
            name,
            email,
            laboratory_id,
            establishment_id,
            created_at,
            updated_at
        FROM users
        WHERE run = $1
        ORDER BY id
        LIMIT 1
        "#
    )
    .bind(run)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    info!(found = user.is_some(), "User lookup finished");
    Ok(user)
}

/// Load a patient by RUN
#[tracing::instrument(skip(pool))]
pub async fn find_patient_by_run(pool: &PgPool, run: i32) -> Result<Option<Patient>> {
    debug!("Loading patient for run: {}", run);

    let patient = sqlx::query_as::<_, Patient>(
        r#"
        SELECT
            id,
            run,
            dv,
            other_identification,
            name,
            fathers_family,
            mothers_family,
            gender,
            birthday,
            status,
            created_at,
            updated_at
        FROM patients
        WHERE run = $1
        ORDER BY id
        LIMIT 1
        "#
    )
    .bind(run)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    Ok(patient)
}

/// Load a patient by passport or other non-RUN identification
#[tracing::instrument(skip(pool))]
pub async fn find_patient_by_other_identification(
    pool: &PgPool,
    other_identification: &str,
) -> Result<Option<Patient>> {
    debug!("Loading patient for other identification: {}", other_identification);

    let patient = sqlx::query_as::<_, Patient>(
        r#"
        SELECT
            id,
            run,
            dv,
            other_identification,
            name,
            fathers_family,
            mothers_family,
            gender,
            birthday,
            status,
            created_at,
            updated_at
        FROM patients
        WHERE other_identification = $1
        ORDER BY id
        LIMIT 1
        "#
    )
    .bind(other_identification)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    Ok(patient)
}

/// Load a patient by internal id
#[tracing::instrument(skip(pool))]
pub async fn find_patient_by_id(pool: &PgPool, patient_id: i64) -> Result<Option<Patient>> {
    let patient = sqlx::query_as::<_, Patient>(
        r#"
        SELECT
            id,
            run,
            dv,
            other_identification,
            name,
            fathers_family,
            mothers_family,
            gender,
            birthday,
            status,
            created_at,
            updated_at
        FROM patients
        WHERE id = $1
        "#
    )
    .bind(patient_id)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    Ok(patient)
}

/// Load a commune by its DEIS code
#[tracing::instrument(skip(pool))]
pub async fn find_commune_by_code_deis(pool: &PgPool, code_deis: &str) -> Result<Option<Commune>> {
    debug!("Loading commune for DEIS code: {}", code_deis);

    let commune = sqlx::query_as::<_, Commune>(
        r#"
        SELECT
            id,
            name,
            code_deis,
            region_id,
            created_at,
            updated_at
        FROM communes
        WHERE code_deis = $1
        ORDER BY id
        LIMIT 1
        "#
    )
    .bind(code_deis)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    info!(found = commune.is_some(), "Commune lookup finished");
    Ok(commune)
}

/// Load the demographics of a patient. One row per patient is a
/// convention only; the oldest row wins.
#[tracing::instrument(skip(pool))]
pub async fn find_demographic_by_patient_id(
    pool: &PgPool,
    patient_id: i64,
) -> Result<Option<Demographic>> {
    debug!("Loading demographics for patient_id: {}", patient_id);

    let demographic = sqlx::query_as::<_, Demographic>(
        r#"
        SELECT
            id,
            street_type,
            address,
            number,
            department,
            city,
            suburb,
            nationality,
            commune_id,
            region_id,
            latitude,
            longitude,
            telephone,
            telephone2,
            email,
            patient_id,
            created_at,
            updated_at
        FROM demographics
        WHERE patient_id = $1
        ORDER BY id
        LIMIT 1
        "#
    )
    .bind(patient_id)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    Ok(demographic)
}

/// Load a suspect case by id
#[tracing::instrument(skip(pool))]
pub async fn find_suspect_case_by_id(pool: &PgPool, case_id: i64) -> Result<Option<SuspectCase>> {
    debug!("Loading suspect case: {}", case_id);

    let case = sqlx::query_as::<_, SuspectCase>(
        r#"
        SELECT
            id,
            age,
            gender,
            sample_at,
            epidemiological_week,
            run_medic,
            symptoms,
            symptoms_at,
            pcr_sars_cov_2,
            pcr_sars_cov_2_at,
            sample_type,
            epivigila,
            gestation,
            gestation_week,
            close_contact,
            functionary,
            observation,
            reception_at,
            receptor_id,
            laboratory_id,
            validator_id,
            patient_id,
            establishment_id,
            user_id,
            created_at,
            updated_at
        FROM suspect_cases
        WHERE id = $1
        "#
    )
    .bind(case_id)
    .fetch_optional(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    Ok(case)
}

/// Load every suspect case of a patient, in store order
#[tracing::instrument(skip(pool))]
pub async fn list_suspect_cases_by_patient_id(
    pool: &PgPool,
    patient_id: i64,
) -> Result<Vec<SuspectCase>> {
    debug!("Loading suspect cases for patient_id: {}", patient_id);

    let cases = sqlx::query_as::<_, SuspectCase>(
        r#"
        SELECT
            id,
            age,
            gender,
            sample_at,
            epidemiological_week,
            run_medic,
            symptoms,
            symptoms_at,
            pcr_sars_cov_2,
            pcr_sars_cov_2_at,
            sample_type,
            epivigila,
            gestation,
            gestation_week,
            close_contact,
            functionary,
            observation,
            reception_at,
            receptor_id,
            laboratory_id,
            validator_id,
            patient_id,
            establishment_id,
            user_id,
            created_at,
            updated_at
        FROM suspect_cases
        WHERE patient_id = $1
        "#
    )
    .bind(patient_id)
    .fetch_all(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    info!("Loaded {} suspect cases for patient {}", cases.len(), patient_id);
    Ok(cases)
}
