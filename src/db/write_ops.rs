use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::db::errors::{DatabaseError, Result};
use crate::models::{CaseResult, NewDemographic, NewPatient, NewSuspectCase, SampleReception};

/// Insert a patient and return its internal id
#[tracing::instrument(skip(pool, patient), fields(run = ?patient.run))]
pub async fn insert_patient(pool: &PgPool, patient: &NewPatient) -> Result<i64> {
    debug!("Inserting patient");

    let row = sqlx::query(
        r#"
        INSERT INTO patients (
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
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING id
        "#
    )
    .bind(patient.run)
    .bind(&patient.dv)
    .bind(&patient.other_identification)
    .bind(&patient.name)
    .bind(&patient.fathers_family)
    .bind(&patient.mothers_family)
    .bind(&patient.gender)
    .bind(patient.birthday)
    .bind(&patient.status)
    .bind(patient.created_at)
    .bind(patient.updated_at)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    let patient_id: i64 = row.get("id");

    info!("Inserted patient with ID: {}", patient_id);
    Ok(patient_id)
}

/// Insert the demographics of a patient and return the new row id
#[tracing::instrument(skip(pool, demographic), fields(patient_id = demographic.patient_id))]
pub async fn insert_demographic(pool: &PgPool, demographic: &NewDemographic) -> Result<i64> {
    debug!("Inserting demographics");

    let row = sqlx::query(
        r#"
        INSERT INTO demographics (
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
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
        RETURNING id
        "#
    )
    .bind(&demographic.street_type)
    .bind(&demographic.address)
    .bind(&demographic.number)
    .bind(&demographic.department)
    .bind(&demographic.city)
    .bind(&demographic.suburb)
    .bind(&demographic.nationality)
    .bind(demographic.commune_id)
    .bind(demographic.region_id)
    .bind(demographic.latitude)
    .bind(demographic.longitude)
    .bind(&demographic.telephone)
    .bind(&demographic.telephone2)
    .bind(&demographic.email)
    .bind(demographic.patient_id)
    .bind(demographic.created_at)
    .bind(demographic.updated_at)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    let demographic_id: i64 = row.get("id");

    info!("Inserted demographics with ID: {}", demographic_id);
    Ok(demographic_id)
}

/// Insert a new suspect case (creation phase) and return the case number
#[tracing::instrument(skip(pool, case), fields(patient_id = ?case.patient_id))]
pub async fn insert_suspect_case(pool: &PgPool, case: &NewSuspectCase) -> Result<i64> {
    debug!("Inserting suspect case");

    let row = sqlx::query(
        r#"
        INSERT INTO suspect_cases (
            age,
            gender,
            sample_at,
            epidemiological_week,
            run_medic,
            symptoms,
            symptoms_at,
            pcr_sars_cov_2,
            sample_type,
            epivigila,
            gestation,
            gestation_week,
            close_contact,
            functionary,
            observation,
            patient_id,
            establishment_id,
            user_id,
            created_at,
            updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19, $20)
        RETURNING id
        "#
    )
    .bind(case.age)
    .bind(&case.gender)
    .bind(case.sample_at)
    .bind(case.epidemiological_week)
    .bind(&case.run_medic)
    .bind(case.symptoms)
    .bind(case.symptoms_at)
    .bind(&case.pcr_sars_cov_2)
    .bind(&case.sample_type)
    .bind(case.epivigila)
    .bind(case.gestation)
    .bind(case.gestation_week)
    .bind(case.close_contact)
    .bind(case.functionary)
    .bind(&case.observation)
    .bind(case.patient_id)
    .bind(case.establishment_id)
    .bind(case.user_id)
    .bind(case.created_at)
    .bind(case.updated_at)
    .fetch_one(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    let case_id: i64 = row.get("id");

    info!("Inserted suspect case with ID: {}", case_id);
    Ok(case_id)
}

/// Record sample reception on an existing case.
/// Returns false, having written nothing, when the case does not exist.
#[tracing::instrument(skip(pool, reception), fields(case_id = reception.case_id))]
pub async fn update_sample_reception(pool: &PgPool, reception: &SampleReception) -> Result<bool> {
    debug!("Recording sample reception");

    let result = sqlx::query(
        r#"
        UPDATE suspect_cases
        SET reception_at = $2,
            receptor_id = $3,
            laboratory_id = $4,
            updated_at = $5
        WHERE id = $1
        "#
    )
    .bind(reception.case_id)
    .bind(reception.reception_at)
    .bind(reception.receptor_id)
    .bind(reception.laboratory_id)
    .bind(reception.updated_at)
    .execute(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    let updated = result.rows_affected() > 0;
    info!(updated, "Sample reception recorded");
    Ok(updated)
}

/// Record the PCR result on an existing case.
/// Returns false, having written nothing, when the case does not exist.
#[tracing::instrument(skip(pool, outcome), fields(case_id = outcome.case_id))]
pub async fn update_case_result(pool: &PgPool, outcome: &CaseResult) -> Result<bool> {
    debug!("Recording PCR result");

    let result = sqlx::query(
        r#"
        UPDATE suspect_cases
        SET pcr_sars_cov_2_at = $2,
            pcr_sars_cov_2 = $3,
            validator_id = $4,
            updated_at = $5
        WHERE id = $1
        "#
    )
    .bind(outcome.case_id)
    .bind(outcome.pcr_sars_cov_2_at)
    .bind(&outcome.pcr_sars_cov_2)
    .bind(outcome.validator_id)
    .bind(outcome.updated_at)
    .execute(pool)
    .await
    .map_err(DatabaseError::QueryError)?;

    let updated = result.rows_affected() > 0;
    info!(updated, "PCR result recorded");
    Ok(updated)
}
