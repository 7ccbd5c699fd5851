use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Monitor `users` table. The password hash is never selected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub run: i32,
    pub dv: Option<String>,
    pub name: String,
    pub email: Option<String>,
    pub laboratory_id: Option<i64>,
    pub establishment_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Monitor `patients` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Patient {
    pub id: i64,
    pub run: Option<i32>,  // null for foreigners identified by other_identification
    pub dv: Option<String>,
    pub other_identification: Option<String>,
    pub name: String,
    pub fathers_family: Option<String>,
    pub mothers_family: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub status: Option<String>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Patient as sent by AddPatients; the store assigns the id
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPatient {
    pub run: Option<i32>,
    pub dv: Option<String>,
    pub other_identification: Option<String>,
    pub name: String,
    pub fathers_family: Option<String>,
    pub mothers_family: Option<String>,
    pub gender: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Monitor `communes` table, keyed by DEIS code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Commune {
    pub id: i64,
    pub name: String,
    pub code_deis: String,
    pub region_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Monitor `demographics` table (residence and contact of a patient)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Demographic {
    pub id: i64,
    pub street_type: Option<String>,
    pub address: Option<String>,
    pub number: Option<String>,
    pub department: Option<String>,
    pub city: Option<String>,
    pub suburb: Option<String>,
    pub nationality: Option<String>,
    pub commune_id: Option<i64>,
    pub region_id: Option<i64>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub telephone: Option<String>,
    pub telephone2: Option<String>,
    pub email: Option<String>,
    pub patient_id: i64,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Demographics as sent by AddDemograph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewDemographic {
    pub street_type: Option<String>,
    pub address: Option<String>,
    pub number: Option<String>,
    pub department: Option<String>,
    pub city: Option<String>,
    pub suburb: Option<String>,
    pub nationality: Option<String>,
    pub commune_id: Option<i64>,
    pub region_id: Option<i64>,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub telephone: Option<String>,
    pub telephone2: Option<String>,
    pub email: Option<String>,
    pub patient_id: i64,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Monitor `suspect_cases` table
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct SuspectCase {
    pub id: i64,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub sample_at: Option<NaiveDateTime>,
    pub epidemiological_week: Option<i32>,
    pub run_medic: Option<String>,
    pub symptoms: Option<bool>,
    pub symptoms_at: Option<NaiveDateTime>,
    pub pcr_sars_cov_2: Option<String>,
    pub pcr_sars_cov_2_at: Option<NaiveDateTime>,
    pub sample_type: Option<String>,
    pub epivigila: Option<i32>,
    pub gestation: Option<bool>,
    pub gestation_week: Option<i32>,
    pub close_contact: Option<bool>,
    pub functionary: Option<bool>,
    pub observation: Option<String>,
    pub reception_at: Option<NaiveDateTime>,
    pub receptor_id: Option<i64>,
    pub laboratory_id: Option<i64>,
    pub validator_id: Option<i64>,
    pub patient_id: i64,
    pub establishment_id: Option<i64>,
    pub user_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Creation-phase fields of a suspect case.
/// Reception and result fields are filled later by their own updates.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSuspectCase {
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub sample_at: Option<NaiveDateTime>,
    pub epidemiological_week: Option<i32>,
    pub run_medic: Option<String>,
    pub symptoms: bool,
    pub symptoms_at: Option<NaiveDateTime>,
    pub pcr_sars_cov_2: Option<String>,
    pub sample_type: Option<String>,
    pub epivigila: Option<i32>,
    pub gestation: Option<bool>,
    pub gestation_week: Option<i32>,
    pub close_contact: Option<bool>,
    pub functionary: Option<bool>,
    pub observation: Option<String>,
    pub patient_id: Option<i64>,
    pub establishment_id: Option<i64>,
    pub user_id: Option<i64>,
    pub created_at: Option<NaiveDateTime>,
    pub updated_at: Option<NaiveDateTime>,
}

/// Sample reception by the laboratory
#[derive(Debug, Clone, PartialEq)]
pub struct SampleReception {
    pub case_id: i64,
    pub reception_at: Option<NaiveDateTime>,
    pub receptor_id: Option<i64>,
    pub laboratory_id: Option<i64>,
    pub updated_at: Option<NaiveDateTime>,
}

/// PCR result delivery
#[derive(Debug, Clone, PartialEq)]
pub struct CaseResult {
    pub case_id: i64,
    pub pcr_sars_cov_2_at: Option<NaiveDateTime>,
    pub pcr_sars_cov_2: Option<String>,
    pub validator_id: Option<i64>,
    pub updated_at: Option<NaiveDateTime>,
}
