use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::records::{Demographic, Patient};

/// Suspect case as exchanged with ApoloHRA.
///
/// `symptoms` travels as "Si"/"No" and the PCR fields keep the `pscr_`
/// spelling clients already send. Every field is optional: the same shape
/// serves case creation, sample reception and result delivery.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Sospecha {
    pub id: Option<i64>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub sample_at: Option<NaiveDateTime>,
    pub epidemiological_week: Option<i32>,
    pub run_medic: Option<String>,
    pub symptoms: Option<String>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub symptoms_at: Option<NaiveDateTime>,
    pub pscr_sars_cov_2: Option<String>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub pscr_sars_cov_2_at: Option<NaiveDateTime>,
    pub sample_type: Option<String>,
    pub epivigila: Option<i32>,
    pub gestation: Option<bool>,
    pub gestation_week: Option<i32>,
    pub close_contact: Option<bool>,
    pub functionary: Option<bool>,
    pub observation: Option<String>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub reception_at: Option<NaiveDateTime>,
    pub receptor_id: Option<i64>,
    pub laboratory_id: Option<i64>,
    pub validator_id: Option<i64>,
    pub patient_id: Option<i64>,
    pub establishment_id: Option<i64>,
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default, deserialize_with = "crate::models::timestamps::deserialize_optional")]
    pub updated_at: Option<NaiveDateTime>,
}

/// Body of POST /user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLookup {
    pub run: i32,
}

/// Body of POST /getPatient_ID. `run` wins when present and non-empty.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientLookup {
    pub run: Option<String>,
    #[serde(rename = "other_Id")]
    pub other_id: Option<String>,
}

/// Response of POST /getSuspectCase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseResponse {
    pub caso: Sospecha,
    pub paciente: Patient,
    pub demografico: Demographic,
}
