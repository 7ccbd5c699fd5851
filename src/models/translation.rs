use super::{CaseResult, NewSuspectCase, SampleReception, Sospecha, SuspectCase};

const SYMPTOMS_YES: &str = "Si";
const SYMPTOMS_NO: &str = "No";

/// Only the exact string "Si" means symptomatic
pub fn symptoms_from_wire(symptoms: Option<&str>) -> bool {
    symptoms == Some(SYMPTOMS_YES)
}

/// Unknown (null) symptoms are reported as "No"
pub fn symptoms_to_wire(symptoms: Option<bool>) -> String {
    match symptoms {
        Some(true) => SYMPTOMS_YES.to_string(),
        _ => SYMPTOMS_NO.to_string(),
    }
}

impl Sospecha {
    /// Project a creation request into the persisted shape
    pub fn to_new_suspect_case(&self) -> NewSuspectCase {
        NewSuspectCase {
            age: self.age,
            gender: self.gender.clone(),
            sample_at: self.sample_at,
            epidemiological_week: self.epidemiological_week,
            run_medic: self.run_medic.clone(),
            symptoms: symptoms_from_wire(self.symptoms.as_deref()),
            symptoms_at: self.symptoms_at,
            pcr_sars_cov_2: self.pscr_sars_cov_2.clone(),
            sample_type: self.sample_type.clone(),
            epivigila: self.epivigila,
            gestation: self.gestation,
            gestation_week: self.gestation_week,
            close_contact: self.close_contact,
            functionary: self.functionary,
            observation: self.observation.clone(),
            patient_id: self.patient_id,
            establishment_id: self.establishment_id,
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Reception-phase fields; `None` when the request carries no case id
    pub fn to_sample_reception(&self) -> Option<SampleReception> {
        Some(SampleReception {
            case_id: self.id?,
            reception_at: self.reception_at,
            receptor_id: self.receptor_id,
            laboratory_id: self.laboratory_id,
            updated_at: self.updated_at,
        })
    }

    /// Result-phase fields; `None` when the request carries no case id
    pub fn to_case_result(&self) -> Option<CaseResult> {
        Some(CaseResult {
            case_id: self.id?,
            pcr_sars_cov_2_at: self.pscr_sars_cov_2_at,
            pcr_sars_cov_2: self.pscr_sars_cov_2.clone(),
            validator_id: self.validator_id,
            updated_at: self.updated_at,
        })
    }
}

impl SuspectCase {
    /// Full wire projection, used when listing a patient's cases
    pub fn to_sospecha(&self) -> Sospecha {
        Sospecha {
            id: Some(self.id),
            age: self.age,
            gender: self.gender.clone(),
            sample_at: self.sample_at,
            epidemiological_week: self.epidemiological_week,
            run_medic: self.run_medic.clone(),
            symptoms: Some(symptoms_to_wire(self.symptoms)),
            symptoms_at: self.symptoms_at,
            pscr_sars_cov_2: self.pcr_sars_cov_2.clone(),
            pscr_sars_cov_2_at: self.pcr_sars_cov_2_at,
            sample_type: self.sample_type.clone(),
            epivigila: self.epivigila,
            gestation: self.gestation,
            gestation_week: self.gestation_week,
            close_contact: self.close_contact,
            functionary: self.functionary,
            observation: self.observation.clone(),
            reception_at: self.reception_at,
            receptor_id: self.receptor_id,
            laboratory_id: self.laboratory_id,
            validator_id: self.validator_id,
            patient_id: Some(self.patient_id),
            establishment_id: self.establishment_id,
            user_id: self.user_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Clinical subset returned by getSuspectCase. Identity, lab and
    /// audit fields are left null.
    pub fn to_clinical_sospecha(&self) -> Sospecha {
        Sospecha {
            id: Some(self.id),
            sample_at: self.sample_at,
            run_medic: self.run_medic.clone(),
            symptoms: Some(symptoms_to_wire(self.symptoms)),
            symptoms_at: self.symptoms_at,
            sample_type: self.sample_type.clone(),
            epivigila: self.epivigila,
            gestation: self.gestation,
            gestation_week: self.gestation_week,
            observation: self.observation.clone(),
            ..Sospecha::default()
        }
    }
}
