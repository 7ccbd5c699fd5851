// Store-backed tests. They need a Postgres reachable through DATABASE_URL;
// sqlx creates a throwaway database per test and applies ./migrations.

#[cfg(test)]
mod integration_tests {
    use chrono::NaiveDateTime;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use sqlx::PgPool;

    use super::super::*;
    use crate::domain::{self, suspect_cases::DEMOGRAPHIC_NOT_FOUND, DomainError};
    use crate::models::{
        CaseResult, NewDemographic, NewPatient, PatientLookup, SampleReception, Sospecha,
    };

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").unwrap()
    }

    fn new_patient(run: Option<i32>, other_identification: Option<&str>, name: &str) -> NewPatient {
        NewPatient {
            run,
            dv: run.map(|_| "k".to_string()),
            other_identification: other_identification.map(str::to_string),
            name: name.to_string(),
            fathers_family: Some("Perez".to_string()),
            mothers_family: None,
            gender: Some("female".to_string()),
            birthday: None,
            status: None,
            created_at: Some(at("2020-10-28T09:00:00")),
            updated_at: Some(at("2020-10-28T09:00:00")),
        }
    }

    fn new_demographic(patient_id: i64) -> NewDemographic {
        NewDemographic {
            street_type: Some("Calle".to_string()),
            address: Some("Baquedano".to_string()),
            number: Some("1025".to_string()),
            department: None,
            city: Some("Iquique".to_string()),
            suburb: None,
            nationality: Some("Chile".to_string()),
            commune_id: Some(5),
            region_id: Some(1),
            latitude: Some(dec!(-20.2140657)),
            longitude: Some(dec!(-70.1525704)),
            telephone: Some("912345678".to_string()),
            telephone2: None,
            email: None,
            patient_id,
            created_at: Some(at("2020-10-28T09:00:00")),
            updated_at: Some(at("2020-10-28T09:00:00")),
        }
    }

    fn creation_request(patient_id: i64, symptoms: Option<&str>) -> Sospecha {
        Sospecha {
            age: Some(45),
            gender: Some("female".to_string()),
            sample_at: Some(at("2020-10-27T08:30:00")),
            epidemiological_week: Some(44),
            run_medic: Some("22222222".to_string()),
            symptoms: symptoms.map(str::to_string),
            symptoms_at: Some(at("2020-10-25T00:00:00")),
            pscr_sars_cov_2: Some("pending".to_string()),
            sample_type: Some("TÓRULAS NASOFARÍNGEAS".to_string()),
            epivigila: Some(1024),
            gestation: Some(false),
            observation: Some("control".to_string()),
            patient_id: Some(patient_id),
            establishment_id: Some(3799),
            user_id: Some(1),
            created_at: Some(at("2020-10-28T09:00:00")),
            updated_at: Some(at("2020-10-28T09:00:00")),
            ..Sospecha::default()
        }
    }

    async fn insert_case(pool: &PgPool, patient_id: i64, symptoms: Option<&str>) -> i64 {
        insert_suspect_case(pool, &creation_request(patient_id, symptoms).to_new_suspect_case())
            .await
            .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_run_takes_priority_over_other_identification(pool: PgPool) {
        // Second patient carries the first one's run as its passport number
        let by_run = insert_patient(&pool, &new_patient(Some(11111111), None, "Ana")).await.unwrap();
        insert_patient(&pool, &new_patient(None, Some("11111111"), "Bea")).await.unwrap();

        let patient = domain::resolve_patient(&pool, "11111111").await.unwrap().unwrap();
        assert_eq!(patient.id, by_run);
        assert_eq!(patient.name, "Ana");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_falls_back_to_other_identification(pool: PgPool) {
        let id = insert_patient(&pool, &new_patient(None, Some("P1234567"), "Carla")).await.unwrap();
        let numeric = insert_patient(&pool, &new_patient(None, Some("7654321"), "Dora")).await.unwrap();

        let patient = domain::resolve_patient(&pool, "P1234567").await.unwrap().unwrap();
        assert_eq!(patient.id, id);

        // Parses as a run, finds no run, then matches the passport
        let patient = domain::resolve_patient(&pool, "7654321").await.unwrap().unwrap();
        assert_eq!(patient.id, numeric);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_unknown_token_resolves_to_none(pool: PgPool) {
        insert_patient(&pool, &new_patient(Some(11111111), None, "Ana")).await.unwrap();

        assert!(domain::resolve_patient(&pool, "22222222").await.unwrap().is_none());
        assert!(domain::resolve_patient(&pool, "X999").await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_lookup_patient_id(pool: PgPool) {
        let id = insert_patient(&pool, &new_patient(Some(11111111), Some("P1"), "Ana")).await.unwrap();

        let by_run = PatientLookup { run: Some("11111111".to_string()), other_id: None };
        assert_eq!(domain::lookup_patient_id(&pool, &by_run).await.unwrap(), Some(id));

        let by_other = PatientLookup { run: Some(String::new()), other_id: Some("P1".to_string()) };
        assert_eq!(domain::lookup_patient_id(&pool, &by_other).await.unwrap(), Some(id));

        let bad_run = PatientLookup { run: Some("11.111.111".to_string()), other_id: None };
        assert!(matches!(
            domain::lookup_patient_id(&pool, &bad_run).await,
            Err(DomainError::Validation(_))
        ));

        assert_eq!(domain::lookup_patient_id(&pool, &PatientLookup::default()).await.unwrap(), None);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_symptoms_persisted_as_bool(pool: PgPool) {
        let patient_id = insert_patient(&pool, &new_patient(Some(1), None, "Ana")).await.unwrap();

        for (wire, stored) in [(Some("Si"), true), (Some("No"), false), (Some("si"), false), (None, false)] {
            let id = insert_case(&pool, patient_id, wire).await;
            let case = find_suspect_case_by_id(&pool, id).await.unwrap().unwrap();
            assert_eq!(case.symptoms, Some(stored), "symptoms {:?}", wire);
            assert_eq!(case.reception_at, None);
            assert_eq!(case.validator_id, None);
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_phase_updates_do_not_overlap(pool: PgPool) {
        let patient_id = insert_patient(&pool, &new_patient(Some(1), None, "Ana")).await.unwrap();
        let case_id = insert_case(&pool, patient_id, Some("Si")).await;

        let reception = SampleReception {
            case_id,
            reception_at: Some(at("2020-10-28T18:00:00")),
            receptor_id: Some(4),
            laboratory_id: Some(3),
            updated_at: Some(at("2020-10-28T18:00:00")),
        };
        assert!(update_sample_reception(&pool, &reception).await.unwrap());

        let after_reception = find_suspect_case_by_id(&pool, case_id).await.unwrap().unwrap();
        assert_eq!(after_reception.receptor_id, Some(4));
        assert_eq!(after_reception.pcr_sars_cov_2.as_deref(), Some("pending"));
        assert_eq!(after_reception.validator_id, None);

        let outcome = CaseResult {
            case_id,
            pcr_sars_cov_2_at: Some(at("2020-10-29T10:30:22")),
            pcr_sars_cov_2: Some("negative".to_string()),
            validator_id: Some(9),
            updated_at: Some(at("2020-10-29T10:30:22")),
        };
        assert!(update_case_result(&pool, &outcome).await.unwrap());

        let after_result = find_suspect_case_by_id(&pool, case_id).await.unwrap().unwrap();
        assert_eq!(after_result.pcr_sars_cov_2.as_deref(), Some("negative"));
        assert_eq!(after_result.validator_id, Some(9));
        assert_eq!(after_result.reception_at, after_reception.reception_at);
        assert_eq!(after_result.receptor_id, Some(4));
        assert_eq!(after_result.laboratory_id, Some(3));
        assert_eq!(after_result.run_medic, after_reception.run_medic);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_update_of_missing_case_writes_nothing(pool: PgPool) {
        let patient_id = insert_patient(&pool, &new_patient(Some(1), None, "Ana")).await.unwrap();
        let case_id = insert_case(&pool, patient_id, None).await;
        let before = find_suspect_case_by_id(&pool, case_id).await.unwrap().unwrap();

        let reception = SampleReception {
            case_id: case_id + 1000,
            reception_at: Some(at("2020-10-28T18:00:00")),
            receptor_id: Some(4),
            laboratory_id: Some(3),
            updated_at: None,
        };
        assert!(!update_sample_reception(&pool, &reception).await.unwrap());

        let outcome = CaseResult {
            case_id: case_id + 1000,
            pcr_sars_cov_2_at: None,
            pcr_sars_cov_2: Some("positive".to_string()),
            validator_id: Some(9),
            updated_at: None,
        };
        assert!(!update_case_result(&pool, &outcome).await.unwrap());

        assert_eq!(find_suspect_case_by_id(&pool, case_id).await.unwrap().unwrap(), before);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_suspect_case_without_demographics(pool: PgPool) {
        let patient_id = insert_patient(&pool, &new_patient(Some(1), None, "Ana")).await.unwrap();
        let case_id = insert_case(&pool, patient_id, Some("Si")).await;

        match domain::case_with_patient(&pool, case_id).await {
            Err(DomainError::NotFound(msg)) => assert_eq!(msg, DEMOGRAPHIC_NOT_FOUND),
            other => panic!("Expected missing demographics, got {:?}", other),
        }

        match domain::case_with_patient(&pool, case_id + 1000).await {
            Err(DomainError::NotFound(msg)) => assert_eq!(msg, "No existe el caso"),
            other => panic!("Expected missing case, got {:?}", other),
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_created_case_round_trips(pool: PgPool) {
        let patient_id = insert_patient(&pool, &new_patient(Some(11111111), None, "Ana")).await.unwrap();
        insert_demographic(&pool, &new_demographic(patient_id)).await.unwrap();
        let request = creation_request(patient_id, Some("Si"));
        let case_id = insert_case(&pool, patient_id, Some("Si")).await;

        let listed = domain::cases_for_patient(&pool, "11111111").await.unwrap();
        assert_eq!(listed.len(), 1);
        let listed = &listed[0];
        assert_eq!(listed.id, Some(case_id));
        assert_eq!(listed.symptoms.as_deref(), Some("Si"));
        assert_eq!(listed.sample_at, request.sample_at);
        assert_eq!(listed.symptoms_at, request.symptoms_at);
        assert_eq!(listed.observation, request.observation);
        assert_eq!(listed.pscr_sars_cov_2, request.pscr_sars_cov_2);

        let composite = domain::case_with_patient(&pool, case_id).await.unwrap();
        assert_eq!(composite.caso.id, Some(case_id));
        assert_eq!(composite.caso.symptoms.as_deref(), Some("Si"));
        assert_eq!(composite.caso.run_medic, request.run_medic);
        assert_eq!(composite.caso.age, None);
        assert_eq!(composite.paciente.id, patient_id);
        assert_eq!(composite.demografico.patient_id, patient_id);
        assert_eq!(composite.demografico.latitude, Some(dec!(-20.2140657)));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_user_and_commune_lookups(pool: PgPool) {
        sqlx::query("INSERT INTO users (run, dv, name, email, password) VALUES (12345678, '9', 'Lab User', 'lab@example.cl', 'secret')")
            .execute(&pool)
            .await
            .unwrap();
        sqlx::query("INSERT INTO communes (name, code_deis, region_id) VALUES ('Iquique', '1101', 1)")
            .execute(&pool)
            .await
            .unwrap();

        let user = find_user_by_run(&pool, 12345678).await.unwrap().unwrap();
        assert_eq!(user.name, "Lab User");
        assert!(find_user_by_run(&pool, 1).await.unwrap().is_none());

        let commune = find_commune_by_code_deis(&pool, "1101").await.unwrap().unwrap();
        assert_eq!(commune.name, "Iquique");
        assert!(find_commune_by_code_deis(&pool, "2101").await.unwrap().is_none());
    }
}
