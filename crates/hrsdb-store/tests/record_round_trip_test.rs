// Integration tests for record round-trips through the storage engine:
// create then get returns a record equal in every field, with dates
// round-tripping through the canonical format.

use hrsdb_core::config::{Config, PayloadBackend};
use hrsdb_core::dates;
use hrsdb_core::model::Gender;
use hrsdb_core::record::ToRecord;
use hrsdb_store::StorageEngine;

fn setup_test_engine() -> StorageEngine {
    let config = Config {
        payload_backend: PayloadBackend::Inline,
        ..Config::default()
    };
    StorageEngine::open_in_memory(&config).unwrap()
}

#[test]
fn test_patient_create_then_get_is_equal() {
    let engine = setup_test_engine();
    let dob = dates::parse("1997/04/12 00:00:00").unwrap();

    let id = engine
        .unit_of_work(|uow| uow.create_patient("Bob", "Smith", Gender::Male, dob))
        .unwrap();
    assert_eq!(id, 1);

    let patient = engine.unit_of_work(|uow| uow.patient(id)).unwrap();
    assert_eq!(patient.id, 1);
    assert_eq!(patient.first_name, "Bob");
    assert_eq!(patient.last_name, "Smith");
    assert_eq!(patient.gender, Gender::Male);
    assert_eq!(patient.date_of_birth, dob);

    // Date of birth round-trips through the canonical format with no loss
    let record = patient.to_record();
    let rendered = record.get("date_of_birth").unwrap().as_str().unwrap();
    assert_eq!(dates::parse(rendered).unwrap(), dob);
    assert_eq!(record.get("gender").unwrap().as_i64(), Some(0));
}

#[test]
fn test_patient_list_returns_all() {
    let engine = setup_test_engine();
    let dob = dates::parse("1980/05/06 00:00:00").unwrap();

    engine
        .unit_of_work(|uow| {
            uow.create_patient("Bob", "Smith", Gender::Male, dob)?;
            uow.create_patient("Ada", "Jones", Gender::Female, dob)?;
            Ok(())
        })
        .unwrap();

    let patients = engine.unit_of_work(|uow| uow.patients()).unwrap();
    assert_eq!(patients.len(), 2);
    assert_eq!(patients[0].first_name, "Bob");
    assert_eq!(patients[1].first_name, "Ada");
}

#[test]
fn test_get_missing_patient_is_not_found() {
    let engine = setup_test_engine();
    let err = engine.unit_of_work(|uow| uow.patient(99)).unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");
}

#[test]
fn test_biometric_types_are_seeded() {
    let engine = setup_test_engine();
    let types = engine.unit_of_work(|uow| uow.biometric_types()).unwrap();

    let names: Vec<&str> = types.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, ["height", "weight", "blood_pressure", "ecg"]);

    let height = &types[0];
    assert_eq!(height.units, "cm");
}

#[test]
fn test_biometric_list_filters_by_type() {
    let engine = setup_test_engine();
    let dob = dates::parse("1975/11/30 00:00:00").unwrap();
    let ts_one = dates::parse("2020/06/01 09:00:00").unwrap();
    let ts_two = dates::parse("2020/06/01 10:00:00").unwrap();

    let (patient_id, height_type, weight_type) = engine
        .unit_of_work(|uow| {
            let patient_id = uow.create_patient("Eve", "Gray", Gender::Female, dob)?;
            let types = uow.biometric_types()?;
            let height = types.iter().find(|t| t.name == "height").unwrap().id;
            let weight = types.iter().find(|t| t.name == "weight").unwrap().id;
            uow.create_biometric(patient_id, height, "172", ts_one)?;
            uow.create_biometric(patient_id, weight, "64", ts_two)?;
            Ok((patient_id, height, weight))
        })
        .unwrap();

    let all = engine
        .unit_of_work(|uow| uow.biometrics(patient_id, None))
        .unwrap();
    assert_eq!(all.len(), 2);

    let heights = engine
        .unit_of_work(|uow| uow.biometrics(patient_id, Some(height_type)))
        .unwrap();
    assert_eq!(heights.len(), 1);
    assert_eq!(heights[0].value, "172");
    assert_eq!(heights[0].timestamp, ts_one);

    let weights = engine
        .unit_of_work(|uow| uow.biometrics(patient_id, Some(weight_type)))
        .unwrap();
    assert_eq!(weights.len(), 1);
    assert_eq!(weights[0].value, "64");
}

#[test]
fn test_biometric_get_by_id() {
    let engine = setup_test_engine();
    let dob = dates::parse("1975/11/30 00:00:00").unwrap();
    let ts = dates::parse("2021/01/01 08:00:00").unwrap();

    let biometric_id = engine
        .unit_of_work(|uow| {
            let patient_id = uow.create_patient("Eve", "Gray", Gender::Female, dob)?;
            uow.create_biometric(patient_id, 1, "172", ts)
        })
        .unwrap();

    let biometric = engine
        .unit_of_work(|uow| uow.biometric(biometric_id))
        .unwrap();
    assert_eq!(biometric.value, "172");
    assert_eq!(biometric.timestamp, ts);

    let err = engine.unit_of_work(|uow| uow.biometric(999)).unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");
}

#[test]
fn test_serialized_patient_uses_canonical_dates() {
    let engine = setup_test_engine();
    let dob = dates::parse("1997/04/12 00:00:00").unwrap();

    let patient = engine
        .unit_of_work(|uow| {
            let id = uow.create_patient("Bob", "Smith", Gender::Male, dob)?;
            uow.patient(id)
        })
        .unwrap();

    let json = serde_json::to_string(&patient.to_record()).unwrap();
    assert_eq!(
        json,
        r#"{"id":1,"first_name":"Bob","last_name":"Smith","gender":0,"date_of_birth":"1997/04/12 00:00:00"}"#
    );
}
