// Integration tests for engine startup and reinitialization: opening an
// already-initialized store is safe, seeding stays idempotent across
// reopens, and re-pointing the engine swaps the backing store cleanly.

use hrsdb_core::config::{Config, PayloadBackend};
use hrsdb_core::dates;
use hrsdb_core::model::Gender;
use hrsdb_store::seed::BIOMETRIC_TYPES;
use hrsdb_store::StorageEngine;
use tempfile::TempDir;

fn disk_config(dir: &TempDir, file: &str) -> Config {
    Config {
        database_path: dir.path().join(file),
        upload_root: dir.path().join("uploads"),
        payload_backend: PayloadBackend::Inline,
    }
}

#[test]
fn test_reopen_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let config = disk_config(&dir, "hrs_test.db");

    let dob = dates::parse("1997/04/12 00:00:00").unwrap();
    let id = {
        let engine = StorageEngine::open(&config).unwrap();
        engine
            .unit_of_work(|uow| uow.create_patient("Bob", "Smith", Gender::Male, dob))
            .unwrap()
    };

    // Second open runs migrations and seeding again against live data
    let engine = StorageEngine::open(&config).unwrap();
    let patient = engine.unit_of_work(|uow| uow.patient(id)).unwrap();
    assert_eq!(patient.last_name, "Smith");

    let types = engine.unit_of_work(|uow| uow.biometric_types()).unwrap();
    assert_eq!(types.len(), BIOMETRIC_TYPES.len(), "no duplicate seed rows");
}

#[test]
fn test_reinit_re_points_the_engine() {
    let dir = TempDir::new().unwrap();
    let config_a = disk_config(&dir, "hrs_a.db");
    let config_b = disk_config(&dir, "hrs_b.db");

    let engine = StorageEngine::open(&config_a).unwrap();
    let dob = dates::parse("1997/04/12 00:00:00").unwrap();
    engine
        .unit_of_work(|uow| uow.create_patient("Bob", "Smith", Gender::Male, dob))
        .unwrap();

    // Point the engine at a fresh store
    engine.reinit(&config_b).unwrap();
    let patients = engine.unit_of_work(|uow| uow.patients()).unwrap();
    assert!(patients.is_empty());

    // And back again: the original rows are still there
    engine.reinit(&config_a).unwrap();
    let patients = engine.unit_of_work(|uow| uow.patients()).unwrap();
    assert_eq!(patients.len(), 1);
}

#[test]
fn test_independent_engines_do_not_share_state() {
    let dir = TempDir::new().unwrap();
    let engine_a = StorageEngine::open(&disk_config(&dir, "hrs_a.db")).unwrap();
    let engine_b = StorageEngine::open(&disk_config(&dir, "hrs_b.db")).unwrap();

    let dob = dates::parse("1990/01/01 00:00:00").unwrap();
    engine_a
        .unit_of_work(|uow| uow.create_patient("Ada", "Jones", Gender::Female, dob))
        .unwrap();

    assert_eq!(
        engine_a.unit_of_work(|uow| Ok(uow.patients()?.len())).unwrap(),
        1
    );
    assert_eq!(
        engine_b.unit_of_work(|uow| Ok(uow.patients()?.len())).unwrap(),
        0
    );
}

#[test]
fn test_concurrent_units_of_work_on_independent_connections() {
    let dir = TempDir::new().unwrap();
    let engine = std::sync::Arc::new(StorageEngine::open(&disk_config(&dir, "hrs.db")).unwrap());
    let dob = dates::parse("1990/01/01 00:00:00").unwrap();

    let workers: Vec<_> = (0..4)
        .map(|i| {
            let engine = engine.clone();
            std::thread::spawn(move || {
                engine
                    .unit_of_work(|uow| {
                        uow.create_patient(&format!("Worker{}", i), "Smith", Gender::Male, dob)
                    })
                    .unwrap()
            })
        })
        .collect();

    for worker in workers {
        worker.join().unwrap();
    }

    let patients = engine.unit_of_work(|uow| uow.patients()).unwrap();
    assert_eq!(patients.len(), 4);
}
