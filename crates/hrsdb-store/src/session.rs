//! Unit-of-work transaction boundary
//!
//! A unit of work is the sole transaction boundary: callers never commit or
//! roll back directly. The handle is only obtainable through
//! [`StorageEngine::unit_of_work`](crate::engine::StorageEngine::unit_of_work),
//! which commits on success and rolls back on failure or panic, releasing
//! the connection on every exit path.

use chrono::NaiveDateTime;
use hrsdb_core::errors::{HrsError, Result};
use hrsdb_core::model::{Biometric, BiometricType, Ecg, Gender, Patient};
use rusqlite::{Connection, Transaction};

use crate::errors::from_rusqlite;
use crate::ops::PatientOps;
use crate::payload::PayloadStore;
use crate::repo::SqliteRepo;

/// Handle for queries and staged writes inside one transaction
pub struct UnitOfWork<'a> {
    tx: Transaction<'a>,
    payloads: &'a dyn PayloadStore,
}

impl<'a> UnitOfWork<'a> {
    pub(crate) fn new(tx: Transaction<'a>, payloads: &'a dyn PayloadStore) -> Self {
        Self { tx, payloads }
    }

    pub(crate) fn conn(&self) -> &Connection {
        &self.tx
    }

    pub(crate) fn payloads(&self) -> &dyn PayloadStore {
        self.payloads
    }

    pub(crate) fn commit(self) -> Result<()> {
        self.tx.commit().map_err(from_rusqlite)
    }

    /// Create a patient record and return the generated id
    pub fn create_patient(
        &self,
        first_name: &str,
        last_name: &str,
        gender: Gender,
        date_of_birth: NaiveDateTime,
    ) -> Result<i64> {
        SqliteRepo::insert_patient(self.conn(), first_name, last_name, gender, &date_of_birth)
    }

    /// Get a patient by id
    ///
    /// # Errors
    /// * `NotFound` - If no patient row has the id
    pub fn patient(&self, id: i64) -> Result<Patient> {
        SqliteRepo::get_patient(self.conn(), id)?.ok_or(HrsError::NotFound {
            entity: "patient",
            id,
        })
    }

    /// List all patients
    pub fn patients(&self) -> Result<Vec<Patient>> {
        SqliteRepo::list_patients(self.conn())
    }

    /// List all biometric types
    pub fn biometric_types(&self) -> Result<Vec<BiometricType>> {
        SqliteRepo::list_biometric_types(self.conn())
    }

    /// Create a biometric reading and return the generated id
    ///
    /// # Errors
    /// * `PatientNotFound` - If `patient_id` does not resolve
    /// * `TypeNotFound` - If `type_id` does not resolve
    pub fn create_biometric(
        &self,
        patient_id: i64,
        type_id: i64,
        value: &str,
        timestamp: NaiveDateTime,
    ) -> Result<i64> {
        let patient = SqliteRepo::get_patient(self.conn(), patient_id)?
            .ok_or(HrsError::PatientNotFound { patient_id })?;
        let biometric = patient.add_biometric(self, type_id, value, timestamp)?;
        Ok(biometric.id)
    }

    /// Get a biometric reading by id
    ///
    /// # Errors
    /// * `NotFound` - If no biometric row has the id
    pub fn biometric(&self, id: i64) -> Result<Biometric> {
        SqliteRepo::get_biometric(self.conn(), id)?.ok_or(HrsError::NotFound {
            entity: "biometric",
            id,
        })
    }

    /// List biometric readings for a patient, optionally restricted to a type
    pub fn biometrics(&self, patient_id: i64, type_id: Option<i64>) -> Result<Vec<Biometric>> {
        SqliteRepo::list_biometrics(self.conn(), patient_id, type_id)
    }

    /// Create an ECG recording and return the generated id
    ///
    /// The sample payload is persisted through the configured payload store
    /// before the row is created.
    ///
    /// # Errors
    /// * `PatientNotFound` - If `patient_id` does not resolve
    /// * `Validation` - If `sampling_freq` is not positive
    pub fn create_ecg(
        &self,
        patient_id: i64,
        sampling_freq: f64,
        timestamp: NaiveDateTime,
        samples: &[f64],
    ) -> Result<i64> {
        let patient = SqliteRepo::get_patient(self.conn(), patient_id)?
            .ok_or(HrsError::PatientNotFound { patient_id })?;
        let ecg = patient.add_ecg(self, sampling_freq, timestamp, samples)?;
        Ok(ecg.id)
    }

    /// Get an ECG by id
    ///
    /// # Errors
    /// * `NotFound` - If no ECG row has the id
    pub fn ecg(&self, id: i64) -> Result<Ecg> {
        SqliteRepo::get_ecg(self.conn(), id)?.ok_or(HrsError::NotFound { entity: "ecg", id })
    }

    /// List ECGs for a patient
    pub fn ecgs(&self, patient_id: i64) -> Result<Vec<Ecg>> {
        SqliteRepo::list_ecgs(self.conn(), patient_id)
    }

    /// Load the sample payload of an ECG
    ///
    /// # Errors
    /// * `NotFound` - If no ECG row has the id
    /// * `PayloadUnavailable` - If the row exists but its payload is missing
    ///   or undecodable
    pub fn ecg_payload(&self, id: i64) -> Result<Vec<f64>> {
        let ecg = self.ecg(id)?;
        self.payloads.read(ecg.id, &ecg.payload)
    }
}
