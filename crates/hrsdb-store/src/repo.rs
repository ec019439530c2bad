//! SQLite repository
//!
//! Row-level persistence for health record entities. Timestamps are stored
//! as epoch seconds; the canonical text form is a serialization concern.

use chrono::NaiveDateTime;
use hrsdb_core::model::{Biometric, BiometricType, Ecg, EcgData, Gender, Patient, PayloadRef};
use rusqlite::{Connection, OptionalExtension};

use crate::errors::{from_rusqlite, Result};

fn to_epoch(datetime: &NaiveDateTime) -> i64 {
    datetime.and_utc().timestamp()
}

fn from_epoch(seconds: i64) -> NaiveDateTime {
    chrono::DateTime::from_timestamp(seconds, 0)
        .unwrap_or_else(chrono::Utc::now)
        .naive_utc()
}

/// SQLite repository for health record entities
pub struct SqliteRepo;

impl SqliteRepo {
    /// Insert a patient and return the generated id
    pub fn insert_patient(
        conn: &Connection,
        first_name: &str,
        last_name: &str,
        gender: Gender,
        date_of_birth: &NaiveDateTime,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO patients (first_name, last_name, gender, date_of_birth)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                first_name,
                last_name,
                gender.as_i64(),
                to_epoch(date_of_birth),
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a patient by id
    pub fn get_patient(conn: &Connection, patient_id: i64) -> Result<Option<Patient>> {
        conn.query_row(
            "SELECT id, first_name, last_name, gender, date_of_birth
             FROM patients WHERE id = ?1",
            [patient_id],
            Self::patient_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List all patients
    pub fn list_patients(conn: &Connection) -> Result<Vec<Patient>> {
        let mut stmt = conn
            .prepare(
                "SELECT id, first_name, last_name, gender, date_of_birth
                 FROM patients ORDER BY id",
            )
            .map_err(from_rusqlite)?;

        let patients = stmt
            .query_map([], Self::patient_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(patients)
    }

    fn patient_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Patient> {
        let gender_raw: i64 = row.get(3)?;
        let dob: i64 = row.get(4)?;
        Ok(Patient {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            // Stored values come from Gender::as_i64; anything else falls
            // back rather than poisoning the whole row read
            gender: Gender::from_i64(gender_raw).unwrap_or(Gender::Male),
            date_of_birth: from_epoch(dob),
        })
    }

    /// Get a biometric type by id
    pub fn get_biometric_type(conn: &Connection, type_id: i64) -> Result<Option<BiometricType>> {
        conn.query_row(
            "SELECT id, name, units FROM biometric_types WHERE id = ?1",
            [type_id],
            |row| {
                Ok(BiometricType {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    units: row.get(2)?,
                })
            },
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List all biometric types
    pub fn list_biometric_types(conn: &Connection) -> Result<Vec<BiometricType>> {
        let mut stmt = conn
            .prepare("SELECT id, name, units FROM biometric_types ORDER BY id")
            .map_err(from_rusqlite)?;

        let types = stmt
            .query_map([], |row| {
                Ok(BiometricType {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    units: row.get(2)?,
                })
            })
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(types)
    }

    /// Insert a biometric reading and return the generated id
    pub fn insert_biometric(
        conn: &Connection,
        patient_id: i64,
        type_id: i64,
        value: &str,
        timestamp: &NaiveDateTime,
    ) -> Result<i64> {
        conn.execute(
            "INSERT INTO biometrics (patient_id, type_id, value, timestamp)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![patient_id, type_id, value, to_epoch(timestamp)],
        )
        .map_err(from_rusqlite)?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a biometric reading by id
    pub fn get_biometric(conn: &Connection, biometric_id: i64) -> Result<Option<Biometric>> {
        conn.query_row(
            "SELECT id, patient_id, type_id, value, timestamp
             FROM biometrics WHERE id = ?1",
            [biometric_id],
            Self::biometric_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List biometric readings for a patient, optionally restricted to a type
    pub fn list_biometrics(
        conn: &Connection,
        patient_id: i64,
        type_id: Option<i64>,
    ) -> Result<Vec<Biometric>> {
        let sql_all = "SELECT id, patient_id, type_id, value, timestamp
             FROM biometrics WHERE patient_id = ?1 ORDER BY timestamp";
        let sql_typed = "SELECT id, patient_id, type_id, value, timestamp
             FROM biometrics WHERE patient_id = ?1 AND type_id = ?2 ORDER BY timestamp";

        let mut stmt = conn
            .prepare(if type_id.is_some() { sql_typed } else { sql_all })
            .map_err(from_rusqlite)?;

        let rows = match type_id {
            Some(type_id) => stmt
                .query_map([patient_id, type_id], Self::biometric_from_row)
                .map_err(from_rusqlite)?
                .collect::<std::result::Result<Vec<_>, _>>(),
            None => stmt
                .query_map([patient_id], Self::biometric_from_row)
                .map_err(from_rusqlite)?
                .collect::<std::result::Result<Vec<_>, _>>(),
        }
        .map_err(from_rusqlite)?;

        Ok(rows)
    }

    fn biometric_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Biometric> {
        let timestamp: i64 = row.get(4)?;
        Ok(Biometric {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            type_id: row.get(2)?,
            value: row.get(3)?,
            timestamp: from_epoch(timestamp),
        })
    }

    /// Insert a payload file reference
    ///
    /// The caller has already written the file; the row and the file are
    /// created and destroyed together.
    pub fn insert_ecg_data(conn: &Connection, path: &str) -> Result<EcgData> {
        conn.execute(
            "INSERT INTO ecg_data (path) VALUES (?1)",
            rusqlite::params![path],
        )
        .map_err(from_rusqlite)?;

        Ok(EcgData {
            id: conn.last_insert_rowid(),
            path: path.to_string(),
        })
    }

    /// Insert an ECG row referencing an already-persisted payload
    pub fn insert_ecg(
        conn: &Connection,
        patient_id: i64,
        sampling_freq: f64,
        timestamp: &NaiveDateTime,
        sample_count: i64,
        payload: &PayloadRef,
    ) -> Result<i64> {
        let (data_id, blob) = match payload {
            PayloadRef::File { data_id, .. } => (Some(*data_id), None),
            PayloadRef::Inline { bytes } => (None, Some(bytes.as_slice())),
        };

        conn.execute(
            "INSERT INTO ecgs (patient_id, sampling_freq, timestamp, sample_count, data_id, payload_blob)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                patient_id,
                sampling_freq,
                to_epoch(timestamp),
                sample_count,
                data_id,
                blob,
            ],
        )
        .map_err(from_rusqlite)?;

        Ok(conn.last_insert_rowid())
    }

    /// Get an ECG by id
    pub fn get_ecg(conn: &Connection, ecg_id: i64) -> Result<Option<Ecg>> {
        conn.query_row(
            "SELECT e.id, e.patient_id, e.sampling_freq, e.timestamp, e.sample_count,
                    e.data_id, d.path, e.payload_blob
             FROM ecgs e LEFT JOIN ecg_data d ON d.id = e.data_id
             WHERE e.id = ?1",
            [ecg_id],
            Self::ecg_from_row,
        )
        .optional()
        .map_err(from_rusqlite)
    }

    /// List ECGs for a patient
    pub fn list_ecgs(conn: &Connection, patient_id: i64) -> Result<Vec<Ecg>> {
        let mut stmt = conn
            .prepare(
                "SELECT e.id, e.patient_id, e.sampling_freq, e.timestamp, e.sample_count,
                        e.data_id, d.path, e.payload_blob
                 FROM ecgs e LEFT JOIN ecg_data d ON d.id = e.data_id
                 WHERE e.patient_id = ?1 ORDER BY e.timestamp",
            )
            .map_err(from_rusqlite)?;

        let ecgs = stmt
            .query_map([patient_id], Self::ecg_from_row)
            .map_err(from_rusqlite)?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(from_rusqlite)?;

        Ok(ecgs)
    }

    fn ecg_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Ecg> {
        let timestamp: i64 = row.get(3)?;
        let data_id: Option<i64> = row.get(5)?;
        let path: Option<String> = row.get(6)?;
        let blob: Option<Vec<u8>> = row.get(7)?;

        // The schema CHECK guarantees exactly one payload column is set
        let payload = match data_id {
            Some(data_id) => PayloadRef::File {
                data_id,
                path: path.unwrap_or_default(),
            },
            None => PayloadRef::Inline {
                bytes: blob.unwrap_or_default(),
            },
        };

        Ok(Ecg {
            id: row.get(0)?,
            patient_id: row.get(1)?,
            sampling_freq: row.get(2)?,
            timestamp: from_epoch(timestamp),
            sample_count: row.get(4)?,
            payload,
        })
    }
}
