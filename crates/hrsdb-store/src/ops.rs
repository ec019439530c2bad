//! Entity-level create operations
//!
//! Cross-entity creation invariants live with the patient record: a reading
//! cannot exist without its type, and an ECG row cannot exist without its
//! persisted payload.

use chrono::NaiveDateTime;
use hrsdb_core::errors::{HrsError, Result};
use hrsdb_core::model::{Biometric, Ecg, Patient, PayloadRef};

use crate::payload::StagedPayload;
use crate::repo::SqliteRepo;
use crate::session::UnitOfWork;

/// Create operations owned by a patient record
pub trait PatientOps {
    /// Stage a new biometric reading for this patient
    ///
    /// # Errors
    /// * `TypeNotFound` - If `type_id` does not resolve to a biometric type
    fn add_biometric(
        &self,
        uow: &UnitOfWork<'_>,
        type_id: i64,
        value: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Biometric>;

    /// Stage a new ECG recording for this patient
    ///
    /// The payload is handed to the configured payload store before the row
    /// is created, so a row never references a payload that was not
    /// persisted.
    ///
    /// # Errors
    /// * `Validation` - If `sampling_freq` is not positive
    fn add_ecg(
        &self,
        uow: &UnitOfWork<'_>,
        sampling_freq: f64,
        timestamp: NaiveDateTime,
        samples: &[f64],
    ) -> Result<Ecg>;
}

impl PatientOps for Patient {
    fn add_biometric(
        &self,
        uow: &UnitOfWork<'_>,
        type_id: i64,
        value: &str,
        timestamp: NaiveDateTime,
    ) -> Result<Biometric> {
        // The type must resolve before any write is attempted
        SqliteRepo::get_biometric_type(uow.conn(), type_id)?
            .ok_or(HrsError::TypeNotFound { type_id })?;

        let id = SqliteRepo::insert_biometric(uow.conn(), self.id, type_id, value, &timestamp)?;

        Ok(Biometric {
            id,
            patient_id: self.id,
            type_id,
            value: value.to_string(),
            timestamp,
        })
    }

    fn add_ecg(
        &self,
        uow: &UnitOfWork<'_>,
        sampling_freq: f64,
        timestamp: NaiveDateTime,
        samples: &[f64],
    ) -> Result<Ecg> {
        if !sampling_freq.is_finite() || sampling_freq <= 0.0 {
            return Err(HrsError::Validation {
                reason: format!("sampling_freq must be positive, got {}", sampling_freq),
            });
        }

        // Payload hits its store before the row exists; a failed commit can
        // orphan a file but never the reverse
        let write = uow.payloads().write(samples)?;
        let payload = match write.staged {
            StagedPayload::File { path } => {
                let data = SqliteRepo::insert_ecg_data(uow.conn(), &path)?;
                PayloadRef::File {
                    data_id: data.id,
                    path: data.path,
                }
            }
            StagedPayload::Inline { bytes } => PayloadRef::Inline { bytes },
        };

        let id = SqliteRepo::insert_ecg(
            uow.conn(),
            self.id,
            sampling_freq,
            &timestamp,
            write.sample_count,
            &payload,
        )?;

        Ok(Ecg {
            id,
            patient_id: self.id,
            sampling_freq,
            timestamp,
            sample_count: write.sample_count,
            payload,
        })
    }
}
