use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Reference from an ECG row to its sample payload
///
/// The two variants correspond to the two payload storage strategies: a file
/// under the upload root referenced through an [`EcgData`] row, or an
/// encoded blob held inline in the ECG row itself. A given deployment writes
/// one kind only; rows of the other kind read as payload-unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PayloadRef {
    /// Payload lives in a file referenced by an `ecg_data` row
    File { data_id: i64, path: String },
    /// Payload is encoded directly in the ECG row
    Inline { bytes: Vec<u8> },
}

/// Electrocardiogram recording
///
/// `sample_count` always equals the length of the stored payload, and the
/// payload is retrievable given only the ECG id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ecg {
    /// Generated unique identifier
    pub id: i64,

    /// Patient the recording belongs to
    pub patient_id: i64,

    /// Sampling frequency in Hz (positive)
    pub sampling_freq: f64,

    /// When the recording was taken
    pub timestamp: NaiveDateTime,

    /// Number of samples in the payload
    pub sample_count: i64,

    /// Reference to the sample payload
    pub payload: PayloadRef,
}

/// File reference row for the file-backed payload strategy
///
/// `path` is relative to the configured upload root. At most one ECG row
/// refers to a given `EcgData` row, and the referenced file exists on disk
/// whenever the row does: the file is written strictly before the row is
/// created, inside the same unit of work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcgData {
    /// Generated unique identifier
    pub id: i64,

    /// Path of the payload file, relative to the upload root
    pub path: String,
}
