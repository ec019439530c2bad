//! Error helpers for hrsdb-store
//!
//! Wraps hrsdb-core HrsError with store-specific constructors

use hrsdb_core::errors::HrsError;

/// Result type alias using HrsError
pub type Result<T> = hrsdb_core::errors::Result<T>;

/// Create a storage error from rusqlite::Error
pub fn from_rusqlite(err: rusqlite::Error) -> HrsError {
    HrsError::Storage {
        op: "sqlite".to_string(),
        message: err.to_string(),
    }
}

/// Create a storage error with an explicit operation tag
pub fn storage_error(op: impl Into<String>, message: impl Into<String>) -> HrsError {
    HrsError::Storage {
        op: op.into(),
        message: message.into(),
    }
}

/// Create an IO error
pub fn io_error(op: impl Into<String>, err: std::io::Error) -> HrsError {
    HrsError::Io {
        op: op.into(),
        message: err.to_string(),
    }
}

/// Create a payload-unavailable error for an existing ECG row
pub fn payload_unavailable(ecg_id: i64, reason: impl Into<String>) -> HrsError {
    HrsError::PayloadUnavailable {
        ecg_id,
        reason: reason.into(),
    }
}
