use thiserror::Error;

/// Result type alias using HrsError
pub type Result<T> = std::result::Result<T, HrsError>;

/// Error taxonomy for health record operations
///
/// The expected kinds (`NotFound`, `PatientNotFound`, `TypeNotFound`,
/// `PayloadUnavailable`, `Validation`) are returned to callers as typed
/// results. `Storage` and `Io` abort the active unit of work and propagate
/// without retries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum HrsError {
    /// A record id did not resolve to a row
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// Patient foreign-key precondition failed at creation time
    #[error("Patient not found: {patient_id}")]
    PatientNotFound { patient_id: i64 },

    /// Biometric type foreign-key precondition failed at creation time
    #[error("Biometric type not found: {type_id}")]
    TypeNotFound { type_id: i64 },

    /// The ECG row exists but its sample payload is missing or undecodable
    #[error("Payload unavailable for ECG {ecg_id}: {reason}")]
    PayloadUnavailable { ecg_id: i64, reason: String },

    /// Malformed input rejected before any write was attempted
    #[error("Validation failure: {reason}")]
    Validation { reason: String },

    /// Unexpected backing-store failure
    #[error("Storage failure in '{op}': {message}")]
    Storage { op: String, message: String },

    /// Filesystem failure in the payload store
    #[error("I/O failure in '{op}': {message}")]
    Io { op: String, message: String },
}

impl HrsError {
    /// Get the stable error code for this error
    pub fn code(&self) -> &'static str {
        match self {
            HrsError::NotFound { .. } => "ERR_NOT_FOUND",
            HrsError::PatientNotFound { .. } => "ERR_PATIENT_NOT_FOUND",
            HrsError::TypeNotFound { .. } => "ERR_TYPE_NOT_FOUND",
            HrsError::PayloadUnavailable { .. } => "ERR_PAYLOAD_UNAVAILABLE",
            HrsError::Validation { .. } => "ERR_VALIDATION",
            HrsError::Storage { .. } => "ERR_STORAGE",
            HrsError::Io { .. } => "ERR_IO",
        }
    }
}
