use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Biometric reference type
///
/// A small, mostly static reference table. `name` is unique across all rows;
/// seeding skips names already present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BiometricType {
    /// Generated unique identifier
    pub id: i64,

    /// Type name, unique (e.g. "blood_pressure")
    pub name: String,

    /// Measurement units for readings of this type (e.g. "mmHg")
    pub units: String,
}

/// A discrete biometric reading for a single patient
///
/// A biometric cannot be created if its `type_id` does not resolve to an
/// existing [`BiometricType`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Biometric {
    /// Generated unique identifier
    pub id: i64,

    /// Patient the reading belongs to
    pub patient_id: i64,

    /// Type of biometric reading
    pub type_id: i64,

    /// The reading, stored as opaque text
    pub value: String,

    /// When the reading was taken
    pub timestamp: NaiveDateTime,
}
