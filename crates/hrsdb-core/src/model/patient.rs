use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{HrsError, Result};

/// Patient gender, stored as an integer column: Male(0) Female(1)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    /// Integer representation used by the backing store
    pub fn as_i64(self) -> i64 {
        match self {
            Gender::Male => 0,
            Gender::Female => 1,
        }
    }

    /// Convert from the stored integer representation
    ///
    /// # Errors
    /// * `Validation` - If the value is not 0 or 1
    pub fn from_i64(value: i64) -> Result<Self> {
        match value {
            0 => Ok(Gender::Male),
            1 => Ok(Gender::Female),
            other => Err(HrsError::Validation {
                reason: format!("gender must be 0 (male) or 1 (female), got {}", other),
            }),
        }
    }
}

/// Patient demographic record
///
/// General information on patients that can be used to filter queries when
/// searching for a particular patient. Fields are immutable after creation;
/// a patient owns zero or more biometric and ECG records by foreign
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    /// Generated unique identifier
    pub id: i64,

    /// First name of the patient
    pub first_name: String,

    /// Last name of the patient (indexed)
    pub last_name: String,

    /// Gender of the patient
    pub gender: Gender,

    /// Date of birth of the patient
    pub date_of_birth: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gender_integer_mapping() {
        assert_eq!(Gender::Male.as_i64(), 0);
        assert_eq!(Gender::Female.as_i64(), 1);
        assert_eq!(Gender::from_i64(0).unwrap(), Gender::Male);
        assert_eq!(Gender::from_i64(1).unwrap(), Gender::Female);
    }

    #[test]
    fn test_gender_rejects_out_of_range() {
        let err = Gender::from_i64(2).unwrap_err();
        assert_eq!(err.code(), "ERR_VALIDATION");
        assert!(Gender::from_i64(-1).is_err());
    }
}
