//! Record serializer
//!
//! Converts an entity into an ordered field-name/value mapping with
//! normalized scalar representations. This mapping is the sole contract
//! surfaced to any serialization layer; it never exposes storage-engine
//! internals.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::dates;
use crate::model::{Biometric, BiometricType, Ecg, Patient};

/// Ordered mapping of field name to normalized scalar value
///
/// Field order is insertion order and is preserved through serialization.
/// Datetimes are rendered through [`dates::format`]; other scalars pass
/// through unchanged.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    fields: Vec<(&'static str, Value)>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Append a field, preserving insertion order
    pub fn field(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.fields.push((name, value.into()));
        self
    }

    /// Look up a field value by name
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| value)
    }

    /// Iterate fields in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.fields.iter().map(|(name, value)| (*name, value))
    }

    /// Number of fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True when the record has no fields
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Conversion of an entity into its serialized [`Record`] form
pub trait ToRecord {
    /// Convert this entity into an ordered field mapping
    fn to_record(&self) -> Record;
}

impl ToRecord for Patient {
    fn to_record(&self) -> Record {
        Record::new()
            .field("id", self.id)
            .field("first_name", self.first_name.as_str())
            .field("last_name", self.last_name.as_str())
            .field("gender", self.gender.as_i64())
            .field("date_of_birth", dates::format(&self.date_of_birth))
    }
}

impl ToRecord for BiometricType {
    fn to_record(&self) -> Record {
        Record::new()
            .field("id", self.id)
            .field("name", self.name.as_str())
            .field("units", self.units.as_str())
    }
}

impl ToRecord for Biometric {
    fn to_record(&self) -> Record {
        Record::new()
            .field("id", self.id)
            .field("patient_id", self.patient_id)
            .field("type_id", self.type_id)
            .field("value", self.value.as_str())
            .field("timestamp", dates::format(&self.timestamp))
    }
}

impl ToRecord for Ecg {
    fn to_record(&self) -> Record {
        // The payload reference is a storage concern and is not exposed
        Record::new()
            .field("id", self.id)
            .field("patient_id", self.patient_id)
            .field("sampling_freq", self.sampling_freq)
            .field("timestamp", dates::format(&self.timestamp))
            .field("sample_count", self.sample_count)
    }
}
