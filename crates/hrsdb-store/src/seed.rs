//! Biometric type seeding
//!
//! The reference table is seeded at engine startup; names already present
//! are skipped.

use rusqlite::Connection;

use crate::errors::{from_rusqlite, Result};

/// Reference biometric types present in every deployment
pub const BIOMETRIC_TYPES: &[(&str, &str)] = &[
    ("height", "cm"),
    ("weight", "kg"),
    ("blood_pressure", "mmHg"),
    ("ecg", "mV"),
];

/// Insert any missing reference types
///
/// Idempotent: relies on the UNIQUE constraint on `name`, so running it
/// twice yields exactly one row per static name.
pub fn seed_biometric_types(conn: &Connection) -> Result<usize> {
    let mut inserted = 0;
    for (name, units) in BIOMETRIC_TYPES {
        inserted += conn
            .execute(
                "INSERT OR IGNORE INTO biometric_types (name, units) VALUES (?1, ?2)",
                rusqlite::params![name, units],
            )
            .map_err(from_rusqlite)?;
    }
    Ok(inserted)
}
