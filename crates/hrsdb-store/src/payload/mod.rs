//! Payload storage for ECG sample arrays
//!
//! Sample payloads live outside the relational rows. Two backends implement
//! the same interface: one CSV file per ECG under the upload root, or an
//! encoded blob held inline in the ECG row. A deployment picks one via
//! configuration.

pub mod codec;
pub mod fs_store;
pub mod inline;

pub use fs_store::FsPayloadStore;
pub use inline::InlinePayloadStore;

use hrsdb_core::model::PayloadRef;

use crate::errors::Result;

/// Payload persisted by a write, before any row referencing it exists
#[derive(Debug, Clone, PartialEq)]
pub enum StagedPayload {
    /// A file already on disk, path relative to the upload root
    File { path: String },
    /// Encoded bytes destined for the ECG row's blob column
    Inline { bytes: Vec<u8> },
}

/// Result of staging a sample array into a payload store
#[derive(Debug, Clone, PartialEq)]
pub struct PayloadWrite {
    /// Number of samples encoded
    pub sample_count: i64,
    /// Where the encoded payload ended up
    pub staged: StagedPayload,
}

/// Storage strategy for ECG sample payloads
///
/// `write` runs strictly before the row insert inside the unit of work, so a
/// failed commit can orphan a file but a committed row always has its
/// payload. `read` resolves an existing row's reference back to samples.
pub trait PayloadStore: Send + Sync {
    /// Persist a sample array and return its staged reference
    fn write(&self, samples: &[f64]) -> Result<PayloadWrite>;

    /// Load the samples behind an existing ECG row's payload reference
    ///
    /// # Errors
    /// * `PayloadUnavailable` - If the payload is missing, undecodable, or
    ///   was written by the other storage strategy
    fn read(&self, ecg_id: i64, payload: &PayloadRef) -> Result<Vec<f64>>;
}
