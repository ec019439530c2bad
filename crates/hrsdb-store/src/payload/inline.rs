//! Inline payload store
//!
//! Samples are packed into little-endian f64 bytes held in the ECG row's
//! blob column; no files are involved.

use hrsdb_core::model::PayloadRef;

use crate::errors::{payload_unavailable, Result};
use crate::payload::{codec, PayloadStore, PayloadWrite, StagedPayload};

/// Payload store keeping encoded samples inside the ECG row
pub struct InlinePayloadStore;

impl PayloadStore for InlinePayloadStore {
    fn write(&self, samples: &[f64]) -> Result<PayloadWrite> {
        Ok(PayloadWrite {
            sample_count: samples.len() as i64,
            staged: StagedPayload::Inline {
                bytes: codec::encode_le(samples),
            },
        })
    }

    fn read(&self, ecg_id: i64, payload: &PayloadRef) -> Result<Vec<f64>> {
        match payload {
            PayloadRef::Inline { bytes } => {
                codec::decode_le(bytes).map_err(|reason| payload_unavailable(ecg_id, reason))
            }
            PayloadRef::File { .. } => Err(payload_unavailable(
                ecg_id,
                "payload was stored as a file by a different backend",
            )),
        }
    }
}
