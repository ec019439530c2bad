//! Filesystem payload store
//!
//! One CSV file per ECG under the upload root, named by a randomized UUID so
//! collisions are negligible. Writes are atomic (temp then rename) and
//! happen strictly before the referencing row is created.

use std::fs;
use std::path::{Path, PathBuf};

use hrsdb_core::model::PayloadRef;
use tracing::debug;
use uuid::Uuid;

use crate::errors::{io_error, payload_unavailable, Result};
use crate::payload::{codec, PayloadStore, PayloadWrite, StagedPayload};

/// File-backed payload store rooted at the configured upload directory
pub struct FsPayloadStore {
    root: PathBuf,
}

impl FsPayloadStore {
    /// Create a payload store over the given upload root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Absolute path for a stored relative path
    fn resolve(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }
}

impl PayloadStore for FsPayloadStore {
    fn write(&self, samples: &[f64]) -> Result<PayloadWrite> {
        let relative = format!("{}.csv", Uuid::new_v4());
        let target = self.resolve(&relative);

        atomic_write(&target, codec::encode_csv(samples).as_bytes())?;
        debug!(path = %relative, samples = samples.len(), "wrote ECG payload file");

        Ok(PayloadWrite {
            sample_count: samples.len() as i64,
            staged: StagedPayload::File { path: relative },
        })
    }

    fn read(&self, ecg_id: i64, payload: &PayloadRef) -> Result<Vec<f64>> {
        match payload {
            PayloadRef::File { path, .. } => {
                let text = fs::read_to_string(self.resolve(path)).map_err(|err| {
                    payload_unavailable(ecg_id, format!("cannot read '{}': {}", path, err))
                })?;
                codec::decode_csv(&text).map_err(|reason| payload_unavailable(ecg_id, reason))
            }
            PayloadRef::Inline { .. } => Err(payload_unavailable(
                ecg_id,
                "payload was stored inline by a different backend",
            )),
        }
    }
}

/// Atomically write bytes to a file
///
/// Uses temp file + rename so a crash never leaves a partial payload.
fn atomic_write(target: &Path, content: &[u8]) -> Result<()> {
    if let Some(parent) = target.parent() {
        fs::create_dir_all(parent).map_err(|err| io_error("create_upload_root", err))?;
    }

    let temp = target.with_extension("tmp");
    fs::write(&temp, content).map_err(|err| io_error("write_payload_temp", err))?;
    fs::rename(&temp, target).map_err(|err| io_error("rename_payload_temp", err))?;

    Ok(())
}
