//! hrsdb Core - Health record domain kernel
//!
//! This crate provides the foundational pieces of the health record store:
//! - Patient, BiometricType, Biometric and ECG entity models
//! - Canonical error taxonomy with stable error codes
//! - The one canonical datetime format used for all external serialization
//! - Record serializer producing ordered field/value mappings
//! - Configuration and logging facilities

pub mod config;
pub mod dates;
pub mod errors;
pub mod logging;
pub mod model;
pub mod record;

// Re-export commonly used types
pub use config::{Config, PayloadBackend};
pub use errors::{HrsError, Result};
pub use model::{Biometric, BiometricType, Ecg, EcgData, Gender, Patient, PayloadRef};
pub use record::{Record, ToRecord};
