//! Entity models for the health record store

mod biometric;
mod ecg;
mod patient;

pub use biometric::{Biometric, BiometricType};
pub use ecg::{Ecg, EcgData, PayloadRef};
pub use patient::{Gender, Patient};
