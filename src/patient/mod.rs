pub mod record;
pub mod units;

pub use record::{Gender, PatientError, PatientInput, PatientRecord};
pub use units::{mgdl_to_mmoll, CholesterolUnit, MGDL_TO_MMOLL};
