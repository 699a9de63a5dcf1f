//! `rxstock-prescriptions` — doctor-side prescription records and token
//! verification.

pub mod prescription;
pub mod verify;

pub use prescription::{
    NewPrescription, Prescription, PrescriptionStatus, PrescriptionStore,
};
pub use verify::{StoreTokenVerifier, TokenVerifier, VerificationOutcome, VerificationStatus};
