//! Prescription token verification.
//!
//! The pharmacy scanning flow hands us an opaque token (the prescription id
//! in string form) and expects a verdict it can render directly. Verification
//! never errors: any failure (malformed token, unknown id) collapses into a
//! `NOT_FOUND` outcome.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::prescription::{PrescriptionStatus, PrescriptionStore};

/// Machine-readable verification verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerificationStatus {
    Verified,
    AlreadyDispensed,
    Cancelled,
    NotFound,
}

/// Result of verifying a token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationOutcome {
    pub valid: bool,
    pub status: VerificationStatus,
    pub message: String,
}

impl VerificationOutcome {
    fn not_found() -> Self {
        Self {
            valid: false,
            status: VerificationStatus::NotFound,
            message: "prescription not found".to_string(),
        }
    }
}

/// Verifies scanned prescription tokens.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> VerificationOutcome;
}

/// Verifier backed by the in-process prescription store.
pub struct StoreTokenVerifier {
    store: Arc<PrescriptionStore>,
}

impl StoreTokenVerifier {
    pub fn new(store: Arc<PrescriptionStore>) -> Self {
        Self { store }
    }
}

impl TokenVerifier for StoreTokenVerifier {
    fn verify(&self, token: &str) -> VerificationOutcome {
        let id = match token.parse() {
            Ok(id) => id,
            Err(_) => {
                debug!(token, "verification token did not parse");
                return VerificationOutcome::not_found();
            }
        };

        let Some(prescription) = self.store.get(id) else {
            return VerificationOutcome::not_found();
        };

        match prescription.status {
            PrescriptionStatus::Issued => VerificationOutcome {
                valid: true,
                status: VerificationStatus::Verified,
                message: format!(
                    "{} for {} verified",
                    prescription.medication, prescription.patient_name
                ),
            },
            PrescriptionStatus::Dispensed => VerificationOutcome {
                valid: false,
                status: VerificationStatus::AlreadyDispensed,
                message: "prescription was already dispensed".to_string(),
            },
            PrescriptionStatus::Cancelled => VerificationOutcome {
                valid: false,
                status: VerificationStatus::Cancelled,
                message: "prescription was cancelled".to_string(),
            },
        }
    }
}
