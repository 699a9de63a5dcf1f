use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use rxstock_core::{DomainError, DomainResult, PrescriptionId};

/// Prescription status lifecycle.
///
/// `Issued` is the only non-terminal state; dispensing and cancellation are
/// both final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrescriptionStatus {
    Issued,
    Dispensed,
    Cancelled,
}

impl PrescriptionStatus {
    pub fn is_terminal(self) -> bool {
        self != PrescriptionStatus::Issued
    }
}

/// A prescription as written by a doctor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prescription {
    pub id: PrescriptionId,
    pub patient_name: String,
    pub medication: String,
    /// Free-text dosage instruction, e.g. "500mg twice daily".
    pub dosage: String,
    pub quantity: i64,
    pub status: PrescriptionStatus,
    pub issued_at: DateTime<Utc>,
}

/// Creation payload: a prescription minus id, status, and issue time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewPrescription {
    pub patient_name: String,
    pub medication: String,
    pub dosage: String,
    pub quantity: i64,
}

impl NewPrescription {
    pub fn validate(&self) -> DomainResult<()> {
        if self.patient_name.trim().is_empty() {
            return Err(DomainError::validation("patient name cannot be empty"));
        }
        if self.medication.trim().is_empty() {
            return Err(DomainError::validation("medication cannot be empty"));
        }
        if self.quantity <= 0 {
            return Err(DomainError::validation("quantity must be positive"));
        }
        Ok(())
    }
}

/// Doctor-side record store: an append-only list of prescriptions plus a
/// status setter. Same ownership rule as the pharmacy store: callers go
/// through these operations, never at the collection directly.
#[derive(Debug, Default)]
pub struct PrescriptionStore {
    records: RwLock<Vec<Prescription>>,
}

impl PrescriptionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue a prescription; newest-first like the order collection.
    pub fn add(&self, payload: NewPrescription) -> DomainResult<Prescription> {
        payload.validate()?;
        let prescription = Prescription {
            id: PrescriptionId::new(),
            patient_name: payload.patient_name,
            medication: payload.medication,
            dosage: payload.dosage,
            quantity: payload.quantity,
            status: PrescriptionStatus::Issued,
            issued_at: Utc::now(),
        };

        let mut records = self.records.write().unwrap();
        records.insert(0, prescription.clone());
        debug!(prescription_id = %prescription.id, "prescription issued");
        Ok(prescription)
    }

    pub fn get(&self, id: PrescriptionId) -> Option<Prescription> {
        let records = self.records.read().unwrap();
        records.iter().find(|p| p.id == id).cloned()
    }

    /// All prescriptions, newest first.
    pub fn list(&self) -> Vec<Prescription> {
        self.records.read().unwrap().clone()
    }

    /// Move a prescription to a new status.
    ///
    /// Same-status updates are idempotent; leaving a terminal state is
    /// rejected.
    pub fn update_status(
        &self,
        id: PrescriptionId,
        status: PrescriptionStatus,
    ) -> DomainResult<Prescription> {
        let mut records = self.records.write().unwrap();
        let prescription = records
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(DomainError::NotFound)?;

        if prescription.status != status {
            if prescription.status.is_terminal() {
                return Err(DomainError::invariant(format!(
                    "prescription is already {:?}",
                    prescription.status
                )));
            }
            prescription.status = status;
        }
        Ok(prescription.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> NewPrescription {
        NewPrescription {
            patient_name: "Jane Doe".to_string(),
            medication: "Metformin".to_string(),
            dosage: "500mg twice daily".to_string(),
            quantity: 60,
        }
    }

    #[test]
    fn add_issues_newest_first() {
        let store = PrescriptionStore::new();
        let first = store.add(payload()).unwrap();
        let second = store.add(payload()).unwrap();

        assert_eq!(first.status, PrescriptionStatus::Issued);

        let all = store.list();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
        assert_eq!(all[1].id, first.id);
    }

    #[test]
    fn add_rejects_invalid_payloads() {
        let store = PrescriptionStore::new();

        for bad in [
            NewPrescription {
                patient_name: " ".to_string(),
                ..payload()
            },
            NewPrescription {
                medication: String::new(),
                ..payload()
            },
            NewPrescription {
                quantity: 0,
                ..payload()
            },
        ] {
            assert!(matches!(
                store.add(bad).unwrap_err(),
                DomainError::Validation(_)
            ));
        }
    }

    #[test]
    fn dispense_then_redispense_is_idempotent() {
        let store = PrescriptionStore::new();
        let p = store.add(payload()).unwrap();

        store
            .update_status(p.id, PrescriptionStatus::Dispensed)
            .unwrap();
        let again = store
            .update_status(p.id, PrescriptionStatus::Dispensed)
            .unwrap();
        assert_eq!(again.status, PrescriptionStatus::Dispensed);
    }

    #[test]
    fn terminal_states_cannot_be_left() {
        let store = PrescriptionStore::new();
        let p = store.add(payload()).unwrap();

        store
            .update_status(p.id, PrescriptionStatus::Cancelled)
            .unwrap();
        let err = store
            .update_status(p.id, PrescriptionStatus::Dispensed)
            .unwrap_err();
        assert!(matches!(err, DomainError::InvariantViolation(_)));
    }

    #[test]
    fn update_status_surfaces_not_found() {
        let store = PrescriptionStore::new();
        let err = store
            .update_status(PrescriptionId::new(), PrescriptionStatus::Dispensed)
            .unwrap_err();
        assert_eq!(err, DomainError::NotFound);
    }
}
