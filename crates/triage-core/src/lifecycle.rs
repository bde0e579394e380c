//! Staff-driven lifecycle updates.
//!
//! Staff may change a patient's status, priority class, or both. Absent fields
//! keep their current value. Which statuses are legal and which transitions
//! are forbidden is left to policy above this crate; any value is accepted
//! here, including a move back to `waiting`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  patient::{Patient, PatientStatus, PriorityClass},
};

/// A set-if-provided update to one patient.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LifecycleUpdate {
  pub status:         Option<PatientStatus>,
  pub priority_class: Option<PriorityClass>,
}

impl LifecycleUpdate {
  pub fn status(status: PatientStatus) -> Self {
    Self { status: Some(status), priority_class: None }
  }

  pub fn priority(priority_class: PriorityClass) -> Self {
    Self { status: None, priority_class: Some(priority_class) }
  }

  pub fn is_empty(&self) -> bool {
    self.status.is_none() && self.priority_class.is_none()
  }

  /// An update with nothing to change is rejected rather than treated as a
  /// successful no-op.
  pub fn validate(&self) -> Result<()> {
    if self.is_empty() {
      return Err(Error::invalid(
        "update must set status and/or priority_class",
      ));
    }
    Ok(())
  }
}

/// Apply `update` to `patient`, stamping `updated_at` with `now`.
///
/// Storage backends that can update atomically in place need not call this,
/// but must produce the same result.
pub fn apply(
  mut patient: Patient,
  update: &LifecycleUpdate,
  now: DateTime<Utc>,
) -> Result<Patient> {
  update.validate()?;
  if let Some(status) = &update.status {
    patient.status = status.clone();
  }
  if let Some(class) = update.priority_class {
    patient.priority_class = class;
  }
  patient.updated_at = now;
  Ok(patient)
}
