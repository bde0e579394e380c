//! Triage: pain score to priority class.
//!
//! | Pain | Class |
//! |------|-------|
//! | 8–10 | 1 (urgent) |
//! | 5–7  | 2 |
//! | 1–4  | 3 |

use crate::{
  Result,
  patient::{NewPatient, PainLevel, PriorityClass, Registration},
};

impl PainLevel {
  /// The fixed-threshold triage rule.
  pub fn priority_class(self) -> PriorityClass {
    match self.get() {
      8.. => PriorityClass::URGENT,
      5..=7 => PriorityClass::SOON,
      _ => PriorityClass::ROUTINE,
    }
  }
}

/// Classify an integer pain score. Fails with
/// [`InvalidInput`](crate::Error::InvalidInput) outside `1..=10`.
pub fn classify(pain: i64) -> Result<PriorityClass> {
  Ok(PainLevel::new(pain)?.priority_class())
}

/// Run triage on a registration, producing what the store persists.
pub fn assess(input: NewPatient) -> Result<Registration> {
  let pain_level = PainLevel::new(input.pain_level)?;
  Ok(Registration {
    name: input.name,
    age: input.age,
    symptoms: input.symptoms,
    pain_level,
    notes: input.notes,
    priority_class: pain_level.priority_class(),
  })
}
