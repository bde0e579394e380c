//! Encoding and decoding helpers between domain types and the plain values
//! stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed microsecond
//! width, so string comparison in SQL agrees with chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use triage_core::patient::{PainLevel, Patient, PatientId, PatientStatus, PriorityClass};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── PatientStatus ───────────────────────────────────────────────────────────

pub fn encode_status(s: &PatientStatus) -> String { s.as_str().to_owned() }

// ─── Rows ────────────────────────────────────────────────────────────────────

/// Column values as read from a `patients` row, before domain validation.
pub struct RawPatient {
  pub id:             i64,
  pub name:           String,
  pub age:            i64,
  pub symptoms:       String,
  pub pain_level:     i64,
  pub notes:          Option<String>,
  pub priority_class: i64,
  pub status:         String,
  pub created_at:     String,
  pub updated_at:     String,
}

/// Read a row selected with [`crate::schema::PATIENT_COLUMNS`].
pub fn raw_patient(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawPatient> {
  Ok(RawPatient {
    id:             row.get(0)?,
    name:           row.get(1)?,
    age:            row.get(2)?,
    symptoms:       row.get(3)?,
    pain_level:     row.get(4)?,
    notes:          row.get(5)?,
    priority_class: row.get(6)?,
    status:         row.get(7)?,
    created_at:     row.get(8)?,
    updated_at:     row.get(9)?,
  })
}

impl RawPatient {
  pub fn into_patient(self) -> Result<Patient> {
    let age = u32::try_from(self.age)
      .map_err(|_| Error::Decode(format!("patient {}: age {}", self.id, self.age)))?;
    let priority_class = i32::try_from(self.priority_class).map_err(|_| {
      Error::Decode(format!(
        "patient {}: priority_class {}",
        self.id, self.priority_class
      ))
    })?;

    Ok(Patient {
      id: PatientId(self.id),
      name: self.name,
      age,
      symptoms: self.symptoms,
      pain_level: PainLevel::new(self.pain_level)?,
      notes: self.notes,
      priority_class: PriorityClass(priority_class),
      status: PatientStatus::from(self.status),
      created_at: decode_dt(&self.created_at)?,
      updated_at: decode_dt(&self.updated_at)?,
    })
  }
}
