//! Patient records and the value types they are built from.
//!
//! A patient is created once at registration and afterwards only changed
//! through [`crate::lifecycle`]. `pain_level` and `created_at` never change
//! after registration.

use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Storage-assigned patient id. The one canonical id type; callers parse
/// external representations into it before comparing.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PatientId(pub i64);

impl fmt::Display for PatientId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl FromStr for PatientId {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    s.trim()
      .parse::<i64>()
      .map(Self)
      .map_err(|_| Error::invalid(format!("patient id must be an integer, got {s:?}")))
  }
}

// ─── Pain ────────────────────────────────────────────────────────────────────

/// A self-reported pain score, guaranteed to lie in `1..=10`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct PainLevel(u8);

impl PainLevel {
  pub const MIN: i64 = 1;
  pub const MAX: i64 = 10;

  pub fn new(value: i64) -> Result<Self> {
    if (Self::MIN..=Self::MAX).contains(&value) {
      Ok(Self(value as u8))
    } else {
      Err(Error::invalid(format!(
        "pain level must be between {} and {}, got {value}",
        Self::MIN,
        Self::MAX
      )))
    }
  }

  pub fn get(self) -> u8 { self.0 }
}

impl TryFrom<i64> for PainLevel {
  type Error = Error;

  fn try_from(value: i64) -> Result<Self> { Self::new(value) }
}

/// Numeric scores must be whole numbers; `3.5` is rejected rather than
/// rounded.
impl TryFrom<f64> for PainLevel {
  type Error = Error;

  fn try_from(value: f64) -> Result<Self> {
    if !value.is_finite() || value.fract() != 0.0 {
      return Err(Error::invalid(format!(
        "pain level must be a whole number, got {value}"
      )));
    }
    Self::new(value as i64)
  }
}

impl From<PainLevel> for i64 {
  fn from(p: PainLevel) -> Self { i64::from(p.0) }
}

// ─── Priority ────────────────────────────────────────────────────────────────

/// Urgency tier; lower values are served first. Triage only produces
/// [`URGENT`](Self::URGENT), [`SOON`](Self::SOON) and
/// [`ROUTINE`](Self::ROUTINE), but staff overrides may set any value.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct PriorityClass(pub i32);

impl PriorityClass {
  pub const URGENT: Self = Self(1);
  pub const SOON: Self = Self(2);
  pub const ROUTINE: Self = Self(3);
}

impl fmt::Display for PriorityClass {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

// ─── Status ──────────────────────────────────────────────────────────────────

/// Where a patient is in their visit. Only [`Waiting`](Self::Waiting) takes
/// part in queue ordering; the set of other statuses is open.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PatientStatus {
  Waiting,
  InProgress,
  Discharged,
  Other(String),
}

impl PatientStatus {
  pub fn as_str(&self) -> &str {
    match self {
      Self::Waiting => "waiting",
      Self::InProgress => "in-progress",
      Self::Discharged => "discharged",
      Self::Other(s) => s,
    }
  }

  pub fn is_waiting(&self) -> bool { matches!(self, Self::Waiting) }
}

impl From<&str> for PatientStatus {
  fn from(s: &str) -> Self {
    match s {
      "waiting" => Self::Waiting,
      "in-progress" => Self::InProgress,
      "discharged" => Self::Discharged,
      other => Self::Other(other.to_owned()),
    }
  }
}

impl From<String> for PatientStatus {
  fn from(s: String) -> Self { Self::from(s.as_str()) }
}

impl From<PatientStatus> for String {
  fn from(s: PatientStatus) -> Self { s.as_str().to_owned() }
}

impl fmt::Display for PatientStatus {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Patient ─────────────────────────────────────────────────────────────────

/// A registered patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
  pub id:             PatientId,
  pub name:           String,
  pub age:            u32,
  pub symptoms:       String,
  pub pain_level:     PainLevel,
  pub notes:          Option<String>,
  pub priority_class: PriorityClass,
  pub status:         PatientStatus,
  /// Server-assigned at registration; the queue tie-break. Never changes.
  pub created_at:     DateTime<Utc>,
  /// Stamped on registration and on every lifecycle update.
  pub updated_at:     DateTime<Utc>,
}

/// Registration input, as supplied by the front desk. Everything else on a
/// [`Patient`] is assigned by triage or by the store.
#[derive(Debug, Clone)]
pub struct NewPatient {
  pub name:       String,
  pub age:        u32,
  pub symptoms:   String,
  /// Raw score; validated by [`crate::triage::classify`].
  pub pain_level: i64,
  pub notes:      Option<String>,
}

/// A [`NewPatient`] that has been through triage. Input to
/// [`crate::store::PatientStore::insert_patient`]; the store assigns `id`,
/// `created_at` and `updated_at`, and the status starts as `waiting`.
#[derive(Debug, Clone)]
pub struct Registration {
  pub name:           String,
  pub age:            u32,
  pub symptoms:       String,
  pub pain_level:     PainLevel,
  pub notes:          Option<String>,
  pub priority_class: PriorityClass,
}
