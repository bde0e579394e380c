//! Queue ordering, wait estimation and the snapshot read model.
//!
//! Nothing here is cached. Every snapshot is computed from the waiting set
//! handed in by the caller, so a registration or status change is reflected
//! by the next call.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  patient::{Patient, PatientId},
};

// ─── Configuration ───────────────────────────────────────────────────────────

/// Inputs to the wait estimator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
  /// Assumed minutes to fully service one patient.
  pub avg_service_minutes: u32,
}

impl QueueConfig {
  pub const DEFAULT_AVG_SERVICE_MINUTES: u32 = 20;

  pub fn new(avg_service_minutes: u32) -> Self { Self { avg_service_minutes } }
}

impl Default for QueueConfig {
  fn default() -> Self { Self::new(Self::DEFAULT_AVG_SERVICE_MINUTES) }
}

// ─── Ordering policy ─────────────────────────────────────────────────────────

/// Serving order: priority class ascending, then `created_at` ascending,
/// then id ascending. Total over distinct ids.
pub fn compare(a: &Patient, b: &Patient) -> Ordering {
  a.priority_class
    .cmp(&b.priority_class)
    .then_with(|| a.created_at.cmp(&b.created_at))
    .then_with(|| a.id.cmp(&b.id))
}

/// Keep only waiting patients and put them in serving order.
pub fn order_waiting(mut patients: Vec<Patient>) -> Vec<Patient> {
  patients.retain(|p| p.status.is_waiting());
  patients.sort_by(compare);
  patients
}

// ─── Wait estimator ──────────────────────────────────────────────────────────

/// Linear projection: `(position - 1) * avg_service_minutes`. Position is
/// 1-based, so the patient at the head of the queue waits 0 minutes.
///
/// Deliberately ignores priority-specific service times, time already spent
/// waiting and staffing.
pub fn estimate_wait(position: usize, config: &QueueConfig) -> u64 {
  let ahead = position.saturating_sub(1) as u64;
  ahead * u64::from(config.avg_service_minutes)
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// One row of the live queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueEntry {
  #[serde(flatten)]
  pub patient:            Patient,
  /// 1-based rank in serving order.
  pub position:           usize,
  pub estimated_wait_min: u64,
}

/// The computed, ordered view of the waiting set. Never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QueueSnapshot {
  entries: Vec<QueueEntry>,
}

impl QueueSnapshot {
  pub fn entries(&self) -> &[QueueEntry] { &self.entries }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }

  /// Locate a patient's entry by id. Fails with
  /// [`NotFound`](Error::NotFound) if the patient is not waiting.
  pub fn find(&self, id: PatientId) -> Result<&QueueEntry> {
    self
      .entries
      .iter()
      .find(|e| e.patient.id == id)
      .ok_or(Error::NotFound(id))
  }

  pub fn into_entries(self) -> Vec<QueueEntry> { self.entries }
}

impl IntoIterator for QueueSnapshot {
  type IntoIter = std::vec::IntoIter<QueueEntry>;
  type Item = QueueEntry;

  fn into_iter(self) -> Self::IntoIter { self.entries.into_iter() }
}

/// Order the waiting set and attach position and estimated wait to each
/// patient.
pub fn build_snapshot(waiting: Vec<Patient>, config: &QueueConfig) -> QueueSnapshot {
  let entries = order_waiting(waiting)
    .into_iter()
    .enumerate()
    .map(|(index, patient)| {
      let position = index + 1;
      QueueEntry {
        patient,
        position,
        estimated_wait_min: estimate_wait(position, config),
      }
    })
    .collect();
  QueueSnapshot { entries }
}

#[cfg(test)]
mod tests {
  use chrono::{DateTime, Duration, TimeZone, Utc};

  use super::*;
  use crate::patient::{PainLevel, PatientStatus, PriorityClass};

  fn t(minute: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 8, 0, 0).unwrap() + Duration::minutes(minute)
  }

  fn patient(id: i64, pain: i64, created_at: DateTime<Utc>) -> Patient {
    let pain_level = PainLevel::new(pain).unwrap();
    Patient {
      id: PatientId(id),
      name: format!("patient {id}"),
      age: 40,
      symptoms: "unwell".into(),
      pain_level,
      notes: None,
      priority_class: pain_level.priority_class(),
      status: PatientStatus::Waiting,
      created_at,
      updated_at: created_at,
    }
  }

  fn ids(snapshot: &QueueSnapshot) -> Vec<i64> {
    snapshot.entries().iter().map(|e| e.patient.id.0).collect()
  }

  #[test]
  fn class_then_arrival_scenario() {
    let a = patient(1, 9, t(1));
    let b = patient(2, 6, t(2));
    let c = patient(3, 9, t(3));

    let snap = build_snapshot(vec![b, c, a], &QueueConfig::new(15));

    assert_eq!(ids(&snap), vec![1, 3, 2]);
    let waits: Vec<_> =
      snap.entries().iter().map(|e| (e.position, e.estimated_wait_min)).collect();
    assert_eq!(waits, vec![(1, 0), (2, 15), (3, 30)]);
  }

  #[test]
  fn twenty_minute_service_gives_0_20_40() {
    let snap = build_snapshot(
      vec![patient(1, 2, t(0)), patient(2, 2, t(1)), patient(3, 2, t(2))],
      &QueueConfig::new(20),
    );
    let waits: Vec<_> = snap.entries().iter().map(|e| e.estimated_wait_min).collect();
    assert_eq!(waits, vec![0, 20, 40]);
  }

  #[test]
  fn same_instant_falls_back_to_id() {
    let snap = build_snapshot(
      vec![patient(7, 9, t(0)), patient(3, 9, t(0)), patient(5, 9, t(0))],
      &QueueConfig::default(),
    );
    assert_eq!(ids(&snap), vec![3, 5, 7]);
  }

  #[test]
  fn override_class_sorts_after_triage_classes() {
    let mut held = patient(1, 10, t(0));
    held.priority_class = PriorityClass(9);
    let snap = build_snapshot(
      vec![held, patient(2, 1, t(5))],
      &QueueConfig::default(),
    );
    assert_eq!(ids(&snap), vec![2, 1]);
  }

  #[test]
  fn non_waiting_patients_are_excluded() {
    let mut seen = patient(1, 9, t(0));
    seen.status = PatientStatus::InProgress;
    let mut gone = patient(2, 9, t(1));
    gone.status = PatientStatus::Other("left-without-being-seen".into());

    let snap = build_snapshot(
      vec![seen, gone, patient(3, 3, t(2))],
      &QueueConfig::default(),
    );
    assert_eq!(ids(&snap), vec![3]);
    assert_eq!(snap.entries()[0].estimated_wait_min, 0);
  }

  #[test]
  fn positions_are_dense_and_order_holds() {
    // A scrambled mix of classes and arrival times.
    let pains = [3, 9, 5, 1, 8, 7, 10, 2, 6, 4, 9, 5];
    let patients: Vec<_> = pains
      .iter()
      .enumerate()
      .map(|(i, &pain)| patient(i as i64 + 1, pain, t(((i * 7) % 5) as i64)))
      .collect();
    let n = patients.len();
    let config = QueueConfig::new(12);

    let snap = build_snapshot(patients, &config);

    assert_eq!(snap.len(), n);
    for (i, entry) in snap.entries().iter().enumerate() {
      assert_eq!(entry.position, i + 1);
      assert_eq!(entry.estimated_wait_min, estimate_wait(i + 1, &config));
    }
    for pair in snap.entries().windows(2) {
      let (x, y) = (&pair[0].patient, &pair[1].patient);
      assert!(x.priority_class <= y.priority_class);
      if x.priority_class == y.priority_class {
        assert!(x.created_at <= y.created_at);
      }
    }
  }

  #[test]
  fn rebuilding_an_unchanged_set_is_identical() {
    let set = vec![patient(1, 4, t(3)), patient(2, 8, t(1)), patient(3, 8, t(1))];
    let config = QueueConfig::default();
    assert_eq!(
      build_snapshot(set.clone(), &config),
      build_snapshot(set, &config)
    );
  }

  #[test]
  fn estimate_is_linear() {
    let config = QueueConfig::new(17);
    assert_eq!(estimate_wait(1, &config), 0);
    for position in 1..50 {
      assert_eq!(
        estimate_wait(position + 1, &config) - estimate_wait(position, &config),
        17
      );
    }
  }

  #[test]
  fn find_by_id() {
    let snap = build_snapshot(
      vec![patient(10, 2, t(0)), patient(11, 9, t(1))],
      &QueueConfig::new(20),
    );
    let entry = snap.find(PatientId(10)).unwrap();
    assert_eq!(entry.position, 2);
    assert_eq!(entry.estimated_wait_min, 20);

    assert!(matches!(
      snap.find(PatientId(99)),
      Err(Error::NotFound(PatientId(99)))
    ));
  }

  #[test]
  fn entry_serialises_flat() {
    let snap = build_snapshot(vec![patient(4, 9, t(0))], &QueueConfig::default());
    let json = serde_json::to_value(&snap).unwrap();
    let row = &json[0];
    assert_eq!(row["id"], 4);
    assert_eq!(row["priority_class"], 1);
    assert_eq!(row["pain_level"], 9);
    assert_eq!(row["status"], "waiting");
    assert_eq!(row["position"], 1);
    assert_eq!(row["estimated_wait_min"], 0);
  }
}
