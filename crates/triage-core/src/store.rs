//! The `PatientStore` trait: the storage collaborator.
//!
//! Implemented by storage backends (e.g. `triage-store-sqlite`). The core
//! performs no locking of its own; it relies on each method here being a
//! single consistent read or a single atomic write.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::{
  lifecycle::LifecycleUpdate,
  patient::{Patient, PatientId, PatientStatus, Registration},
};

/// Abstraction over a patient store backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PatientStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Every patient whose status is `waiting`, read at a single point in time.
  /// Order is unspecified; the core sorts.
  fn fetch_waiting_patients(
    &self,
  ) -> impl Future<Output = Result<Vec<Patient>, Self::Error>> + Send + '_;

  /// Retrieve a patient by id, whatever their status. Returns `None` if not
  /// found.
  fn fetch_patient_by_id(
    &self,
    id: PatientId,
  ) -> impl Future<Output = Result<Option<Patient>, Self::Error>> + Send + '_;

  /// Persist a triaged registration with status `waiting`.
  ///
  /// The store assigns `id` and `created_at`; both must be unique and
  /// monotonic in insertion order.
  fn insert_patient(
    &self,
    registration: Registration,
  ) -> impl Future<Output = Result<Patient, Self::Error>> + Send + '_;

  /// Atomically apply a set-if-provided update and stamp `updated_at`.
  /// Returns `None` if the patient does not exist.
  fn persist_lifecycle_update(
    &self,
    id: PatientId,
    update: LifecycleUpdate,
  ) -> impl Future<Output = Result<Option<Patient>, Self::Error>> + Send + '_;

  /// All patients, optionally restricted to one status, in id order.
  fn list_patients(
    &self,
    status: Option<PatientStatus>,
  ) -> impl Future<Output = Result<Vec<Patient>, Self::Error>> + Send + '_;

  /// Round-trip to storage and report its clock.
  fn ping(&self) -> impl Future<Output = Result<DateTime<Utc>, Self::Error>> + Send + '_;
}
