//! [`TriageDesk`]: the composed service the transport layer calls.
//!
//! Each operation is at most one read or one write through the injected
//! [`PatientStore`], followed by pure core logic. Nothing is cached between
//! calls.

use chrono::{DateTime, Utc};

use crate::{
  Error, Result,
  lifecycle::LifecycleUpdate,
  patient::{NewPatient, Patient, PatientId, PatientStatus},
  queue::{QueueConfig, QueueEntry, QueueSnapshot, build_snapshot},
  store::PatientStore,
  triage,
};

pub struct TriageDesk<S> {
  store:  S,
  config: QueueConfig,
}

impl<S: PatientStore> TriageDesk<S> {
  pub fn new(store: S, config: QueueConfig) -> Self { Self { store, config } }

  pub fn store(&self) -> &S { &self.store }

  pub fn config(&self) -> &QueueConfig { &self.config }

  /// Triage and persist a new patient. The stored record starts `waiting`.
  pub async fn register(&self, input: NewPatient) -> Result<Patient> {
    let registration = triage::assess(input)?;
    self
      .store
      .insert_patient(registration)
      .await
      .map_err(Error::store)
  }

  /// Compute the live queue from a fresh read of the waiting set.
  pub async fn queue(&self) -> Result<QueueSnapshot> {
    let waiting = self
      .store
      .fetch_waiting_patients()
      .await
      .map_err(Error::store)?;
    Ok(build_snapshot(waiting, &self.config))
  }

  /// One patient's place in the live queue. [`NotFound`](Error::NotFound)
  /// if they are not currently waiting.
  pub async fn queue_status(&self, id: PatientId) -> Result<QueueEntry> {
    let snapshot = self.queue().await?;
    snapshot.find(id).cloned()
  }

  /// The full record, whatever its status.
  pub async fn patient(&self, id: PatientId) -> Result<Patient> {
    self
      .store
      .fetch_patient_by_id(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))
  }

  pub async fn patients(&self, status: Option<PatientStatus>) -> Result<Vec<Patient>> {
    self.store.list_patients(status).await.map_err(Error::store)
  }

  /// Apply a staff update. Empty updates are rejected before storage is
  /// touched.
  pub async fn update(&self, id: PatientId, update: LifecycleUpdate) -> Result<Patient> {
    update.validate()?;
    self
      .store
      .persist_lifecycle_update(id, update)
      .await
      .map_err(Error::store)?
      .ok_or(Error::NotFound(id))
  }

  pub async fn ping(&self) -> Result<DateTime<Utc>> {
    self.store.ping().await.map_err(Error::store)
  }
}
