//! [`SqliteStore`]: the SQLite implementation of [`PatientStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, TransactionBehavior};

use triage_core::{
  lifecycle::LifecycleUpdate,
  patient::{Patient, PatientId, PatientStatus, Registration},
  store::PatientStore,
};

use crate::{
  Result,
  encode::{RawPatient, decode_dt, encode_dt, encode_status, raw_patient},
  schema::{PATIENT_COLUMNS, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A patient store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn select_patients(
    &self,
    status: Option<PatientStatus>,
  ) -> Result<Vec<Patient>> {
    let status_str = status.as_ref().map(encode_status);

    let raws: Vec<RawPatient> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PATIENT_COLUMNS} FROM patients
           WHERE ?1 IS NULL OR status = ?1
           ORDER BY id"
        ))?;
        let rows = stmt
          .query_map(rusqlite::params![status_str], raw_patient)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPatient::into_patient).collect()
  }
}

// ─── PatientStore impl ───────────────────────────────────────────────────────

impl PatientStore for SqliteStore {
  type Error = crate::Error;

  async fn fetch_waiting_patients(&self) -> Result<Vec<Patient>> {
    self.select_patients(Some(PatientStatus::Waiting)).await
  }

  async fn fetch_patient_by_id(&self, id: PatientId) -> Result<Option<Patient>> {
    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE id = ?1"),
              rusqlite::params![id.0],
              raw_patient,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPatient::into_patient).transpose()
  }

  async fn insert_patient(&self, reg: Registration) -> Result<Patient> {
    let now_str    = encode_dt(Utc::now());
    let waiting    = encode_status(&PatientStatus::Waiting);
    let pain       = i64::from(reg.pain_level);
    let class      = reg.priority_class.0;

    let raw: RawPatient = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        // Never stamp earlier than the latest registration, even if the
        // wall clock has stepped backwards.
        let latest: Option<String> =
          tx.query_row("SELECT MAX(created_at) FROM patients", [], |r| r.get(0))?;
        let created_at = match latest {
          Some(latest) if latest > now_str => latest,
          _ => now_str,
        };

        let raw = tx.query_row(
          &format!(
            "INSERT INTO patients (
               name, age, symptoms, pain_level, notes,
               priority_class, status, created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)
             RETURNING {PATIENT_COLUMNS}"
          ),
          rusqlite::params![
            reg.name,
            reg.age,
            reg.symptoms,
            pain,
            reg.notes,
            class,
            waiting,
            created_at,
          ],
          raw_patient,
        )?;

        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.into_patient()
  }

  async fn persist_lifecycle_update(
    &self,
    id: PatientId,
    update: LifecycleUpdate,
  ) -> Result<Option<Patient>> {
    let status_str = update.status.as_ref().map(encode_status);
    let class      = update.priority_class.map(|c| c.0);
    let now_str    = encode_dt(Utc::now());

    let raw: Option<RawPatient> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "UPDATE patients
                 SET status         = COALESCE(?1, status),
                     priority_class = COALESCE(?2, priority_class),
                     updated_at     = ?3
                 WHERE id = ?4
                 RETURNING {PATIENT_COLUMNS}"
              ),
              rusqlite::params![status_str, class, now_str, id.0],
              raw_patient,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawPatient::into_patient).transpose()
  }

  async fn list_patients(&self, status: Option<PatientStatus>) -> Result<Vec<Patient>> {
    self.select_patients(status).await
  }

  async fn ping(&self) -> Result<DateTime<Utc>> {
    let now: String = self
      .conn
      .call(|conn| {
        Ok(conn.query_row(
          "SELECT strftime('%Y-%m-%dT%H:%M:%fZ', 'now')",
          [],
          |r| r.get(0),
        )?)
      })
      .await?;
    decode_dt(&now)
  }
}
