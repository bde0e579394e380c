//! Handler for `GET /health`: a round-trip to storage.

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use triage_core::{desk::TriageDesk, store::PatientStore};

use crate::error::ApiError;

#[derive(Debug, Serialize)]
pub struct Health {
  pub ok:   bool,
  /// The store's clock.
  pub time: DateTime<Utc>,
}

/// `GET /health`: `{"ok":true,"time":"..."}`, or 500 if the store is
/// unreachable.
pub async fn handler<S>(
  State(desk): State<Arc<TriageDesk<S>>>,
) -> Result<Json<Health>, ApiError>
where
  S: PatientStore,
{
  let time = desk.ping().await?;
  Ok(Json(Health { ok: true, time }))
}
