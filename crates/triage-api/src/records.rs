//! Handler for `GET /records`: every patient record, not just the queue.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;
use triage_core::{
  desk::TriageDesk,
  patient::{Patient, PatientStatus},
  store::PatientStore,
};

use crate::error::ApiError;

#[derive(Debug, Deserialize)]
pub struct ListParams {
  /// Restrict to one status, e.g. `discharged`.
  pub status: Option<PatientStatus>,
}

/// `GET /records[?status=<status>]`, in id order.
pub async fn list<S>(
  State(desk): State<Arc<TriageDesk<S>>>,
  Query(params): Query<ListParams>,
) -> Result<Json<Vec<Patient>>, ApiError>
where
  S: PatientStore,
{
  Ok(Json(desk.patients(params.status).await?))
}
