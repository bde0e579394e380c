//! Handlers for `/patients` endpoints.
//!
//! | Method  | Path | Notes |
//! |---------|------|-------|
//! | `POST`  | `/patients` | Body: [`RegisterBody`]; returns 201 + stored patient |
//! | `GET`   | `/patients` | The live queue, in serving order |
//! | `GET`   | `/patients/:id` | Full record, any status |
//! | `GET`   | `/patients/:id/status` | Queue entry; 404 unless waiting |
//! | `PATCH` | `/patients/:id` | Body: [`UpdateBody`] |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::Deserialize;
use serde_json::Value;
use triage_core::{
  desk::TriageDesk,
  lifecycle::LifecycleUpdate,
  patient::{NewPatient, Patient, PatientStatus},
  queue::{QueueEntry, QueueSnapshot},
  store::PatientStore,
};

use crate::{error::ApiError, extract::JsonBody, validate};

// ─── Register ─────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /patients`. `age` and `pain_level` may be
/// numbers or numeric strings.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
  pub name:       Option<String>,
  pub age:        Option<Value>,
  pub symptoms:   Option<String>,
  pub pain_level: Option<Value>,
  pub notes:      Option<String>,
}

impl TryFrom<RegisterBody> for NewPatient {
  type Error = ApiError;

  fn try_from(b: RegisterBody) -> Result<Self, ApiError> {
    let (Some(name), Some(age), Some(symptoms), Some(pain_level)) = (
      validate::present(b.name),
      b.age.filter(|v| !v.is_null()),
      validate::present(b.symptoms),
      b.pain_level.filter(|v| !v.is_null()),
    ) else {
      return Err(ApiError::BadRequest("Missing required fields".into()));
    };

    Ok(NewPatient {
      pain_level: validate::pain_level(&pain_level)?,
      age: validate::age(&age)?,
      name,
      symptoms,
      notes: validate::present(b.notes),
    })
  }
}

/// `POST /patients`: returns 201 + the stored [`Patient`].
pub async fn register<S>(
  State(desk): State<Arc<TriageDesk<S>>>,
  JsonBody(body): JsonBody<RegisterBody>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PatientStore,
{
  let patient = desk.register(NewPatient::try_from(body)?).await?;
  tracing::info!(
    id = %patient.id,
    priority_class = %patient.priority_class,
    "patient registered"
  );
  Ok((StatusCode::CREATED, Json(patient)))
}

// ─── Queue ────────────────────────────────────────────────────────────────────

/// `GET /patients`: the waiting set in serving order, each entry carrying
/// `position` and `estimated_wait_min`.
pub async fn queue<S>(
  State(desk): State<Arc<TriageDesk<S>>>,
) -> Result<Json<QueueSnapshot>, ApiError>
where
  S: PatientStore,
{
  let snapshot = desk.queue().await?;
  tracing::debug!(
    avg_service_minutes = desk.config().avg_service_minutes,
    waiting = snapshot.len(),
    "queue computed"
  );
  for entry in snapshot.entries() {
    tracing::debug!(
      id = %entry.patient.id,
      position = entry.position,
      wait = entry.estimated_wait_min,
      "queue entry"
    );
  }
  Ok(Json(snapshot))
}

/// `GET /patients/:id/status`
pub async fn status<S>(
  State(desk): State<Arc<TriageDesk<S>>>,
  Path(id): Path<String>,
) -> Result<Json<QueueEntry>, ApiError>
where
  S: PatientStore,
{
  let id = validate::patient_id(&id)?;
  match desk.queue_status(id).await {
    Ok(entry) => Ok(Json(entry)),
    Err(triage_core::Error::NotFound(_)) => Err(ApiError::NotFound(
      "Patient not found in waiting queue".into(),
    )),
    Err(e) => Err(e.into()),
  }
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /patients/:id`
pub async fn get_one<S>(
  State(desk): State<Arc<TriageDesk<S>>>,
  Path(id): Path<String>,
) -> Result<Json<Patient>, ApiError>
where
  S: PatientStore,
{
  let id = validate::patient_id(&id)?;
  Ok(Json(desk.patient(id).await?))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `PATCH /patients/:id`. Either field may be omitted;
/// omitted fields keep their current value. `priority_class` may be a number
/// or a numeric string.
#[derive(Debug, Deserialize)]
pub struct UpdateBody {
  pub status:         Option<String>,
  #[serde(alias = "triage_level_code")]
  pub priority_class: Option<Value>,
}

impl TryFrom<UpdateBody> for LifecycleUpdate {
  type Error = ApiError;

  fn try_from(b: UpdateBody) -> Result<Self, ApiError> {
    Ok(LifecycleUpdate {
      status:         validate::present(b.status)
        .map(|s| PatientStatus::from(s.trim())),
      priority_class: b
        .priority_class
        .filter(|v| !v.is_null())
        .as_ref()
        .map(validate::priority_class)
        .transpose()?,
    })
  }
}

/// `PATCH /patients/:id`: returns the updated [`Patient`].
pub async fn update<S>(
  State(desk): State<Arc<TriageDesk<S>>>,
  Path(id): Path<String>,
  JsonBody(body): JsonBody<UpdateBody>,
) -> Result<Json<Patient>, ApiError>
where
  S: PatientStore,
{
  let id = validate::patient_id(&id)?;
  let update = LifecycleUpdate::try_from(body)?;
  let patient = desk.update(id, update).await?;
  tracing::info!(
    id = %patient.id,
    status = %patient.status,
    priority_class = %patient.priority_class,
    "patient updated"
  );
  Ok(Json(patient))
}
