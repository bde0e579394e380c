//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::JsonRejection,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<triage_core::Error> for ApiError {
  fn from(e: triage_core::Error) -> Self {
    match e {
      triage_core::Error::InvalidInput(m) => Self::BadRequest(m),
      triage_core::Error::NotFound(id) => Self::NotFound(format!("patient {id} not found")),
      triage_core::Error::Store(e) => {
        tracing::error!(error = %e, "patient store failed");
        Self::Internal(e)
      }
    }
  }
}

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self {
    tracing::debug!(error = %e, "request body rejected");
    Self::BadRequest(e.body_text())
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      // Storage details stay in the logs.
      ApiError::Internal(_) => {
        (StatusCode::INTERNAL_SERVER_ERROR, "server error".to_owned())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
