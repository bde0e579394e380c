//! Error types for `triage-core`.

use thiserror::Error;

use crate::patient::PatientId;

#[derive(Debug, Error)]
pub enum Error {
  /// Malformed or out-of-domain input: pain outside 1..=10, an update with
  /// nothing to change, and so on.
  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("patient not found: {0}")]
  NotFound(PatientId),

  /// The storage collaborator failed; passed through untouched.
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub fn invalid(msg: impl Into<String>) -> Self {
    Self::InvalidInput(msg.into())
  }

  pub(crate) fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
