//! [`JsonBody`]: `axum::Json` with rejections reported as [`ApiError`].

use axum::{
  Json,
  extract::{FromRequest, Request, rejection::JsonRejection},
};

use crate::ApiError;

/// A JSON request body. Malformed JSON, a missing content type or a body of
/// the wrong shape all come back as a 400 with an `{"error": ...}` body.
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
  Json<T>: FromRequest<S, Rejection = JsonRejection>,
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(value) = Json::<T>::from_request(req, state).await?;
    Ok(JsonBody(value))
  }
}
