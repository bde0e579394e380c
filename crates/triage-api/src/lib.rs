//! JSON REST API for the triage queue.
//!
//! Exposes an axum [`Router`] backed by a [`TriageDesk`] over any
//! [`PatientStore`]. TLS, auth and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", triage_api::api_router(desk.clone()))
//! ```

pub mod error;
mod extract;
pub mod health;
pub mod patients;
pub mod records;
mod validate;


use std::sync::Arc;

use axum::{Router, routing::get};
use triage_core::{desk::TriageDesk, store::PatientStore};

pub use error::ApiError;

/// Build a fully-materialised API router for `desk`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(desk: Arc<TriageDesk<S>>) -> Router<()>
where
  S: PatientStore + 'static,
{
  Router::new()
    .route("/health", get(health::handler::<S>))
    // Queue and registration
    .route("/patients", get(patients::queue::<S>).post(patients::register::<S>))
    .route(
      "/patients/{id}",
      get(patients::get_one::<S>).patch(patients::update::<S>),
    )
    .route("/patients/{id}/status", get(patients::status::<S>))
    // Full record listing
    .route("/records", get(records::list::<S>))
    .with_state(desk)
}
