//! Core types and decision logic for the emergency-department walk-in queue.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! classifies pain scores into priority classes, orders the waiting set,
//! projects wait times, and applies staff lifecycle updates. Storage is an
//! injected collaborator ([`store::PatientStore`]).

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod desk;
pub mod error;
pub mod lifecycle;
pub mod patient;
pub mod queue;
pub mod store;
pub mod triage;

pub use error::{Error, Result};
