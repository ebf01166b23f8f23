//! JSON REST API for the patient registry.
//!
//! Exposes an axum [`Router`] backed by a [`PatientService`] over any
//! [`PatientStore`]. Auth, TLS, and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", patient_api::api_router(service.clone()))
//! ```

pub mod error;
pub mod extract;
pub mod patients;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, put},
};
use patient_core::{PatientService, PatientStore};

pub use error::ApiError;
pub use patients::PatientResponse;

/// Build a fully-materialised API router for `service`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(service: Arc<PatientService<S>>) -> Router<()>
where
  S: PatientStore + 'static,
{
  Router::new()
    .route(
      "/patients",
      get(patients::list::<S>).post(patients::create::<S>),
    )
    .route(
      "/patients/{id}",
      get(patients::get_one::<S>)
        .put(patients::update::<S>)
        .delete(patients::delete::<S>),
    )
    .route("/patients/{id}/deactivate", put(patients::deactivate::<S>))
    .route("/patients/{id}/activate", put(patients::activate::<S>))
    .with_state(service)
}
