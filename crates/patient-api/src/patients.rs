//! Handlers for `/patients` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/patients` | Active and inactive patients |
//! | `GET`    | `/patients/{id}` | 404 if not found |
//! | `POST`   | `/patients` | Body: [`PatientRequest`]; returns 201 + patient |
//! | `PUT`    | `/patients/{id}` | Body: [`PatientRequest`]; 409 if inactive |
//! | `PUT`    | `/patients/{id}/deactivate` | 204; 409 if already inactive |
//! | `PUT`    | `/patients/{id}/activate` | 204; 409 if already active |
//! | `DELETE` | `/patients/{id}` | 204 |

use std::sync::Arc;

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::NaiveDate;
use patient_core::{Patient, PatientRequest, PatientService, PatientStatus, PatientStore};
use serde::Serialize;
use uuid::Uuid;

use crate::{
  error::ApiError,
  extract::{JsonBody, PathParam},
};

// ─── Response body ────────────────────────────────────────────────────────────

/// The JSON shape of a patient.
#[derive(Debug, Serialize)]
pub struct PatientResponse {
  pub id:               Option<Uuid>,
  pub name:             String,
  pub email:            String,
  pub address:          String,
  pub date_of_birth:    NaiveDate,
  pub registered_date:  NaiveDate,
  pub status:           PatientStatus,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub deactivated_date: Option<NaiveDate>,
}

impl From<&Patient> for PatientResponse {
  fn from(p: &Patient) -> Self {
    Self {
      id:               p.id(),
      name:             p.name().to_owned(),
      email:            p.email().to_owned(),
      address:          p.address().to_owned(),
      date_of_birth:    p.date_of_birth(),
      registered_date:  p.registered_date(),
      status:           p.status(),
      deactivated_date: p.deactivated_date(),
    }
  }
}

// ─── Read ─────────────────────────────────────────────────────────────────────

/// `GET /patients`
pub async fn list<S>(
  State(service): State<Arc<PatientService<S>>>,
) -> Result<Json<Vec<PatientResponse>>, ApiError>
where
  S: PatientStore,
{
  let patients = service.list().await?;
  Ok(Json(patients.iter().map(PatientResponse::from).collect()))
}

/// `GET /patients/{id}`
pub async fn get_one<S>(
  State(service): State<Arc<PatientService<S>>>,
  PathParam(id): PathParam<Uuid>,
) -> Result<Json<PatientResponse>, ApiError>
where
  S: PatientStore,
{
  let patient = service.get(id).await?;
  Ok(Json(PatientResponse::from(&patient)))
}

// ─── Create / update ──────────────────────────────────────────────────────────

/// `POST /patients` — returns 201 + the stored patient.
pub async fn create<S>(
  State(service): State<Arc<PatientService<S>>>,
  JsonBody(body): JsonBody<PatientRequest>,
) -> Result<impl IntoResponse, ApiError>
where
  S: PatientStore,
{
  let patient = service.create(body).await?;
  Ok((StatusCode::CREATED, Json(PatientResponse::from(&patient))))
}

/// `PUT /patients/{id}` — replaces name, email, address and date of birth.
pub async fn update<S>(
  State(service): State<Arc<PatientService<S>>>,
  PathParam(id): PathParam<Uuid>,
  JsonBody(body): JsonBody<PatientRequest>,
) -> Result<Json<PatientResponse>, ApiError>
where
  S: PatientStore,
{
  let patient = service.update(id, body).await?;
  Ok(Json(PatientResponse::from(&patient)))
}

// ─── Status transitions ───────────────────────────────────────────────────────

/// `PUT /patients/{id}/deactivate` — the record stays, but can no longer be
/// edited.
pub async fn deactivate<S>(
  State(service): State<Arc<PatientService<S>>>,
  PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PatientStore,
{
  service.deactivate(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

/// `PUT /patients/{id}/activate`
pub async fn activate<S>(
  State(service): State<Arc<PatientService<S>>>,
  PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PatientStore,
{
  service.activate(id).await?;
  Ok(StatusCode::NO_CONTENT)
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /patients/{id}`
pub async fn delete<S>(
  State(service): State<Arc<PatientService<S>>>,
  PathParam(id): PathParam<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: PatientStore,
{
  service.delete(id).await?;
  Ok(StatusCode::NO_CONTENT)
}
