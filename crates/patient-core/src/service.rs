//! [`PatientService`] — sequences validation, domain transitions and
//! persistence for one patient operation at a time.
//!
//! Every operation finishes its checks before its single write, so a failed
//! call leaves the store untouched.

use std::sync::Arc;

use uuid::Uuid;

use crate::{
  Error, Result,
  patient::{Patient, today},
  request::PatientRequest,
  store::PatientStore,
  uniqueness::validate_email_unique,
};

/// Create, update, deactivate and otherwise manage patients held in `S`.
pub struct PatientService<S> {
  store: Arc<S>,
}

impl<S> Clone for PatientService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: PatientStore> PatientService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// Every patient, active or not.
  pub async fn list(&self) -> Result<Vec<Patient>> {
    self.store.find_all().await.map_err(store_error)
  }

  pub async fn get(&self, id: Uuid) -> Result<Patient> { self.load(id).await }

  /// Register a new, active patient.
  pub async fn create(&self, request: PatientRequest) -> Result<Patient> {
    let input = request.into_new_patient()?;

    let taken = self
      .store
      .exists_by_email(&input.email)
      .await
      .map_err(store_error)?;
    validate_email_unique(&input.email, |_| taken)?;

    let patient = Patient::new(input)?;
    let saved = self.store.save(patient).await.map_err(store_error)?;

    tracing::info!(patient_id = ?saved.id(), "patient created");
    Ok(saved)
  }

  /// Replace the mutable fields of an active patient.
  pub async fn update(&self, id: Uuid, request: PatientRequest) -> Result<Patient> {
    let current = self.load(id).await?;
    if !current.is_active() {
      return Err(Error::InactivePatient(id));
    }

    let changes = request.into_changes()?;

    let taken = self
      .store
      .exists_by_email_and_id_not(&changes.email, id)
      .await
      .map_err(store_error)?;
    validate_email_unique(&changes.email, |_| taken)?;

    let revised = current
      .revise(changes, today())
      .map_err(|e| inactive_as_service_error(e, id))?;
    let saved = self.store.save(revised).await.map_err(store_error)?;

    tracing::info!(patient_id = %id, "patient updated");
    Ok(saved)
  }

  /// Mark a patient inactive as of today.
  pub async fn deactivate(&self, id: Uuid) -> Result<Patient> {
    let mut patient = self.load(id).await?;
    patient
      .deactivate(today())
      .map_err(|e| inactive_as_service_error(e, id))?;
    let saved = self.store.save(patient).await.map_err(store_error)?;

    tracing::info!(patient_id = %id, "patient deactivated");
    Ok(saved)
  }

  /// Return an inactive patient to active status.
  pub async fn activate(&self, id: Uuid) -> Result<Patient> {
    let mut patient = self.load(id).await?;
    patient.activate()?;
    let saved = self.store.save(patient).await.map_err(store_error)?;

    tracing::info!(patient_id = %id, "patient reactivated");
    Ok(saved)
  }

  /// Remove a patient record outright, whatever its status.
  pub async fn delete(&self, id: Uuid) -> Result<()> {
    let removed = self.store.delete(id).await.map_err(store_error)?;
    if !removed {
      return Err(Error::NotFound(id));
    }

    tracing::info!(patient_id = %id, "patient deleted");
    Ok(())
  }

  async fn load(&self, id: Uuid) -> Result<Patient> {
    self
      .store
      .find_by_id(id)
      .await
      .map_err(store_error)?
      .ok_or(Error::NotFound(id))
  }
}

fn inactive_as_service_error(err: Error, id: Uuid) -> Error {
  match err {
    Error::AlreadyInactive => Error::InactivePatient(id),
    other => other,
  }
}

fn store_error<E: Into<Error>>(err: E) -> Error { err.into() }
