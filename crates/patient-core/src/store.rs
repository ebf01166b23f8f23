//! The `PatientStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `patient-store-sqlite`).
//! The lifecycle service depends on this abstraction, not on any concrete
//! backend.

use std::future::Future;

use uuid::Uuid;

use crate::patient::Patient;

/// Durable storage for patients, keyed by identifier.
///
/// Backends are expected to enforce email uniqueness themselves (e.g. with a
/// unique index) and to report a violation as
/// [`Error::DuplicateEmail`](crate::Error::DuplicateEmail) once converted
/// into the core error type. The service's own uniqueness check runs first
/// but cannot close the race between two concurrent writers.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait PatientStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + Into<crate::Error> + 'static;

  /// Persist `patient`. A patient without an identifier is inserted and
  /// given a fresh one; otherwise the stored record is replaced, and a
  /// record that has since been deleted is reported as
  /// [`Error::NotFound`](crate::Error::NotFound) rather than recreated.
  fn save(
    &self,
    patient: Patient,
  ) -> impl Future<Output = Result<Patient, Self::Error>> + Send + '_;

  /// Retrieve a patient by identifier. Returns `None` if not found.
  fn find_by_id(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Patient>, Self::Error>> + Send + '_;

  /// All patients, active and inactive, in insertion order.
  fn find_all(
    &self,
  ) -> impl Future<Output = Result<Vec<Patient>, Self::Error>> + Send + '_;

  /// Remove a patient. Returns `false` if there was nothing to remove.
  fn delete(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  fn exists_by_email<'a>(
    &'a self,
    email: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// Like [`PatientStore::exists_by_email`], ignoring the patient `id`.
  fn exists_by_email_and_id_not<'a>(
    &'a self,
    email: &'a str,
    id: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
