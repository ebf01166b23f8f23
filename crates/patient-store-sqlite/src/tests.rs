//! Integration tests for `SqliteStore` against an in-memory database.

use std::sync::Arc;

use chrono::NaiveDate;
use patient_core::{
  NewPatient, Patient, PatientRequest, PatientService, PatientStatus,
  store::PatientStore,
};
use uuid::Uuid;

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn patient(name: &str, email: &str) -> Patient {
  Patient::new(NewPatient {
    name:            name.into(),
    email:           email.into(),
    address:         "1 Main St".into(),
    date_of_birth:   date(1990, 1, 1),
    registered_date: date(2024, 1, 1),
  })
  .unwrap()
}

// ─── Save / find ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn save_assigns_id_and_find_returns_it() {
  let s = store().await;

  let saved = s.save(patient("Jane Doe", "jane@x.com")).await.unwrap();
  let id = saved.id().expect("id assigned on first save");

  let fetched = s.find_by_id(id).await.unwrap().unwrap();
  assert_eq!(fetched.id(), Some(id));
  assert_eq!(fetched.name(), "Jane Doe");
  assert_eq!(fetched.email(), "jane@x.com");
  assert_eq!(fetched.date_of_birth(), date(1990, 1, 1));
  assert_eq!(fetched.registered_date(), date(2024, 1, 1));
  assert_eq!(fetched.status(), PatientStatus::Active);
}

#[tokio::test]
async fn find_missing_returns_none() {
  let s = store().await;
  assert!(s.find_by_id(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn saving_again_updates_in_place() {
  let s = store().await;
  let mut saved = s.save(patient("Jane Doe", "jane@x.com")).await.unwrap();
  let id = saved.id().unwrap();

  saved.deactivate(date(2025, 5, 1)).unwrap();
  let again = s.save(saved).await.unwrap();
  assert_eq!(again.id(), Some(id));

  let all = s.find_all().await.unwrap();
  assert_eq!(all.len(), 1);
  assert_eq!(all[0].status(), PatientStatus::Inactive);
  assert_eq!(all[0].deactivated_date(), Some(date(2025, 5, 1)));
}

#[tokio::test]
async fn find_all_is_in_insertion_order() {
  let s = store().await;
  for (name, email) in [("C", "c@x.com"), ("A", "a@x.com"), ("B", "b@x.com")] {
    s.save(patient(name, email)).await.unwrap();
  }

  let names: Vec<_> = s
    .find_all()
    .await
    .unwrap()
    .iter()
    .map(|p| p.name().to_owned())
    .collect();
  assert_eq!(names, ["C", "A", "B"]);
}

// ─── Uniqueness ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn unique_index_rejects_duplicate_email() {
  let s = store().await;
  s.save(patient("Jane Doe", "jane@x.com")).await.unwrap();

  let err = s.save(patient("Other Jane", "jane@x.com")).await.unwrap_err();
  assert!(matches!(err, crate::Error::DuplicateEmail(ref e) if e == "jane@x.com"));

  let core: patient_core::Error = err.into();
  assert!(matches!(core, patient_core::Error::DuplicateEmail(_)));
  assert_eq!(s.find_all().await.unwrap().len(), 1);
}

#[tokio::test]
async fn exists_by_email_checks() {
  let s = store().await;
  let jane = s.save(patient("Jane Doe", "jane@x.com")).await.unwrap();
  let id = jane.id().unwrap();

  assert!(s.exists_by_email("jane@x.com").await.unwrap());
  assert!(!s.exists_by_email("bob@x.com").await.unwrap());

  assert!(!s.exists_by_email_and_id_not("jane@x.com", id).await.unwrap());
  assert!(
    s.exists_by_email_and_id_not("jane@x.com", Uuid::new_v4())
      .await
      .unwrap()
  );
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_reports_whether_a_row_went_away() {
  let s = store().await;
  let id = s
    .save(patient("Jane Doe", "jane@x.com"))
    .await
    .unwrap()
    .id()
    .unwrap();

  assert!(s.delete(id).await.unwrap());
  assert!(!s.delete(id).await.unwrap());
  assert!(s.find_by_id(id).await.unwrap().is_none());
}

#[tokio::test]
async fn saving_a_deleted_patient_does_not_recreate_it() {
  let s = store().await;
  let id = s
    .save(patient("Jane Doe", "jane@x.com"))
    .await
    .unwrap()
    .id()
    .unwrap();
  let mut loaded = s.find_by_id(id).await.unwrap().unwrap();

  assert!(s.delete(id).await.unwrap());

  loaded.deactivate(date(2025, 5, 1)).unwrap();
  let err = s.save(loaded).await.unwrap_err();
  assert!(matches!(err, crate::Error::Missing(missing) if missing == id));

  let core: patient_core::Error = err.into();
  assert!(matches!(core, patient_core::Error::NotFound(missing) if missing == id));
  assert!(s.find_by_id(id).await.unwrap().is_none());
  assert!(s.find_all().await.unwrap().is_empty());
}

// ─── Through the service ─────────────────────────────────────────────────────

fn request(name: &str, email: &str) -> PatientRequest {
  PatientRequest {
    name:            Some(name.into()),
    email:           Some(email.into()),
    address:         Some("1 Main St".into()),
    date_of_birth:   Some("1990-01-01".into()),
    registered_date: Some("2024-01-01".into()),
  }
}

#[tokio::test]
async fn lifecycle_scenario() {
  let svc = PatientService::new(Arc::new(store().await));

  let jane = svc.create(request("Jane Doe", "jane@x.com")).await.unwrap();
  assert!(jane.is_active());
  let id = jane.id().unwrap();

  let dup = svc
    .create(request("Jane Again", "jane@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(dup, patient_core::Error::DuplicateEmail(_)));

  let deactivated = svc.deactivate(id).await.unwrap();
  assert_eq!(deactivated.status(), PatientStatus::Inactive);
  assert_eq!(deactivated.deactivated_date(), Some(patient_core::patient::today()));

  let err = svc
    .update(id, request("Jane Smith", "jane@x.com"))
    .await
    .unwrap_err();
  assert!(matches!(err, patient_core::Error::InactivePatient(_)));

  let err = svc.deactivate(Uuid::new_v4()).await.unwrap_err();
  assert!(matches!(err, patient_core::Error::NotFound(_)));
}

#[tokio::test]
async fn update_keeping_own_email_succeeds() {
  let svc = PatientService::new(Arc::new(store().await));
  let id = svc
    .create(request("Jane Doe", "jane@x.com"))
    .await
    .unwrap()
    .id()
    .unwrap();

  let updated = svc
    .update(id, request("Jane Smith", "jane@x.com"))
    .await
    .unwrap();
  assert_eq!(updated.name(), "Jane Smith");

  let stored = svc.get(id).await.unwrap();
  assert_eq!(stored.name(), "Jane Smith");
  assert_eq!(stored.email(), "jane@x.com");
}
