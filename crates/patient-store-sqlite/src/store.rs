//! [`SqliteStore`] — the SQLite implementation of [`PatientStore`].

use std::path::Path;

use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use patient_core::{patient::Patient, store::PatientStore};

use crate::{
  Error, Result,
  encode::{PATIENT_COLUMNS, PatientRow, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A patient store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert(&self, id: Uuid, patient: Patient) -> Result<Patient> {
    let row = PatientRow::from_patient(id, &patient);
    let email = row.email.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO patients (
             patient_id, name, email, address,
             date_of_birth, registered_date, status, deactivated_date
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
          rusqlite::params![
            row.patient_id,
            row.name,
            row.email,
            row.address,
            row.date_of_birth,
            row.registered_date,
            row.status,
            row.deactivated_date,
          ],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| write_error(e, email))?;

    Ok(patient)
  }

  /// Overwrite the row for `id`. A row deleted since `patient` was loaded
  /// stays deleted.
  async fn update(&self, id: Uuid, patient: Patient) -> Result<Patient> {
    let row = PatientRow::from_patient(id, &patient);
    let email = row.email.clone();

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE patients SET
             name             = ?2,
             email            = ?3,
             address          = ?4,
             date_of_birth    = ?5,
             registered_date  = ?6,
             status           = ?7,
             deactivated_date = ?8
           WHERE patient_id = ?1",
          rusqlite::params![
            row.patient_id,
            row.name,
            row.email,
            row.address,
            row.date_of_birth,
            row.registered_date,
            row.status,
            row.deactivated_date,
          ],
        )?)
      })
      .await
      .map_err(|e| write_error(e, email))?;

    if changed == 0 {
      return Err(Error::Missing(id));
    }
    Ok(patient)
  }

  async fn exists(&self, email: String, except: Option<Uuid>) -> Result<bool> {
    let except_str = except.map(encode_uuid);

    let exists = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT EXISTS (
             SELECT 1 FROM patients
             WHERE email = ?1
               AND (?2 IS NULL OR patient_id != ?2)
           )",
          rusqlite::params![email, except_str],
          |row| row.get::<_, bool>(0),
        )?)
      })
      .await?;
    Ok(exists)
  }
}

/// Whether `e` is the `UNIQUE(email)` index rejecting a write.
fn is_unique_email_violation(e: &tokio_rusqlite::Error) -> bool {
  matches!(
    e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(err, Some(msg)))
      if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
        && msg.contains("patients.email")
  )
}

fn write_error(e: tokio_rusqlite::Error, email: String) -> Error {
  if is_unique_email_violation(&e) {
    tracing::debug!(%email, "unique email index rejected write");
    Error::DuplicateEmail(email)
  } else {
    Error::Database(e)
  }
}

// ─── PatientStore impl ───────────────────────────────────────────────────────

impl PatientStore for SqliteStore {
  type Error = Error;

  async fn save(&self, patient: Patient) -> Result<Patient> {
    match patient.id() {
      None => {
        let id = Uuid::new_v4();
        self.insert(id, patient.with_id(id)).await
      }
      Some(id) => self.update(id, patient).await,
    }
  }

  async fn find_by_id(&self, id: Uuid) -> Result<Option<Patient>> {
    let id_str = encode_uuid(id);

    let raw: Option<PatientRow> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PATIENT_COLUMNS} FROM patients WHERE patient_id = ?1"),
            rusqlite::params![id_str],
            PatientRow::from_sql,
          )
          .optional()?)
      })
      .await?;

    raw.map(PatientRow::into_patient).transpose()
  }

  async fn find_all(&self) -> Result<Vec<Patient>> {
    let raws: Vec<PatientRow> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {PATIENT_COLUMNS} FROM patients ORDER BY rowid"))?;
        let rows = stmt
          .query_map([], PatientRow::from_sql)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(PatientRow::into_patient).collect()
  }

  async fn delete(&self, id: Uuid) -> Result<bool> {
    let id_str = encode_uuid(id);

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM patients WHERE patient_id = ?1",
          rusqlite::params![id_str],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }

  async fn exists_by_email(&self, email: &str) -> Result<bool> {
    self.exists(email.to_owned(), None).await
  }

  async fn exists_by_email_and_id_not(&self, email: &str, id: Uuid) -> Result<bool> {
    self.exists(email.to_owned(), Some(id)).await
  }
}
