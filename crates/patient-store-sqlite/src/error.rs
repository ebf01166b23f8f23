//! Error type for `patient-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  #[error("date parse error: {0}")]
  DateParse(String),

  #[error("unknown patient status: {0:?}")]
  UnknownStatus(String),

  /// A stored row could not be turned back into a valid patient.
  #[error("corrupt patient row {id}: {reason}")]
  Corrupt { id: String, reason: String },

  /// The `UNIQUE(email)` index rejected a write.
  #[error("a patient with email {0:?} already exists")]
  DuplicateEmail(String),

  /// An update targeted a row that no longer exists.
  #[error("no stored patient with id {0}")]
  Missing(uuid::Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<Error> for patient_core::Error {
  fn from(e: Error) -> Self {
    match e {
      Error::Missing(id) => Self::NotFound(id),
      Error::DuplicateEmail(email) => Self::DuplicateEmail(email),
      other => Self::Store(Box::new(other)),
    }
  }
}
