//! Error types for `patient-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  /// A required field is missing, blank, malformed, or out of range.
  #[error("invalid {field}: {reason}")]
  Validation {
    field:  &'static str,
    reason: String,
  },

  #[error("a patient with email {0:?} already exists")]
  DuplicateEmail(String),

  #[error("patient not found: {0}")]
  NotFound(Uuid),

  /// An update or deactivation was attempted on an inactive patient.
  #[error("patient {0} is inactive")]
  InactivePatient(Uuid),

  #[error("patient is already active")]
  AlreadyActive,

  #[error("patient is already inactive")]
  AlreadyInactive,

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
    Self::Validation { field, reason: reason.into() }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
