//! Email uniqueness as a pure decision.
//!
//! The check that answers "is this email taken?" is supplied by the caller,
//! usually from a [`PatientStore`](crate::store::PatientStore) query. Nothing
//! here touches storage.

use crate::{Error, Result};

/// Fail with [`Error::DuplicateEmail`] if `exists` reports `email` as taken.
pub fn validate_email_unique<F>(email: &str, exists: F) -> Result<()>
where
  F: FnOnce(&str) -> bool,
{
  if exists(email) {
    return Err(Error::DuplicateEmail(email.to_owned()));
  }
  Ok(())
}
