//! Loosely-typed create/update input, as received from a caller.

use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
  Error, Result,
  patient::{NewPatient, PatientChanges},
};

/// Fields of a create or update request. Dates are ISO-8601 calendar dates
/// (`YYYY-MM-DD`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatientRequest {
  pub name:            Option<String>,
  pub email:           Option<String>,
  pub address:         Option<String>,
  pub date_of_birth:   Option<String>,
  pub registered_date: Option<String>,
}

impl PatientRequest {
  /// Extract the fields needed to register a new patient.
  pub fn into_new_patient(self) -> Result<NewPatient> {
    Ok(NewPatient {
      name:            required("name", self.name)?,
      email:           required("email", self.email)?,
      address:         required("address", self.address)?,
      date_of_birth:   parse_date("date_of_birth", self.date_of_birth)?,
      registered_date: parse_date("registered_date", self.registered_date)?,
    })
  }

  /// Extract the fields an update may change. `registered_date` is ignored.
  pub fn into_changes(self) -> Result<PatientChanges> {
    Ok(PatientChanges {
      name:          required("name", self.name)?,
      email:         required("email", self.email)?,
      address:       required("address", self.address)?,
      date_of_birth: parse_date("date_of_birth", self.date_of_birth)?,
    })
  }
}

fn required(field: &'static str, value: Option<String>) -> Result<String> {
  value.ok_or_else(|| Error::validation(field, "is required"))
}

fn parse_date(field: &'static str, value: Option<String>) -> Result<NaiveDate> {
  let raw = required(field, value)?;
  NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
    .map_err(|e| Error::validation(field, format!("{raw:?} is not a date: {e}")))
}
