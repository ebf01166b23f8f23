//! Encoding and decoding between the domain [`Patient`] and the plain-text
//! row stored in SQLite.
//!
//! Calendar dates are stored as ISO 8601 (`YYYY-MM-DD`) strings, UUIDs as
//! hyphenated lowercase strings, and the status as `ACTIVE` / `INACTIVE`.
//! [`PatientRow`] never leaves this crate.

use chrono::NaiveDate;
use patient_core::patient::{NewPatient, Patient, PatientStatus};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── PatientStatus ───────────────────────────────────────────────────────────

pub fn encode_status(s: PatientStatus) -> &'static str {
  match s {
    PatientStatus::Active => "ACTIVE",
    PatientStatus::Inactive => "INACTIVE",
  }
}

pub fn decode_status(s: &str) -> Result<PatientStatus> {
  match s {
    "ACTIVE" => Ok(PatientStatus::Active),
    "INACTIVE" => Ok(PatientStatus::Inactive),
    other => Err(Error::UnknownStatus(other.to_owned())),
  }
}

// ─── Row type ────────────────────────────────────────────────────────────────

/// Raw strings read from, or written to, a `patients` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientRow {
  pub patient_id:       String,
  pub name:             String,
  pub email:            String,
  pub address:          String,
  pub date_of_birth:    String,
  pub registered_date:  String,
  pub status:           String,
  pub deactivated_date: Option<String>,
}

impl PatientRow {
  /// Build the row for `patient`, stored under `id`.
  pub fn from_patient(id: Uuid, patient: &Patient) -> Self {
    Self {
      patient_id:       encode_uuid(id),
      name:             patient.name().to_owned(),
      email:            patient.email().to_owned(),
      address:          patient.address().to_owned(),
      date_of_birth:    encode_date(patient.date_of_birth()),
      registered_date:  encode_date(patient.registered_date()),
      status:           encode_status(patient.status()).to_owned(),
      deactivated_date: patient.deactivated_date().map(encode_date),
    }
  }

  pub fn into_patient(self) -> Result<Patient> {
    let id = decode_uuid(&self.patient_id)?;
    let input = NewPatient {
      name:            self.name,
      email:           self.email,
      address:         self.address,
      date_of_birth:   decode_date(&self.date_of_birth)?,
      registered_date: decode_date(&self.registered_date)?,
    };
    let status = decode_status(&self.status)?;
    let deactivated_date = self
      .deactivated_date
      .as_deref()
      .map(decode_date)
      .transpose()?;

    Patient::restore(id, input, status, deactivated_date).map_err(|e| {
      Error::Corrupt {
        id:     self.patient_id,
        reason: e.to_string(),
      }
    })
  }

  pub fn from_sql(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      patient_id:       row.get(0)?,
      name:             row.get(1)?,
      email:            row.get(2)?,
      address:          row.get(3)?,
      date_of_birth:    row.get(4)?,
      registered_date:  row.get(5)?,
      status:           row.get(6)?,
      deactivated_date: row.get(7)?,
    })
  }
}

/// Column list matching [`PatientRow::from_sql`].
pub const PATIENT_COLUMNS: &str = "patient_id, name, email, address, \
                                   date_of_birth, registered_date, status, \
                                   deactivated_date";
