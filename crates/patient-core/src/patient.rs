//! The patient entity and its lifecycle transitions.
//!
//! A [`Patient`] can only be obtained through a validating constructor, and
//! its status only changes through [`Patient::deactivate`] and
//! [`Patient::activate`]. Field edits produce a new validated value via
//! [`Patient::revise`].

use std::hash::{Hash, Hasher};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Status ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PatientStatus {
  Active,
  Inactive,
}

// ─── Inputs ──────────────────────────────────────────────────────────────────

/// Input to [`Patient::new`]. Every field is checked by the constructor.
#[derive(Debug, Clone)]
pub struct NewPatient {
  pub name:            String,
  pub email:           String,
  pub address:         String,
  pub date_of_birth:   NaiveDate,
  pub registered_date: NaiveDate,
}

/// The mutable subset of a patient's fields, as accepted by
/// [`Patient::revise`]. The registered date is fixed at creation.
#[derive(Debug, Clone)]
pub struct PatientChanges {
  pub name:          String,
  pub email:         String,
  pub address:       String,
  pub date_of_birth: NaiveDate,
}

// ─── Entity ──────────────────────────────────────────────────────────────────

/// A person under care.
///
/// Equality and hashing consider only the email address: two values with the
/// same email are the same patient for comparison purposes, whatever their
/// identifiers or other fields. Storage-level uniqueness is enforced
/// separately by the store.
#[derive(Debug, Clone)]
pub struct Patient {
  id:               Option<Uuid>,
  name:             String,
  email:            String,
  address:          String,
  date_of_birth:    NaiveDate,
  registered_date:  NaiveDate,
  status:           PatientStatus,
  deactivated_date: Option<NaiveDate>,
}

/// The current calendar date in UTC.
pub fn today() -> NaiveDate { Utc::now().date_naive() }

impl Patient {
  /// Validate `input` against today's date and build an active patient with
  /// no identifier.
  pub fn new(input: NewPatient) -> Result<Self> { Self::new_on(input, today()) }

  /// Like [`Patient::new`], with an explicit notion of "today".
  pub fn new_on(input: NewPatient, today: NaiveDate) -> Result<Self> {
    check_text("name", &input.name)?;
    check_email(&input.email)?;
    check_text("address", &input.address)?;
    check_birth_date(input.date_of_birth, today)?;

    Ok(Self {
      id:               None,
      name:             input.name,
      email:            input.email,
      address:          input.address,
      date_of_birth:    input.date_of_birth,
      registered_date:  input.registered_date,
      status:           PatientStatus::Active,
      deactivated_date: None,
    })
  }

  /// Rebuild a previously stored patient.
  ///
  /// The text fields are re-checked and an inactive status is re-applied
  /// through [`Patient::deactivate`], so a stored record cannot produce an
  /// entity that breaks the status invariants. The birth date is not compared
  /// against today; that rule applies when a patient is created or revised.
  pub fn restore(
    id: Uuid,
    input: NewPatient,
    status: PatientStatus,
    deactivated_date: Option<NaiveDate>,
  ) -> Result<Self> {
    check_text("name", &input.name)?;
    check_email(&input.email)?;
    check_text("address", &input.address)?;

    let mut patient = Self {
      id:               Some(id),
      name:             input.name,
      email:            input.email,
      address:          input.address,
      date_of_birth:    input.date_of_birth,
      registered_date:  input.registered_date,
      status:           PatientStatus::Active,
      deactivated_date: None,
    };

    match (status, deactivated_date) {
      (PatientStatus::Active, None) => {}
      (PatientStatus::Inactive, Some(date)) => patient.deactivate(date)?,
      (PatientStatus::Active, Some(_)) => {
        return Err(Error::validation(
          "deactivated_date",
          "must be empty for an active patient",
        ));
      }
      (PatientStatus::Inactive, None) => {
        return Err(Error::validation(
          "deactivated_date",
          "is required for an inactive patient",
        ));
      }
    }

    Ok(patient)
  }

  // ── Accessors ───────────────────────────────────────────────────────────

  /// The store-assigned identifier; `None` until the first save.
  pub fn id(&self) -> Option<Uuid> { self.id }

  pub fn name(&self) -> &str { &self.name }

  pub fn email(&self) -> &str { &self.email }

  pub fn address(&self) -> &str { &self.address }

  pub fn date_of_birth(&self) -> NaiveDate { self.date_of_birth }

  pub fn registered_date(&self) -> NaiveDate { self.registered_date }

  pub fn status(&self) -> PatientStatus { self.status }

  pub fn deactivated_date(&self) -> Option<NaiveDate> { self.deactivated_date }

  pub fn is_active(&self) -> bool { self.status == PatientStatus::Active }

  // ── Transitions ─────────────────────────────────────────────────────────

  /// Mark the patient inactive as of `date`. Leaves the patient untouched if
  /// it is already inactive.
  pub fn deactivate(&mut self, date: NaiveDate) -> Result<()> {
    if !self.is_active() {
      return Err(Error::AlreadyInactive);
    }
    self.status = PatientStatus::Inactive;
    self.deactivated_date = Some(date);
    Ok(())
  }

  /// Return an inactive patient to active status and clear its deactivation
  /// date.
  pub fn activate(&mut self) -> Result<()> {
    if self.is_active() {
      return Err(Error::AlreadyActive);
    }
    self.status = PatientStatus::Active;
    self.deactivated_date = None;
    Ok(())
  }

  /// Apply `changes`, returning a new patient validated by the same rules as
  /// the constructor. Identity, registered date and status carry over.
  pub fn revise(&self, changes: PatientChanges, today: NaiveDate) -> Result<Self> {
    if !self.is_active() {
      return Err(Error::AlreadyInactive);
    }

    let mut revised = Self::new_on(
      NewPatient {
        name:            changes.name,
        email:           changes.email,
        address:         changes.address,
        date_of_birth:   changes.date_of_birth,
        registered_date: self.registered_date,
      },
      today,
    )?;
    revised.id = self.id;
    Ok(revised)
  }

  /// Attach the identifier chosen by a store on first save.
  ///
  /// Has no effect if the patient already has an identifier.
  pub fn with_id(mut self, id: Uuid) -> Self {
    self.id.get_or_insert(id);
    self
  }
}

impl PartialEq for Patient {
  fn eq(&self, other: &Self) -> bool { self.email == other.email }
}

impl Eq for Patient {}

impl Hash for Patient {
  fn hash<H: Hasher>(&self, state: &mut H) { self.email.hash(state); }
}

// ─── Field checks ────────────────────────────────────────────────────────────

fn check_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    return Err(Error::validation(field, "is required"));
  }
  Ok(())
}

fn check_email(email: &str) -> Result<()> {
  check_text("email", email)?;

  let well_formed = !email.chars().any(char::is_whitespace)
    && matches!(
      email.split_once('@'),
      Some((local, domain))
        if !local.is_empty() && !domain.is_empty() && !domain.contains('@')
    );
  if !well_formed {
    return Err(Error::validation("email", "must be a valid email address"));
  }
  Ok(())
}

fn check_birth_date(date_of_birth: NaiveDate, today: NaiveDate) -> Result<()> {
  if date_of_birth >= today {
    return Err(Error::validation("date_of_birth", "must be in the past"));
  }
  Ok(())
}
