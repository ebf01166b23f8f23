//! Core types and trait definitions for the patient registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod patient;
pub mod request;
pub mod service;
pub mod store;
pub mod uniqueness;

pub use error::{Error, Result};
pub use patient::{NewPatient, Patient, PatientChanges, PatientStatus};
pub use request::PatientRequest;
pub use service::PatientService;
pub use store::PatientStore;
