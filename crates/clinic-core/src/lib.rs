//! Clinic Records Core Library
//!
//! Data-access layer for a small clinic: patients, doctors, appointments and
//! medical records stored in SQLite.
//!
//! # Architecture
//!
//! ```text
//!   caller (CLI)
//!        │
//!        ▼
//!   Repository ──► IdentityMap ── hit: refresh in place
//!        │                      └─ miss: validate + register
//!        ▼
//!    Database (rusqlite)
//!        │
//!        ▼  Patient / Doctor only
//!    Hydrator ──► AppointmentRepository::find_by_{patient,doctor}_id
//!             └─► MedicalRecordRepository::find_by_{patient,doctor}_id
//! ```
//!
//! # Core Principle
//!
//! **One instance per row.** Every lookup path goes through the owning
//! repository's identity map, so all holders of a loaded entity observe the
//! same values.
//!
//! # Modules
//!
//! - [`db`]: SQLite schema and per-table row operations
//! - [`models`]: Validated entities, raw row types and validation rules
//! - [`repository`]: Entity managers, identity map and hydrator
//! - [`seed`]: Sample patient data
//! - [`export`]: JSON export of every table

pub mod db;
pub mod export;
pub mod models;
pub mod repository;
pub mod seed;

// Re-export commonly used types
pub use db::{Database, DatabaseOptions, DbError, DbResult};
pub use export::ClinicExport;
pub use models::{
    Appointment, Doctor, Entity, Gender, MedicalRecord, Patient, Shared, ValidationError,
};
pub use repository::{
    AppointmentRepository, DoctorRepository, Hydrator, IdentityMap, MedicalRecordRepository,
    PatientRepository,
};
