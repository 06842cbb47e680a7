//! JSON export of every table.
//!
//! Reads raw rows straight from the database, bypassing the repositories,
//! so exporting never touches any identity map.

use serde::{Deserialize, Serialize};

use crate::db::{Database, DbResult};
use crate::models::{AppointmentRow, DoctorRow, MedicalRecordRow, PatientRow};

/// Snapshot of all four tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClinicExport {
    /// RFC 3339 timestamp of the export
    pub exported_at: String,
    pub patients: Vec<PatientRow>,
    pub doctors: Vec<DoctorRow>,
    pub appointments: Vec<AppointmentRow>,
    pub medical_records: Vec<MedicalRecordRow>,
}

impl ClinicExport {
    /// Collect every row.
    pub fn collect(db: &Database) -> DbResult<Self> {
        let export = Self {
            exported_at: chrono::Utc::now().to_rfc3339(),
            patients: db.list_patient_rows()?,
            doctors: db.list_doctor_rows()?,
            appointments: db.list_appointment_rows()?,
            medical_records: db.list_medical_record_rows()?,
        };
        tracing::debug!(
            patients = export.patients.len(),
            doctors = export.doctors.len(),
            appointments = export.appointments.len(),
            medical_records = export.medical_records.len(),
            "collected export"
        );
        Ok(export)
    }

    /// Total number of exported rows.
    pub fn row_count(&self) -> usize {
        self.patients.len()
            + self.doctors.len()
            + self.appointments.len()
            + self.medical_records.len()
    }

    /// Export to pretty-printed JSON.
    pub fn to_json(&self) -> DbResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
