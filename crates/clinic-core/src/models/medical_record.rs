//! Medical record models.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{non_empty, positive, ValidationError, ValidationResult};
use super::Entity;

/// Raw `medical_records` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicalRecordRow {
    pub id: i64,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub record_date: String,
    pub diagnosis: String,
    pub treatment: String,
}

/// A diagnosis and treatment written by a doctor for a patient.
#[derive(Debug, Clone, PartialEq)]
pub struct MedicalRecord {
    id: Option<i64>,
    patient_id: i64,
    doctor_id: i64,
    record_date: String,
    diagnosis: String,
    treatment: String,
}

impl MedicalRecord {
    /// Create an unsaved medical record.
    pub fn new(
        patient_id: i64,
        doctor_id: i64,
        record_date: impl Into<String>,
        diagnosis: impl Into<String>,
        treatment: impl Into<String>,
    ) -> ValidationResult<Self> {
        let diagnosis = diagnosis.into();
        let treatment = treatment.into();
        positive("patient_id", patient_id)?;
        positive("doctor_id", doctor_id)?;
        non_empty("diagnosis", &diagnosis)?;
        non_empty("treatment", &treatment)?;

        Ok(Self {
            id: None,
            patient_id,
            doctor_id,
            record_date: record_date.into(),
            diagnosis,
            treatment,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    pub fn doctor_id(&self) -> i64 {
        self.doctor_id
    }

    pub fn record_date(&self) -> &str {
        &self.record_date
    }

    pub fn diagnosis(&self) -> &str {
        &self.diagnosis
    }

    pub fn treatment(&self) -> &str {
        &self.treatment
    }

    pub fn set_patient_id(&mut self, patient_id: i64) -> ValidationResult<()> {
        positive("patient_id", patient_id)?;
        self.patient_id = patient_id;
        Ok(())
    }

    pub fn set_doctor_id(&mut self, doctor_id: i64) -> ValidationResult<()> {
        positive("doctor_id", doctor_id)?;
        self.doctor_id = doctor_id;
        Ok(())
    }

    pub fn set_record_date(&mut self, record_date: impl Into<String>) {
        self.record_date = record_date.into();
    }

    pub fn set_diagnosis(&mut self, diagnosis: impl Into<String>) -> ValidationResult<()> {
        let diagnosis = diagnosis.into();
        non_empty("diagnosis", &diagnosis)?;
        self.diagnosis = diagnosis;
        Ok(())
    }

    pub fn set_treatment(&mut self, treatment: impl Into<String>) -> ValidationResult<()> {
        let treatment = treatment.into();
        non_empty("treatment", &treatment)?;
        self.treatment = treatment;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl TryFrom<MedicalRecordRow> for MedicalRecord {
    type Error = ValidationError;

    fn try_from(row: MedicalRecordRow) -> Result<Self, Self::Error> {
        let mut record = MedicalRecord::new(
            row.patient_id,
            row.doctor_id,
            row.record_date,
            row.diagnosis,
            row.treatment,
        )?;
        record.id = Some(row.id);
        Ok(record)
    }
}

impl Entity for MedicalRecord {
    type Row = MedicalRecordRow;

    const NAME: &'static str = "medical record";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn row_id(row: &MedicalRecordRow) -> i64 {
        row.id
    }

    fn from_row(row: MedicalRecordRow) -> ValidationResult<Self> {
        Self::try_from(row)
    }

    fn apply_row(&mut self, row: MedicalRecordRow) -> ValidationResult<()> {
        let fresh = Self::try_from(row)?;
        *self = Self { id: self.id, ..fresh };
        Ok(())
    }
}

impl fmt::Display for MedicalRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Medical record #{}: {} patient {} / doctor {}: {} -> {}",
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            self.record_date,
            self.patient_id,
            self.doctor_id,
            self.diagnosis,
            self.treatment,
        )
    }
}
