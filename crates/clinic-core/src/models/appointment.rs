//! Appointment models.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{positive, ValidationError, ValidationResult};
use super::Entity;

/// Raw `appointments` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppointmentRow {
    pub id: i64,
    pub appointment_date: String,
    pub patient_id: i64,
    pub doctor_id: i64,
    pub notes: Option<String>,
}

/// A scheduled visit between a patient and a doctor.
#[derive(Debug, Clone, PartialEq)]
pub struct Appointment {
    id: Option<i64>,
    /// Free text; no date format is enforced.
    appointment_date: String,
    patient_id: i64,
    doctor_id: i64,
    notes: Option<String>,
}

impl Appointment {
    /// Create an unsaved appointment.
    pub fn new(
        appointment_date: impl Into<String>,
        patient_id: i64,
        doctor_id: i64,
        notes: Option<String>,
    ) -> ValidationResult<Self> {
        positive("patient_id", patient_id)?;
        positive("doctor_id", doctor_id)?;

        Ok(Self {
            id: None,
            appointment_date: appointment_date.into(),
            patient_id,
            doctor_id,
            notes,
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn appointment_date(&self) -> &str {
        &self.appointment_date
    }

    pub fn patient_id(&self) -> i64 {
        self.patient_id
    }

    pub fn doctor_id(&self) -> i64 {
        self.doctor_id
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_appointment_date(&mut self, appointment_date: impl Into<String>) {
        self.appointment_date = appointment_date.into();
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

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }
}

impl TryFrom<AppointmentRow> for Appointment {
    type Error = ValidationError;

    fn try_from(row: AppointmentRow) -> Result<Self, Self::Error> {
        let mut appointment =
            Appointment::new(row.appointment_date, row.patient_id, row.doctor_id, row.notes)?;
        appointment.id = Some(row.id);
        Ok(appointment)
    }
}

impl Entity for Appointment {
    type Row = AppointmentRow;

    const NAME: &'static str = "appointment";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn row_id(row: &AppointmentRow) -> i64 {
        row.id
    }

    fn from_row(row: AppointmentRow) -> ValidationResult<Self> {
        Self::try_from(row)
    }

    fn apply_row(&mut self, row: AppointmentRow) -> ValidationResult<()> {
        let fresh = Self::try_from(row)?;
        *self = Self { id: self.id, ..fresh };
        Ok(())
    }
}

impl fmt::Display for Appointment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Appointment #{}: {} patient {} with doctor {}",
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            self.appointment_date,
            self.patient_id,
            self.doctor_id,
        )?;
        if let Some(notes) = &self.notes {
            write!(f, " ({})", notes)?;
        }
        Ok(())
    }
}
