//! Doctor models.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::validation::{non_empty, ValidationError, ValidationResult};
use super::{Appointment, Entity, MedicalRecord, Shared};

/// Raw `doctors` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DoctorRow {
    pub id: i64,
    pub name: String,
    pub specialization: String,
}

/// A doctor with the appointments and medical records they are attached to.
#[derive(Debug, Clone)]
pub struct Doctor {
    id: Option<i64>,
    name: String,
    specialization: String,
    appointments: Vec<Shared<Appointment>>,
    medical_records: Vec<Shared<MedicalRecord>>,
}

impl Doctor {
    /// Create an unsaved doctor.
    pub fn new(
        name: impl Into<String>,
        specialization: impl Into<String>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        let specialization = specialization.into();
        non_empty("name", &name)?;
        non_empty("specialization", &specialization)?;

        Ok(Self {
            id: None,
            name,
            specialization,
            appointments: Vec::new(),
            medical_records: Vec::new(),
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn specialization(&self) -> &str {
        &self.specialization
    }

    pub fn appointments(&self) -> &[Shared<Appointment>] {
        &self.appointments
    }

    pub fn medical_records(&self) -> &[Shared<MedicalRecord>] {
        &self.medical_records
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        let name = name.into();
        non_empty("name", &name)?;
        self.name = name;
        Ok(())
    }

    pub fn set_specialization(
        &mut self,
        specialization: impl Into<String>,
    ) -> ValidationResult<()> {
        let specialization = specialization.into();
        non_empty("specialization", &specialization)?;
        self.specialization = specialization;
        Ok(())
    }

    pub(crate) fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    pub(crate) fn replace_relations(
        &mut self,
        appointments: Vec<Shared<Appointment>>,
        medical_records: Vec<Shared<MedicalRecord>>,
    ) {
        self.appointments = appointments;
        self.medical_records = medical_records;
    }
}

impl TryFrom<DoctorRow> for Doctor {
    type Error = ValidationError;

    fn try_from(row: DoctorRow) -> Result<Self, Self::Error> {
        let mut doctor = Doctor::new(row.name, row.specialization)?;
        doctor.id = Some(row.id);
        Ok(doctor)
    }
}

impl Entity for Doctor {
    type Row = DoctorRow;

    const NAME: &'static str = "doctor";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn row_id(row: &DoctorRow) -> i64 {
        row.id
    }

    fn from_row(row: DoctorRow) -> ValidationResult<Self> {
        Self::try_from(row)
    }

    fn apply_row(&mut self, row: DoctorRow) -> ValidationResult<()> {
        let fresh = Self::try_from(row)?;
        self.name = fresh.name;
        self.specialization = fresh.specialization;
        Ok(())
    }
}

impl fmt::Display for Doctor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Doctor #{}: {} ({}) ({} appointments, {} medical records)",
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            self.name,
            self.specialization,
            self.appointments.len(),
            self.medical_records.len(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_doctor() {
        let doctor = Doctor::new("Smith", "Cardiology").unwrap();
        assert_eq!(doctor.name(), "Smith");
        assert_eq!(doctor.specialization(), "Cardiology");
        assert_eq!(doctor.id(), None);
    }

    #[test]
    fn test_rejects_empty_fields() {
        assert_eq!(
            Doctor::new("", "Cardiology").unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
        assert_eq!(
            Doctor::new("Smith", "").unwrap_err(),
            ValidationError::Empty { field: "specialization" }
        );

        let mut doctor = Doctor::new("Smith", "Cardiology").unwrap();
        assert!(doctor.set_specialization("").is_err());
        assert_eq!(doctor.specialization(), "Cardiology");
    }

    #[test]
    fn test_from_row_keeps_id() {
        let doctor = Doctor::try_from(DoctorRow {
            id: 7,
            name: "Jones".into(),
            specialization: "Neurology".into(),
        })
        .unwrap();
        assert_eq!(doctor.id(), Some(7));
    }
}
