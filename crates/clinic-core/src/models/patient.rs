//! Patient models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::validation::{non_empty, positive, ValidationError, ValidationResult};
use super::{Appointment, Entity, MedicalRecord, Shared};

/// Recorded patient gender.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Text form stored in the `gender` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl FromStr for Gender {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" => Ok(Gender::Male),
            "Female" => Ok(Gender::Female),
            "Other" => Ok(Gender::Other),
            other => Err(ValidationError::InvalidGender(other.to_string())),
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw `patients` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientRow {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub age: i64,
    pub gender: String,
}

/// A patient with their appointments and medical records.
///
/// The relation lists are filled by the patient repository every time the
/// patient is loaded and are never written back.
#[derive(Debug, Clone)]
pub struct Patient {
    id: Option<i64>,
    first_name: String,
    last_name: String,
    age: i64,
    gender: Gender,
    appointments: Vec<Shared<Appointment>>,
    medical_records: Vec<Shared<MedicalRecord>>,
}

impl Patient {
    /// Create an unsaved patient, validating every field.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i64,
        gender: &str,
    ) -> ValidationResult<Self> {
        let first_name = first_name.into();
        let last_name = last_name.into();
        non_empty("first_name", &first_name)?;
        non_empty("last_name", &last_name)?;
        positive("age", age)?;
        let gender = gender.parse()?;

        Ok(Self {
            id: None,
            first_name,
            last_name,
            age,
            gender,
            appointments: Vec::new(),
            medical_records: Vec::new(),
        })
    }

    pub fn id(&self) -> Option<i64> {
        self.id
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    /// "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn age(&self) -> i64 {
        self.age
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    /// Appointments as of the last load.
    pub fn appointments(&self) -> &[Shared<Appointment>] {
        &self.appointments
    }

    /// Medical records as of the last load.
    pub fn medical_records(&self) -> &[Shared<MedicalRecord>] {
        &self.medical_records
    }

    pub fn set_first_name(&mut self, first_name: impl Into<String>) -> ValidationResult<()> {
        let first_name = first_name.into();
        non_empty("first_name", &first_name)?;
        self.first_name = first_name;
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> ValidationResult<()> {
        let last_name = last_name.into();
        non_empty("last_name", &last_name)?;
        self.last_name = last_name;
        Ok(())
    }

    pub fn set_age(&mut self, age: i64) -> ValidationResult<()> {
        positive("age", age)?;
        self.age = age;
        Ok(())
    }

    pub fn set_gender(&mut self, gender: &str) -> ValidationResult<()> {
        self.gender = gender.parse()?;
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

impl TryFrom<PatientRow> for Patient {
    type Error = ValidationError;

    fn try_from(row: PatientRow) -> Result<Self, Self::Error> {
        let mut patient = Patient::new(row.first_name, row.last_name, row.age, &row.gender)?;
        patient.id = Some(row.id);
        Ok(patient)
    }
}

impl Entity for Patient {
    type Row = PatientRow;

    const NAME: &'static str = "patient";

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn row_id(row: &PatientRow) -> i64 {
        row.id
    }

    fn from_row(row: PatientRow) -> ValidationResult<Self> {
        Self::try_from(row)
    }

    fn apply_row(&mut self, row: PatientRow) -> ValidationResult<()> {
        let fresh = Self::try_from(row)?;
        self.first_name = fresh.first_name;
        self.last_name = fresh.last_name;
        self.age = fresh.age;
        self.gender = fresh.gender;
        Ok(())
    }
}

impl fmt::Display for Patient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Patient #{}: {} {}, age {}, {} ({} appointments, {} medical records)",
            self.id.map(|id| id.to_string()).unwrap_or_else(|| "-".into()),
            self.first_name,
            self.last_name,
            self.age,
            self.gender,
            self.appointments.len(),
            self.medical_records.len(),
        )
    }
}
