//! Relationship hydration for patients and doctors.

use crate::db::{DbError, DbResult};
use crate::models::{Appointment, Doctor, Entity, MedicalRecord, Patient, Shared};

use super::{AppointmentRepository, MedicalRecordRepository};

/// Which foreign key column links children back to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum OwnerKey {
    PatientId,
    DoctorId,
}

/// An entity whose appointment and medical record lists are derived from
/// the child tables.
pub(crate) trait HasRelations: Entity {
    const OWNER_KEY: OwnerKey;

    fn set_relations(
        &mut self,
        appointments: Vec<Shared<Appointment>>,
        medical_records: Vec<Shared<MedicalRecord>>,
    );
}

impl HasRelations for Patient {
    const OWNER_KEY: OwnerKey = OwnerKey::PatientId;

    fn set_relations(
        &mut self,
        appointments: Vec<Shared<Appointment>>,
        medical_records: Vec<Shared<MedicalRecord>>,
    ) {
        self.replace_relations(appointments, medical_records);
    }
}

impl HasRelations for Doctor {
    const OWNER_KEY: OwnerKey = OwnerKey::DoctorId;

    fn set_relations(
        &mut self,
        appointments: Vec<Shared<Appointment>>,
        medical_records: Vec<Shared<MedicalRecord>>,
    ) {
        self.replace_relations(appointments, medical_records);
    }
}

/// Fills relation lists through the child repositories' foreign-key lookups,
/// so the children are the same shared instances those repositories return.
#[derive(Clone, Copy)]
pub struct Hydrator<'a> {
    appointments: &'a AppointmentRepository<'a>,
    medical_records: &'a MedicalRecordRepository<'a>,
}

impl<'a> Hydrator<'a> {
    pub fn new(
        appointments: &'a AppointmentRepository<'a>,
        medical_records: &'a MedicalRecordRepository<'a>,
    ) -> Self {
        Self {
            appointments,
            medical_records,
        }
    }

    /// Replace the relation lists of `owner`, the instance stored under `id`.
    pub(crate) fn hydrate<T: HasRelations>(&self, id: i64, owner: &Shared<T>) -> DbResult<()> {
        let (appointments, medical_records) = match T::OWNER_KEY {
            OwnerKey::PatientId => (
                self.appointments.find_by_patient_id(id)?,
                self.medical_records.find_by_patient_id(id)?,
            ),
            OwnerKey::DoctorId => (
                self.appointments.find_by_doctor_id(id)?,
                self.medical_records.find_by_doctor_id(id)?,
            ),
        };

        tracing::debug!(
            entity = T::NAME,
            id,
            appointments = appointments.len(),
            medical_records = medical_records.len(),
            "hydrated relations"
        );

        owner
            .try_borrow_mut()
            .map_err(|_| DbError::InstanceBorrowed {
                entity: T::NAME,
                id,
            })?
            .set_relations(appointments, medical_records);
        Ok(())
    }
}
