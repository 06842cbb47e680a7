//! Patient manager.

use crate::db::{Database, DbError, DbResult};
use crate::models::{Entity, Patient, PatientRow, Shared};

use super::{log_write_failure, register_inserted, Hydrator, IdentityMap};

/// Create, update, delete and look up patients.
///
/// Every patient handed out has its appointments and medical records
/// reloaded first.
pub struct PatientRepository<'a> {
    db: &'a Database,
    identity_map: IdentityMap<Patient>,
    hydrator: Hydrator<'a>,
}

impl<'a> PatientRepository<'a> {
    pub fn new(db: &'a Database, hydrator: Hydrator<'a>) -> Self {
        Self {
            db,
            identity_map: IdentityMap::new(),
            hydrator,
        }
    }

    pub fn identity_map(&self) -> &IdentityMap<Patient> {
        &self.identity_map
    }

    /// Validate and persist a new patient.
    pub fn create(
        &self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        age: i64,
        gender: &str,
    ) -> DbResult<Shared<Patient>> {
        let patient = Patient::new(first_name, last_name, age, gender)?;
        self.save(patient)
    }

    /// Persist a patient that has not been saved before.
    pub fn save(&self, mut patient: Patient) -> DbResult<Shared<Patient>> {
        if let Some(id) = patient.id() {
            return Err(DbError::AlreadyPersisted {
                entity: Patient::NAME,
                id,
            });
        }

        let id = self
            .db
            .insert_patient(&patient)
            .map_err(log_write_failure::<Patient>("insert"))?;
        patient.assign_id(id);
        tracing::info!(id, "patient created");

        let shared = register_inserted(&self.identity_map, id, patient);
        // A reused id can already have child rows pointing at it
        self.hydrator.hydrate(id, &shared)?;
        Ok(shared)
    }

    /// Write the patient's current fields to its row.
    pub fn update(&self, patient: &Shared<Patient>) -> DbResult<bool> {
        let updated = self
            .db
            .update_patient(&patient.borrow())
            .map_err(log_write_failure::<Patient>("update"))?;
        tracing::info!(id = ?patient.borrow().id(), updated, "patient updated");
        Ok(updated)
    }

    /// Remove the patient's row. Appointments and medical records that
    /// reference it are kept.
    pub fn delete(&self, patient: &Shared<Patient>) -> DbResult<bool> {
        let id = patient
            .borrow()
            .id()
            .ok_or(DbError::NotPersisted(Patient::NAME))?;
        let deleted = self
            .db
            .delete_patient(id)
            .map_err(log_write_failure::<Patient>("delete"))?;
        tracing::info!(id, deleted, "patient deleted");
        Ok(deleted)
    }

    pub fn find_by_id(&self, id: i64) -> DbResult<Option<Shared<Patient>>> {
        self.db
            .get_patient_row(id)?
            .map(|row| self.load(row))
            .transpose()
    }

    /// First patient with exactly this first and last name.
    ///
    /// Names are not unique; when several patients share a name only the
    /// first row is returned.
    pub fn find_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> DbResult<Option<Shared<Patient>>> {
        self.db
            .find_patient_row_by_name(first_name, last_name)?
            .map(|row| self.load(row))
            .transpose()
    }

    pub fn get_all(&self) -> DbResult<Vec<Shared<Patient>>> {
        self.db
            .list_patient_rows()?
            .into_iter()
            .map(|row| self.load(row))
            .collect()
    }

    fn load(&self, row: PatientRow) -> DbResult<Shared<Patient>> {
        let id = row.id;
        let patient = self.identity_map.materialize(row)?;
        self.hydrator.hydrate(id, &patient)?;
        Ok(patient)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{AppointmentRepository, MedicalRecordRepository};
    use std::rc::Rc;

    #[test]
    fn test_create_find_update() {
        let db = Database::open_in_memory().unwrap();
        let appointments = AppointmentRepository::new(&db);
        let records = MedicalRecordRepository::new(&db);
        let patients = PatientRepository::new(&db, Hydrator::new(&appointments, &records));

        let patient = patients.create("John", "Doe", 30, "Male").unwrap();
        assert_eq!(patient.borrow().id(), Some(1));

        patient.borrow_mut().set_age(31).unwrap();
        assert!(patients.update(&patient).unwrap());

        let by_name = patients.find_by_name("John", "Doe").unwrap().unwrap();
        assert!(Rc::ptr_eq(&patient, &by_name));
        assert_eq!(by_name.borrow().age(), 31);
    }

    #[test]
    fn test_hydrates_children_on_load() {
        let db = Database::open_in_memory().unwrap();
        let appointments = AppointmentRepository::new(&db);
        let records = MedicalRecordRepository::new(&db);
        let patients = PatientRepository::new(&db, Hydrator::new(&appointments, &records));

        let patient = patients.create("Jane", "Smith", 25, "Female").unwrap();
        assert!(patient.borrow().appointments().is_empty());

        let appointment = appointments.create("2024-03-01", 1, 1, None).unwrap();
        records.create(1, 1, "2024-03-01", "Sprain", "Ice").unwrap();
        records.create(2, 1, "2024-03-01", "Other patient", "None").unwrap();

        // Derived lists only change on the next load
        assert!(patient.borrow().appointments().is_empty());

        patients.find_by_id(1).unwrap().unwrap();
        let patient = patient.borrow();
        assert_eq!(patient.appointments().len(), 1);
        assert!(Rc::ptr_eq(&patient.appointments()[0], &appointment));
        assert_eq!(patient.medical_records().len(), 1);
        assert_eq!(patient.medical_records()[0].borrow().diagnosis(), "Sprain");
    }

    #[test]
    fn test_invalid_gender_not_persisted() {
        let db = Database::open_in_memory().unwrap();
        let appointments = AppointmentRepository::new(&db);
        let records = MedicalRecordRepository::new(&db);
        let patients = PatientRepository::new(&db, Hydrator::new(&appointments, &records));

        let result = patients.create("John", "Doe", 30, "Unknown");
        assert!(matches!(result, Err(DbError::Validation(_))));
        assert_eq!(db.count_patients().unwrap(), 0);
        assert!(patients.identity_map().is_empty());
    }
}
