//! Appointment manager.

use crate::db::{Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentRow, Entity, Shared};

use super::{log_write_failure, register_inserted, IdentityMap};

/// Create, update, delete and look up appointments.
pub struct AppointmentRepository<'a> {
    db: &'a Database,
    identity_map: IdentityMap<Appointment>,
}

impl<'a> AppointmentRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            identity_map: IdentityMap::new(),
        }
    }

    pub fn identity_map(&self) -> &IdentityMap<Appointment> {
        &self.identity_map
    }

    /// Validate and persist a new appointment.
    pub fn create(
        &self,
        appointment_date: impl Into<String>,
        patient_id: i64,
        doctor_id: i64,
        notes: Option<String>,
    ) -> DbResult<Shared<Appointment>> {
        let appointment = Appointment::new(appointment_date, patient_id, doctor_id, notes)?;
        self.save(appointment)
    }

    /// Persist an appointment that has not been saved before.
    pub fn save(&self, mut appointment: Appointment) -> DbResult<Shared<Appointment>> {
        if let Some(id) = appointment.id() {
            return Err(DbError::AlreadyPersisted {
                entity: Appointment::NAME,
                id,
            });
        }

        let id = self
            .db
            .insert_appointment(&appointment)
            .map_err(log_write_failure::<Appointment>("insert"))?;
        appointment.assign_id(id);
        tracing::info!(
            id,
            patient_id = appointment.patient_id(),
            doctor_id = appointment.doctor_id(),
            "appointment created"
        );

        Ok(register_inserted(&self.identity_map, id, appointment))
    }

    /// Write the appointment's current fields to its row.
    pub fn update(&self, appointment: &Shared<Appointment>) -> DbResult<bool> {
        let updated = self
            .db
            .update_appointment(&appointment.borrow())
            .map_err(log_write_failure::<Appointment>("update"))?;
        tracing::info!(id = ?appointment.borrow().id(), updated, "appointment updated");
        Ok(updated)
    }

    /// Remove the appointment's row.
    pub fn delete(&self, appointment: &Shared<Appointment>) -> DbResult<bool> {
        let id = appointment
            .borrow()
            .id()
            .ok_or(DbError::NotPersisted(Appointment::NAME))?;
        let deleted = self
            .db
            .delete_appointment(id)
            .map_err(log_write_failure::<Appointment>("delete"))?;
        tracing::info!(id, deleted, "appointment deleted");
        Ok(deleted)
    }

    pub fn find_by_id(&self, id: i64) -> DbResult<Option<Shared<Appointment>>> {
        self.db
            .get_appointment_row(id)?
            .map(|row| self.load(row))
            .transpose()
    }

    /// Every appointment for a patient, in table order.
    pub fn find_by_patient_id(&self, patient_id: i64) -> DbResult<Vec<Shared<Appointment>>> {
        self.load_all(self.db.list_appointment_rows_for_patient(patient_id)?)
    }

    /// Every appointment for a doctor, in table order.
    pub fn find_by_doctor_id(&self, doctor_id: i64) -> DbResult<Vec<Shared<Appointment>>> {
        self.load_all(self.db.list_appointment_rows_for_doctor(doctor_id)?)
    }

    pub fn get_all(&self) -> DbResult<Vec<Shared<Appointment>>> {
        self.load_all(self.db.list_appointment_rows()?)
    }

    fn load(&self, row: AppointmentRow) -> DbResult<Shared<Appointment>> {
        Ok(self.identity_map.materialize(row)?)
    }

    fn load_all(&self, rows: Vec<AppointmentRow>) -> DbResult<Vec<Shared<Appointment>>> {
        rows.into_iter().map(|row| self.load(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_create_assigns_id_and_caches() {
        let db = Database::open_in_memory().unwrap();
        let repo = AppointmentRepository::new(&db);

        let appointment = repo.create("2024-01-01 10:00", 1, 1, None).unwrap();
        let id = appointment.borrow().id().unwrap();
        assert_eq!(id, 1);
        assert!(repo.identity_map().contains(id));

        let loaded = repo.find_by_id(id).unwrap().unwrap();
        assert!(Rc::ptr_eq(&appointment, &loaded));
    }

    #[test]
    fn test_validation_failure_inserts_nothing() {
        let db = Database::open_in_memory().unwrap();
        let repo = AppointmentRepository::new(&db);

        let result = repo.create("2024-01-01", 0, 1, None);
        assert!(matches!(result, Err(DbError::Validation(_))));
        assert!(repo.get_all().unwrap().is_empty());
    }

    #[test]
    fn test_save_rejects_persisted_instance() {
        let db = Database::open_in_memory().unwrap();
        let repo = AppointmentRepository::new(&db);
        let appointment = repo.create("2024-01-01", 1, 1, None).unwrap();

        let copy = appointment.borrow().clone();
        let result = repo.save(copy);
        assert!(matches!(
            result,
            Err(DbError::AlreadyPersisted { entity: "appointment", id: 1 })
        ));
    }

    #[test]
    fn test_update_and_reload() {
        let db = Database::open_in_memory().unwrap();
        let repo = AppointmentRepository::new(&db);
        let appointment = repo.create("2024-01-01", 1, 1, None).unwrap();

        appointment
            .borrow_mut()
            .set_notes(Some("bring x-rays".into()));
        assert!(repo.update(&appointment).unwrap());

        let id = appointment.borrow().id().unwrap();
        let row = db.get_appointment_row(id).unwrap().unwrap();
        assert_eq!(row.notes.as_deref(), Some("bring x-rays"));
    }

    #[test]
    fn test_delete_then_find() {
        let db = Database::open_in_memory().unwrap();
        let repo = AppointmentRepository::new(&db);
        let appointment = repo.create("2024-01-01", 1, 1, None).unwrap();

        assert!(repo.delete(&appointment).unwrap());
        assert!(repo.find_by_id(1).unwrap().is_none());
        assert!(!repo.delete(&appointment).unwrap());
    }

    #[test]
    fn test_reused_id_gets_fresh_instance() {
        let db = Database::open_in_memory().unwrap();
        let repo = AppointmentRepository::new(&db);

        let first = repo.create("2024-01-01", 1, 1, None).unwrap();
        repo.delete(&first).unwrap();

        // SQLite reuses the highest deleted rowid
        let second = repo.create("2024-02-02", 2, 2, None).unwrap();
        assert_eq!(second.borrow().id(), Some(1));
        assert!(!Rc::ptr_eq(&first, &second));

        // The old handle still shows the deleted row
        assert_eq!(first.borrow().appointment_date(), "2024-01-01");
        assert_eq!(first.borrow().patient_id(), 1);

        assert_eq!(repo.identity_map().len(), 1);
        let found = repo.find_by_id(1).unwrap().unwrap();
        assert!(Rc::ptr_eq(&found, &second));
    }
}
