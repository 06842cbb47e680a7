//! Doctor manager.

use crate::db::{Database, DbError, DbResult};
use crate::models::{Doctor, DoctorRow, Entity, Shared};

use super::{log_write_failure, register_inserted, Hydrator, IdentityMap};

/// Create, update, delete and look up doctors.
pub struct DoctorRepository<'a> {
    db: &'a Database,
    identity_map: IdentityMap<Doctor>,
    hydrator: Hydrator<'a>,
}

impl<'a> DoctorRepository<'a> {
    pub fn new(db: &'a Database, hydrator: Hydrator<'a>) -> Self {
        Self {
            db,
            identity_map: IdentityMap::new(),
            hydrator,
        }
    }

    pub fn identity_map(&self) -> &IdentityMap<Doctor> {
        &self.identity_map
    }

    /// Validate and persist a new doctor.
    pub fn create(
        &self,
        name: impl Into<String>,
        specialization: impl Into<String>,
    ) -> DbResult<Shared<Doctor>> {
        let doctor = Doctor::new(name, specialization)?;
        self.save(doctor)
    }

    /// Persist a doctor that has not been saved before.
    pub fn save(&self, mut doctor: Doctor) -> DbResult<Shared<Doctor>> {
        if let Some(id) = doctor.id() {
            return Err(DbError::AlreadyPersisted {
                entity: Doctor::NAME,
                id,
            });
        }

        let id = self
            .db
            .insert_doctor(&doctor)
            .map_err(log_write_failure::<Doctor>("insert"))?;
        doctor.assign_id(id);
        tracing::info!(id, "doctor created");

        let shared = register_inserted(&self.identity_map, id, doctor);
        self.hydrator.hydrate(id, &shared)?;
        Ok(shared)
    }

    /// Write the doctor's current fields to its row.
    pub fn update(&self, doctor: &Shared<Doctor>) -> DbResult<bool> {
        let updated = self
            .db
            .update_doctor(&doctor.borrow())
            .map_err(log_write_failure::<Doctor>("update"))?;
        tracing::info!(id = ?doctor.borrow().id(), updated, "doctor updated");
        Ok(updated)
    }

    /// Remove the doctor's row. Dependent rows are kept.
    pub fn delete(&self, doctor: &Shared<Doctor>) -> DbResult<bool> {
        let id = doctor
            .borrow()
            .id()
            .ok_or(DbError::NotPersisted(Doctor::NAME))?;
        let deleted = self
            .db
            .delete_doctor(id)
            .map_err(log_write_failure::<Doctor>("delete"))?;
        tracing::info!(id, deleted, "doctor deleted");
        Ok(deleted)
    }

    pub fn find_by_id(&self, id: i64) -> DbResult<Option<Shared<Doctor>>> {
        self.db
            .get_doctor_row(id)?
            .map(|row| self.load(row))
            .transpose()
    }

    /// First doctor with exactly this name.
    pub fn find_by_name(&self, name: &str) -> DbResult<Option<Shared<Doctor>>> {
        self.db
            .find_doctor_row_by_name(name)?
            .map(|row| self.load(row))
            .transpose()
    }

    pub fn get_all(&self) -> DbResult<Vec<Shared<Doctor>>> {
        self.db
            .list_doctor_rows()?
            .into_iter()
            .map(|row| self.load(row))
            .collect()
    }

    fn load(&self, row: DoctorRow) -> DbResult<Shared<Doctor>> {
        let id = row.id;
        let doctor = self.identity_map.materialize(row)?;
        self.hydrator.hydrate(id, &doctor)?;
        Ok(doctor)
    }
}
