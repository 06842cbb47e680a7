//! Medical record manager.

use crate::db::{Database, DbError, DbResult};
use crate::models::{Entity, MedicalRecord, MedicalRecordRow, Shared};

use super::{log_write_failure, register_inserted, IdentityMap};

/// Create, update, delete and look up medical records.
pub struct MedicalRecordRepository<'a> {
    db: &'a Database,
    identity_map: IdentityMap<MedicalRecord>,
}

impl<'a> MedicalRecordRepository<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self {
            db,
            identity_map: IdentityMap::new(),
        }
    }

    pub fn identity_map(&self) -> &IdentityMap<MedicalRecord> {
        &self.identity_map
    }

    /// Validate and persist a new medical record.
    pub fn create(
        &self,
        patient_id: i64,
        doctor_id: i64,
        record_date: impl Into<String>,
        diagnosis: impl Into<String>,
        treatment: impl Into<String>,
    ) -> DbResult<Shared<MedicalRecord>> {
        let record = MedicalRecord::new(patient_id, doctor_id, record_date, diagnosis, treatment)?;
        self.save(record)
    }

    /// Persist a medical record that has not been saved before.
    pub fn save(&self, mut record: MedicalRecord) -> DbResult<Shared<MedicalRecord>> {
        if let Some(id) = record.id() {
            return Err(DbError::AlreadyPersisted {
                entity: MedicalRecord::NAME,
                id,
            });
        }

        let id = self
            .db
            .insert_medical_record(&record)
            .map_err(log_write_failure::<MedicalRecord>("insert"))?;
        record.assign_id(id);
        tracing::info!(
            id,
            patient_id = record.patient_id(),
            doctor_id = record.doctor_id(),
            "medical record created"
        );

        Ok(register_inserted(&self.identity_map, id, record))
    }

    /// Write the record's current fields to its row.
    pub fn update(&self, record: &Shared<MedicalRecord>) -> DbResult<bool> {
        let updated = self
            .db
            .update_medical_record(&record.borrow())
            .map_err(log_write_failure::<MedicalRecord>("update"))?;
        tracing::info!(id = ?record.borrow().id(), updated, "medical record updated");
        Ok(updated)
    }

    /// Remove the record's row.
    pub fn delete(&self, record: &Shared<MedicalRecord>) -> DbResult<bool> {
        let id = record
            .borrow()
            .id()
            .ok_or(DbError::NotPersisted(MedicalRecord::NAME))?;
        let deleted = self
            .db
            .delete_medical_record(id)
            .map_err(log_write_failure::<MedicalRecord>("delete"))?;
        tracing::info!(id, deleted, "medical record deleted");
        Ok(deleted)
    }

    pub fn find_by_id(&self, id: i64) -> DbResult<Option<Shared<MedicalRecord>>> {
        self.db
            .get_medical_record_row(id)?
            .map(|row| self.load(row))
            .transpose()
    }

    /// Every record for a patient, in table order.
    pub fn find_by_patient_id(&self, patient_id: i64) -> DbResult<Vec<Shared<MedicalRecord>>> {
        self.load_all(self.db.list_medical_record_rows_for_patient(patient_id)?)
    }

    /// Every record written by a doctor, in table order.
    pub fn find_by_doctor_id(&self, doctor_id: i64) -> DbResult<Vec<Shared<MedicalRecord>>> {
        self.load_all(self.db.list_medical_record_rows_for_doctor(doctor_id)?)
    }

    pub fn get_all(&self) -> DbResult<Vec<Shared<MedicalRecord>>> {
        self.load_all(self.db.list_medical_record_rows()?)
    }

    fn load(&self, row: MedicalRecordRow) -> DbResult<Shared<MedicalRecord>> {
        Ok(self.identity_map.materialize(row)?)
    }

    fn load_all(&self, rows: Vec<MedicalRecordRow>) -> DbResult<Vec<Shared<MedicalRecord>>> {
        rows.into_iter().map(|row| self.load(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::rc::Rc;

    #[test]
    fn test_lookups_share_instances() {
        let db = Database::open_in_memory().unwrap();
        let repo = MedicalRecordRepository::new(&db);

        let record = repo.create(1, 2, "2024-01-01", "Flu", "Rest").unwrap();
        let by_patient = repo.find_by_patient_id(1).unwrap();
        let by_doctor = repo.find_by_doctor_id(2).unwrap();

        assert_eq!(by_patient.len(), 1);
        assert!(Rc::ptr_eq(&record, &by_patient[0]));
        assert!(Rc::ptr_eq(&record, &by_doctor[0]));
    }

    #[test]
    fn test_reload_discards_unsaved_changes() {
        let db = Database::open_in_memory().unwrap();
        let repo = MedicalRecordRepository::new(&db);
        let record = repo.create(1, 2, "2024-01-01", "Flu", "Rest").unwrap();

        record.borrow_mut().set_diagnosis("Cold").unwrap();
        repo.find_by_id(1).unwrap().unwrap();

        assert_eq!(record.borrow().diagnosis(), "Flu");
    }

    #[test]
    fn test_invalid_field_never_persisted() {
        let db = Database::open_in_memory().unwrap();
        let repo = MedicalRecordRepository::new(&db);

        assert!(repo.create(1, 2, "2024-01-01", "", "Rest").is_err());
        assert!(db.list_medical_record_rows().unwrap().is_empty());
    }

    #[test]
    fn test_update_unsaved_record() {
        let db = Database::open_in_memory().unwrap();
        let repo = MedicalRecordRepository::new(&db);
        let unsaved = Rc::new(std::cell::RefCell::new(
            MedicalRecord::new(1, 2, "2024-01-01", "Flu", "Rest").unwrap(),
        ));

        assert!(matches!(
            repo.update(&unsaved),
            Err(DbError::NotPersisted("medical record"))
        ));
        assert!(matches!(
            repo.delete(&unsaved),
            Err(DbError::NotPersisted("medical record"))
        ));
    }
}
