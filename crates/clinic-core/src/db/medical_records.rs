//! Medical record database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Entity, MedicalRecord, MedicalRecordRow};

const SELECT_MEDICAL_RECORDS: &str = r#"
    SELECT id, patient_id, doctor_id, record_date, diagnosis, treatment
    FROM medical_records
"#;

fn medical_record_row(row: &Row<'_>) -> rusqlite::Result<MedicalRecordRow> {
    Ok(MedicalRecordRow {
        id: row.get(0)?,
        patient_id: row.get(1)?,
        doctor_id: row.get(2)?,
        record_date: row.get(3)?,
        diagnosis: row.get(4)?,
        treatment: row.get(5)?,
    })
}

impl Database {
    /// Insert a new medical record, returning the store-assigned id.
    pub fn insert_medical_record(&self, record: &MedicalRecord) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO medical_records (patient_id, doctor_id, record_date, diagnosis, treatment)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                record.patient_id(),
                record.doctor_id(),
                record.record_date(),
                record.diagnosis(),
                record.treatment(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing medical record.
    pub fn update_medical_record(&self, record: &MedicalRecord) -> DbResult<bool> {
        let id = record
            .id()
            .ok_or(DbError::NotPersisted(MedicalRecord::NAME))?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE medical_records SET
                patient_id = ?2,
                doctor_id = ?3,
                record_date = ?4,
                diagnosis = ?5,
                treatment = ?6
            WHERE id = ?1
            "#,
            params![
                id,
                record.patient_id(),
                record.doctor_id(),
                record.record_date(),
                record.diagnosis(),
                record.treatment(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a medical record.
    pub fn delete_medical_record(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM medical_records WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Get a medical record row by ID.
    pub fn get_medical_record_row(&self, id: i64) -> DbResult<Option<MedicalRecordRow>> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_MEDICAL_RECORDS),
                [id],
                medical_record_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All medical record rows for a patient, in table order.
    pub fn list_medical_record_rows_for_patient(
        &self,
        patient_id: i64,
    ) -> DbResult<Vec<MedicalRecordRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE patient_id = ?", SELECT_MEDICAL_RECORDS))?;
        let rows = stmt.query_map([patient_id], medical_record_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// All medical record rows for a doctor, in table order.
    pub fn list_medical_record_rows_for_doctor(
        &self,
        doctor_id: i64,
    ) -> DbResult<Vec<MedicalRecordRow>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{} WHERE doctor_id = ?", SELECT_MEDICAL_RECORDS))?;
        let rows = stmt.query_map([doctor_id], medical_record_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// List all medical record rows in table order.
    pub fn list_medical_record_rows(&self) -> DbResult<Vec<MedicalRecordRow>> {
        let mut stmt = self.conn.prepare(SELECT_MEDICAL_RECORDS)?;
        let rows = stmt.query_map([], medical_record_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
