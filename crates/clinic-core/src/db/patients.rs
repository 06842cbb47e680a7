//! Patient database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Entity, Patient, PatientRow};

fn patient_row(row: &Row<'_>) -> rusqlite::Result<PatientRow> {
    Ok(PatientRow {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        age: row.get(3)?,
        gender: row.get(4)?,
    })
}

impl Database {
    /// Insert a new patient, returning the store-assigned id.
    pub fn insert_patient(&self, patient: &Patient) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO patients (first_name, last_name, age, gender)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                patient.first_name(),
                patient.last_name(),
                patient.age(),
                patient.gender().as_str(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing patient.
    pub fn update_patient(&self, patient: &Patient) -> DbResult<bool> {
        let id = patient.id().ok_or(DbError::NotPersisted(Patient::NAME))?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE patients SET
                first_name = ?2,
                last_name = ?3,
                age = ?4,
                gender = ?5
            WHERE id = ?1
            "#,
            params![
                id,
                patient.first_name(),
                patient.last_name(),
                patient.age(),
                patient.gender().as_str(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a patient. Dependent rows are left in place.
    pub fn delete_patient(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM patients WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Get a patient row by ID.
    pub fn get_patient_row(&self, id: i64) -> DbResult<Option<PatientRow>> {
        self.conn
            .query_row(
                "SELECT id, first_name, last_name, age, gender FROM patients WHERE id = ?",
                [id],
                patient_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// First patient row matching both names exactly.
    pub fn find_patient_row_by_name(
        &self,
        first_name: &str,
        last_name: &str,
    ) -> DbResult<Option<PatientRow>> {
        self.conn
            .query_row(
                r#"
                SELECT id, first_name, last_name, age, gender
                FROM patients
                WHERE first_name = ? AND last_name = ?
                LIMIT 1
                "#,
                [first_name, last_name],
                patient_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all patient rows in table order.
    pub fn list_patient_rows(&self) -> DbResult<Vec<PatientRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, first_name, last_name, age, gender FROM patients")?;

        let rows = stmt.query_map([], patient_row)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Number of patient rows.
    pub fn count_patients(&self) -> DbResult<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM patients", [], |row| row.get(0))?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup_db() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_insert_and_get() {
        let db = setup_db();

        let patient = Patient::new("John", "Doe", 30, "Male").unwrap();
        let id = db.insert_patient(&patient).unwrap();
        assert_eq!(id, 1);

        let row = db.get_patient_row(id).unwrap().unwrap();
        assert_eq!(
            row,
            PatientRow {
                id: 1,
                first_name: "John".into(),
                last_name: "Doe".into(),
                age: 30,
                gender: "Male".into(),
            }
        );
        assert!(db.get_patient_row(2).unwrap().is_none());
    }

    #[test]
    fn test_update_requires_id() {
        let db = setup_db();
        let patient = Patient::new("John", "Doe", 30, "Male").unwrap();

        let result = db.update_patient(&patient);
        assert!(matches!(result, Err(DbError::NotPersisted("patient"))));
    }

    #[test]
    fn test_find_by_name_returns_first_match() {
        let db = setup_db();
        let first = db
            .insert_patient(&Patient::new("John", "Doe", 30, "Male").unwrap())
            .unwrap();
        db.insert_patient(&Patient::new("John", "Doe", 55, "Male").unwrap())
            .unwrap();

        let row = db.find_patient_row_by_name("John", "Doe").unwrap().unwrap();
        assert_eq!(row.id, first);
        assert!(db.find_patient_row_by_name("john", "doe").unwrap().is_none());
    }

    #[test]
    fn test_list_and_delete() {
        let db = setup_db();
        let a = db
            .insert_patient(&Patient::new("Jane", "Smith", 25, "Female").unwrap())
            .unwrap();
        let b = db
            .insert_patient(&Patient::new("Bob", "Brown", 50, "Male").unwrap())
            .unwrap();

        let ids: Vec<i64> = db.list_patient_rows().unwrap().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);

        assert!(db.delete_patient(a).unwrap());
        assert!(!db.delete_patient(a).unwrap());
        assert_eq!(db.count_patients().unwrap(), 1);
    }
}
