//! Doctor database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Doctor, DoctorRow, Entity};

fn doctor_row(row: &Row<'_>) -> rusqlite::Result<DoctorRow> {
    Ok(DoctorRow {
        id: row.get(0)?,
        name: row.get(1)?,
        specialization: row.get(2)?,
    })
}

impl Database {
    /// Insert a new doctor, returning the store-assigned id.
    pub fn insert_doctor(&self, doctor: &Doctor) -> DbResult<i64> {
        self.conn.execute(
            "INSERT INTO doctors (name, specialization) VALUES (?1, ?2)",
            params![doctor.name(), doctor.specialization()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing doctor.
    pub fn update_doctor(&self, doctor: &Doctor) -> DbResult<bool> {
        let id = doctor.id().ok_or(DbError::NotPersisted(Doctor::NAME))?;
        let rows_affected = self.conn.execute(
            "UPDATE doctors SET name = ?2, specialization = ?3 WHERE id = ?1",
            params![id, doctor.name(), doctor.specialization()],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete a doctor. Dependent rows are left in place.
    pub fn delete_doctor(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM doctors WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Get a doctor row by ID.
    pub fn get_doctor_row(&self, id: i64) -> DbResult<Option<DoctorRow>> {
        self.conn
            .query_row(
                "SELECT id, name, specialization FROM doctors WHERE id = ?",
                [id],
                doctor_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// First doctor row with exactly this name.
    pub fn find_doctor_row_by_name(&self, name: &str) -> DbResult<Option<DoctorRow>> {
        self.conn
            .query_row(
                "SELECT id, name, specialization FROM doctors WHERE name = ? LIMIT 1",
                [name],
                doctor_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// List all doctor rows in table order.
    pub fn list_doctor_rows(&self) -> DbResult<Vec<DoctorRow>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, specialization FROM doctors")?;

        let rows = stmt.query_map([], doctor_row)?;

        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
