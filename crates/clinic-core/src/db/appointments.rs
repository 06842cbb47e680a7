//! Appointment database operations.

use rusqlite::{params, OptionalExtension, Row};

use super::{Database, DbError, DbResult};
use crate::models::{Appointment, AppointmentRow, Entity};

const SELECT_APPOINTMENTS: &str =
    "SELECT id, appointment_date, patient_id, doctor_id, notes FROM appointments";

fn appointment_row(row: &Row<'_>) -> rusqlite::Result<AppointmentRow> {
    Ok(AppointmentRow {
        id: row.get(0)?,
        appointment_date: row.get(1)?,
        patient_id: row.get(2)?,
        doctor_id: row.get(3)?,
        notes: row.get(4)?,
    })
}

impl Database {
    /// Insert a new appointment, returning the store-assigned id.
    pub fn insert_appointment(&self, appointment: &Appointment) -> DbResult<i64> {
        self.conn.execute(
            r#"
            INSERT INTO appointments (appointment_date, patient_id, doctor_id, notes)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                appointment.appointment_date(),
                appointment.patient_id(),
                appointment.doctor_id(),
                appointment.notes(),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Update an existing appointment.
    pub fn update_appointment(&self, appointment: &Appointment) -> DbResult<bool> {
        let id = appointment
            .id()
            .ok_or(DbError::NotPersisted(Appointment::NAME))?;
        let rows_affected = self.conn.execute(
            r#"
            UPDATE appointments SET
                appointment_date = ?2,
                patient_id = ?3,
                doctor_id = ?4,
                notes = ?5
            WHERE id = ?1
            "#,
            params![
                id,
                appointment.appointment_date(),
                appointment.patient_id(),
                appointment.doctor_id(),
                appointment.notes(),
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Delete an appointment.
    pub fn delete_appointment(&self, id: i64) -> DbResult<bool> {
        let rows_affected = self
            .conn
            .execute("DELETE FROM appointments WHERE id = ?", [id])?;
        Ok(rows_affected > 0)
    }

    /// Get an appointment row by ID.
    pub fn get_appointment_row(&self, id: i64) -> DbResult<Option<AppointmentRow>> {
        self.conn
            .query_row(
                &format!("{} WHERE id = ?", SELECT_APPOINTMENTS),
                [id],
                appointment_row,
            )
            .optional()
            .map_err(Into::into)
    }

    /// All appointment rows for a patient, in table order.
    pub fn list_appointment_rows_for_patient(
        &self,
        patient_id: i64,
    ) -> DbResult<Vec<AppointmentRow>> {
        self.query_appointment_rows(
            &format!("{} WHERE patient_id = ?", SELECT_APPOINTMENTS),
            patient_id,
        )
    }

    /// All appointment rows for a doctor, in table order.
    pub fn list_appointment_rows_for_doctor(
        &self,
        doctor_id: i64,
    ) -> DbResult<Vec<AppointmentRow>> {
        self.query_appointment_rows(
            &format!("{} WHERE doctor_id = ?", SELECT_APPOINTMENTS),
            doctor_id,
        )
    }

    /// List all appointment rows in table order.
    pub fn list_appointment_rows(&self) -> DbResult<Vec<AppointmentRow>> {
        let mut stmt = self.conn.prepare(SELECT_APPOINTMENTS)?;
        let rows = stmt.query_map([], appointment_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    fn query_appointment_rows(&self, sql: &str, key: i64) -> DbResult<Vec<AppointmentRow>> {
        let mut stmt = self.conn.prepare(sql)?;
        let rows = stmt.query_map([key], appointment_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }
}
