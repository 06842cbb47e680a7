//! Demo data.

use crate::db::{Database, DbResult};
use crate::models::Patient;

/// The ten sample patients: first name, last name, age, gender.
pub const SAMPLE_PATIENTS: [(&str, &str, i64, &str); 10] = [
    ("John", "Doe", 30, "Male"),
    ("Jane", "Smith", 25, "Female"),
    ("Alice", "Johnson", 40, "Female"),
    ("Bob", "Brown", 50, "Male"),
    ("Eve", "Davis", 35, "Female"),
    ("Frank", "Wilson", 45, "Male"),
    ("Grace", "Lee", 28, "Female"),
    ("Hank", "Martinez", 60, "Male"),
    ("Ivy", "Robinson", 32, "Female"),
    ("Jack", "Clark", 38, "Male"),
];

/// Drop and recreate the `patients` table, then insert the sample patients.
///
/// Returns the number of patients inserted. Any identity map built before
/// this call is stale afterwards; use fresh repositories.
pub fn seed_patients(db: &Database) -> DbResult<usize> {
    db.recreate_patients_table()?;

    for (first_name, last_name, age, gender) in SAMPLE_PATIENTS {
        let patient = Patient::new(first_name, last_name, age, gender)?;
        db.insert_patient(&patient)?;
    }

    tracing::info!(count = SAMPLE_PATIENTS.len(), "seeded patients");
    Ok(SAMPLE_PATIENTS.len())
}
