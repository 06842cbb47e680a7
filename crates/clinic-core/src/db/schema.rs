//! SQLite schema definition.
//!
//! Foreign keys are declared on every child table. Whether SQLite enforces
//! them is decided per connection by `DatabaseOptions`.

/// `patients` table. Kept separate so the seed routine can recreate it alone.
pub const PATIENTS_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL
);
"#;

/// Complete database schema.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Doctors
-- ============================================================================

CREATE TABLE IF NOT EXISTS doctors (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL,
    specialization TEXT NOT NULL
);

-- ============================================================================
-- Patients
-- ============================================================================

CREATE TABLE IF NOT EXISTS patients (
    id INTEGER PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    age INTEGER NOT NULL,
    gender TEXT NOT NULL
);

-- ============================================================================
-- Appointments
-- ============================================================================

CREATE TABLE IF NOT EXISTS appointments (
    id INTEGER PRIMARY KEY,
    appointment_date TEXT NOT NULL,              -- free text, no format enforced
    patient_id INTEGER NOT NULL,
    doctor_id INTEGER NOT NULL,
    notes TEXT,
    FOREIGN KEY(patient_id) REFERENCES patients(id),
    FOREIGN KEY(doctor_id) REFERENCES doctors(id)
);

-- ============================================================================
-- Medical Records
-- ============================================================================

CREATE TABLE IF NOT EXISTS medical_records (
    id INTEGER PRIMARY KEY,
    patient_id INTEGER NOT NULL,
    doctor_id INTEGER NOT NULL,
    record_date TEXT NOT NULL,
    diagnosis TEXT NOT NULL,
    treatment TEXT NOT NULL,
    FOREIGN KEY(patient_id) REFERENCES patients(id),
    FOREIGN KEY(doctor_id) REFERENCES doctors(id)
);
"#;
