//! Repository integration tests.

use std::collections::HashSet;
use std::rc::Rc;

use clinic_core::db::{Database, DatabaseOptions, DbError};
use clinic_core::models::ValidationError;
use clinic_core::repository::{
    AppointmentRepository, DoctorRepository, Hydrator, MedicalRecordRepository, PatientRepository,
};

/// Build the four repositories over one database, the way the CLI wires them.
macro_rules! repositories {
    ($db:expr => $patients:ident, $doctors:ident, $appointments:ident, $records:ident) => {
        let $appointments = AppointmentRepository::new(&$db);
        let $records = MedicalRecordRepository::new(&$db);
        let hydrator = Hydrator::new(&$appointments, &$records);
        let $patients = PatientRepository::new(&$db, hydrator);
        let $doctors = DoctorRepository::new(&$db, hydrator);
    };
}

#[test]
fn test_invalid_fields_never_reach_storage() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, doctors, appointments, records);

    assert!(matches!(
        patients.create("John", "Doe", -1, "Male"),
        Err(DbError::Validation(ValidationError::NotPositive { field: "age", .. }))
    ));
    assert!(matches!(
        patients.create("", "Doe", 30, "Male"),
        Err(DbError::Validation(ValidationError::Empty { field: "first_name" }))
    ));
    assert!(matches!(
        doctors.create("", "Cardiology"),
        Err(DbError::Validation(_))
    ));
    assert!(matches!(
        appointments.create("2024-01-01", 1, 0, None),
        Err(DbError::Validation(_))
    ));
    assert!(matches!(
        records.create(1, 1, "2024-01-01", "Flu", ""),
        Err(DbError::Validation(_))
    ));

    let export = clinic_core::ClinicExport::collect(&db).unwrap();
    assert_eq!(export.row_count(), 0);
}

#[test]
fn test_ids_are_positive_and_distinct() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, _doctors, _appointments, _records);

    let ids: Vec<i64> = (0..5)
        .map(|i| {
            patients
                .create(format!("P{}", i), "Test", 20 + i, "Other")
                .unwrap()
                .borrow()
                .id()
                .unwrap()
        })
        .collect();

    assert!(ids.iter().all(|&id| id > 0));
    let unique: HashSet<i64> = ids.iter().copied().collect();
    assert_eq!(unique.len(), ids.len());
}

#[test]
fn test_every_lookup_path_returns_same_instance() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, _doctors, _appointments, _records);

    patients.create("John", "Doe", 30, "Male").unwrap();

    let by_id = patients.find_by_id(1).unwrap().unwrap();
    let by_name = patients.find_by_name("John", "Doe").unwrap().unwrap();
    let from_all = patients.get_all().unwrap().remove(0);

    assert!(Rc::ptr_eq(&by_id, &by_name));
    assert!(Rc::ptr_eq(&by_id, &from_all));
    assert_eq!(patients.identity_map().len(), 1);
}

#[test]
fn test_reload_reflects_out_of_band_update() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, _doctors, _appointments, _records);

    let patient = patients.create("John", "Doe", 30, "Male").unwrap();

    db.conn()
        .execute("UPDATE patients SET age = 44 WHERE id = 1", [])
        .unwrap();
    assert_eq!(patient.borrow().age(), 30);

    let reloaded = patients.find_by_id(1).unwrap().unwrap();
    assert!(Rc::ptr_eq(&patient, &reloaded));
    assert_eq!(patient.borrow().age(), 44);
}

#[test]
fn test_update_then_find() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, doctors, _appointments, _records);

    let doctor = doctors.create("Smith", "Cardiology").unwrap();
    doctor.borrow_mut().set_name("Smythe").unwrap();
    doctor.borrow_mut().set_specialization("Oncology").unwrap();
    assert!(doctors.update(&doctor).unwrap());

    let patient = patients.create("John", "Doe", 30, "Male").unwrap();
    {
        let mut p = patient.borrow_mut();
        p.set_first_name("Johnny").unwrap();
        p.set_gender("Other").unwrap();
    }
    patients.update(&patient).unwrap();

    // Fresh repositories have empty caches, so this reads the stored row
    repositories!(db => patients2, doctors2, _appointments2, _records2);
    let found = doctors2.find_by_id(1).unwrap().unwrap();
    assert_eq!(found.borrow().name(), "Smythe");
    assert_eq!(found.borrow().specialization(), "Oncology");

    let found = patients2.find_by_id(1).unwrap().unwrap();
    assert_eq!(found.borrow().first_name(), "Johnny");
    assert_eq!(found.borrow().gender().as_str(), "Other");
}

#[test]
fn test_delete_then_find_is_absent() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, doctors, appointments, records);

    let patient = patients.create("John", "Doe", 30, "Male").unwrap();
    let doctor = doctors.create("Smith", "Cardiology").unwrap();
    let appointment = appointments.create("2024-01-01", 1, 1, None).unwrap();
    let record = records.create(1, 1, "2024-01-01", "Flu", "Rest").unwrap();

    assert!(records.delete(&record).unwrap());
    assert!(appointments.delete(&appointment).unwrap());
    assert!(doctors.delete(&doctor).unwrap());
    assert!(patients.delete(&patient).unwrap());

    assert!(patients.find_by_id(1).unwrap().is_none());
    assert!(doctors.find_by_id(1).unwrap().is_none());
    assert!(appointments.find_by_id(1).unwrap().is_none());
    assert!(records.find_by_id(1).unwrap().is_none());

    // The cached instance is not evicted
    assert!(patients.identity_map().contains(1));
}

#[test]
fn test_hydration_matches_foreign_keys_in_store_order() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, doctors, appointments, records);

    patients.create("John", "Doe", 30, "Male").unwrap();
    patients.create("Jane", "Smith", 25, "Female").unwrap();
    doctors.create("Smith", "Cardiology").unwrap();

    let a1 = appointments.create("2024-01-03", 1, 1, None).unwrap();
    appointments.create("2024-01-02", 2, 1, None).unwrap();
    let a3 = appointments.create("2024-01-01", 1, 1, Some("recheck".into())).unwrap();
    let r1 = records.create(1, 1, "2024-01-03", "Flu", "Rest").unwrap();

    let john = patients.find_by_id(1).unwrap().unwrap();
    let john = john.borrow();
    assert_eq!(john.appointments().len(), 2);
    assert!(Rc::ptr_eq(&john.appointments()[0], &a1));
    assert!(Rc::ptr_eq(&john.appointments()[1], &a3));
    assert_eq!(john.medical_records().len(), 1);
    assert!(Rc::ptr_eq(&john.medical_records()[0], &r1));

    let smith = doctors.find_by_name("Smith").unwrap().unwrap();
    assert_eq!(smith.borrow().appointments().len(), 3);
}

#[test]
fn test_patient_appointment_scenario() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, doctors, appointments, _records);

    let patient = patients.create("John", "Doe", 30, "Male").unwrap();
    let doctor = doctors.create("Smith", "Cardiology").unwrap();
    let appointment = appointments.create("2024-01-01 10:00", 1, 1, None).unwrap();

    assert_eq!(patient.borrow().id(), Some(1));
    assert_eq!(doctor.borrow().id(), Some(1));
    assert_eq!(appointment.borrow().id(), Some(1));

    let found = patients.find_by_id(1).unwrap().unwrap();
    let found = found.borrow();
    assert_eq!(found.appointments().len(), 1);
    assert!(Rc::ptr_eq(&found.appointments()[0], &appointment));
    assert_eq!(found.appointments()[0].borrow().appointment_date(), "2024-01-01 10:00");
}

#[test]
fn test_invalid_gender_leaves_count_unchanged() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, _doctors, _appointments, _records);

    patients.create("Jane", "Smith", 25, "Female").unwrap();
    let before = patients.get_all().unwrap().len();

    let result = patients.create("John", "Doe", 30, "Unknown");
    assert!(matches!(
        result,
        Err(DbError::Validation(ValidationError::InvalidGender(ref g))) if g == "Unknown"
    ));
    assert_eq!(patients.get_all().unwrap().len(), before);
}

#[test]
fn test_orphans_kept_without_enforcement() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, _doctors, appointments, _records);

    let patient = patients.create("John", "Doe", 30, "Male").unwrap();
    appointments.create("2024-01-01", 1, 1, None).unwrap();

    assert!(patients.delete(&patient).unwrap());
    assert_eq!(appointments.find_by_patient_id(1).unwrap().len(), 1);
}

#[test]
fn test_foreign_key_enforcement() {
    let db = Database::open_in_memory_with(DatabaseOptions {
        enforce_foreign_keys: true,
    })
    .unwrap();
    repositories!(db => patients, doctors, appointments, _records);

    // Dangling reference rejected, nothing inserted or cached
    let result = appointments.create("2024-01-01", 1, 1, None);
    assert!(matches!(result, Err(DbError::Constraint(_))), "got {:?}", result);
    assert!(appointments.get_all().unwrap().is_empty());
    assert!(appointments.identity_map().is_empty());

    let patient = patients.create("John", "Doe", 30, "Male").unwrap();
    doctors.create("Smith", "Cardiology").unwrap();
    appointments.create("2024-01-01", 1, 1, None).unwrap();

    // A referenced parent cannot be deleted
    let result = patients.delete(&patient);
    assert!(matches!(result, Err(DbError::Constraint(_))), "got {:?}", result);
    assert!(patients.find_by_id(1).unwrap().is_some());
}

#[test]
fn test_file_database_persists_across_handles() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("hospital.db");

    {
        let db = Database::open(&path).unwrap();
        repositories!(db => patients, doctors, appointments, _records);
        patients.create("John", "Doe", 30, "Male").unwrap();
        doctors.create("Smith", "Cardiology").unwrap();
        appointments.create("2024-01-01 10:00", 1, 1, None).unwrap();
    }

    let db = Database::open(&path).unwrap();
    {
        repositories!(db => patients, _doctors, _appointments, _records);
        let patient = patients.find_by_name("John", "Doe").unwrap().unwrap();
        assert_eq!(patient.borrow().appointments().len(), 1);
    }
    db.close().unwrap();
}

#[test]
fn test_reload_while_borrowed_is_an_error() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, doctors, appointments, _records);

    patients.create("John", "Doe", 30, "Male").unwrap();
    doctors.create("Smith", "Cardiology").unwrap();
    let appointment = appointments.create("2024-01-01", 1, 1, None).unwrap();

    let patient = patients.find_by_id(1).unwrap().unwrap();
    for appointment in patient.borrow().appointments() {
        let patient_id = appointment.borrow().patient_id();
        let result = patients.find_by_id(patient_id);
        assert!(
            matches!(
                result,
                Err(DbError::InstanceBorrowed {
                    entity: "patient",
                    id: 1
                })
            ),
            "got {:?}",
            result
        );
    }

    // A held child blocks hydration of its parent
    {
        let _held = appointment.borrow();
        let result = patients.find_by_id(1);
        assert!(matches!(
            result,
            Err(DbError::InstanceBorrowed {
                entity: "appointment",
                id: 1
            })
        ));
    }

    // Nothing is left borrowed once the handles are released
    let reloaded = patients.find_by_id(1).unwrap().unwrap();
    assert!(Rc::ptr_eq(&reloaded, &patient));
    assert_eq!(reloaded.borrow().appointments().len(), 1);
}

#[test]
fn test_reused_id_does_not_repoint_old_handle() {
    let db = Database::open_in_memory().unwrap();
    repositories!(db => patients, _doctors, _appointments, _records);

    let john = patients.create("John", "Doe", 30, "Male").unwrap();
    assert!(patients.delete(&john).unwrap());

    let jane = patients.create("Jane", "Smith", 25, "Female").unwrap();
    assert_eq!(jane.borrow().id(), Some(1));
    assert!(!Rc::ptr_eq(&john, &jane));
    assert_eq!(john.borrow().full_name(), "John Doe");

    let found = patients.find_by_id(1).unwrap().unwrap();
    assert!(Rc::ptr_eq(&found, &jane));
}
