use std::io::{BufRead, Write};

use clinic_core::models::{MedicalRecord, Shared};

use super::{commit, Menu, MenuResult};

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub(super) fn medical_records_menu(&mut self) -> MenuResult<()> {
        self.submenu(
            "Medical Records",
            &[
                ("List all medical records", Self::list_medical_records),
                ("Add a medical record", Self::create_medical_record),
                ("Find record by ID", Self::find_medical_record_by_id),
                ("Find records by patient", Self::find_medical_records_by_patient),
                ("Find records by doctor", Self::find_medical_records_by_doctor),
                ("Update a medical record", Self::update_medical_record),
                ("Delete a medical record", Self::delete_medical_record),
            ],
        )
    }

    fn list_medical_records(&mut self) -> MenuResult<()> {
        let records = self.repos.medical_records.get_all()?;
        self.show_medical_records(&records)
    }

    fn create_medical_record(&mut self) -> MenuResult<()> {
        let patient_id = self.console.prompt_number("Patient ID: ")?;
        let doctor_id = self.console.prompt_number("Doctor ID: ")?;
        let record_date = self.console.prompt("Record date (YYYY-MM-DD): ")?;
        let diagnosis = self.console.prompt("Diagnosis: ")?;
        let treatment = self.console.prompt("Treatment: ")?;

        let record = self.repos.medical_records.create(
            patient_id,
            doctor_id,
            record_date,
            diagnosis,
            treatment,
        )?;
        let id = record.borrow().id().unwrap_or_default();
        self.console.say(format!("Medical record added with ID {}.", id))
    }

    fn find_medical_record_by_id(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Record ID: ")?;
        match self.repos.medical_records.find_by_id(id)? {
            Some(record) => {
                let record = record.borrow();
                self.console.say(&*record)
            }
            None => self.console.say("Medical record not found."),
        }
    }

    fn find_medical_records_by_patient(&mut self) -> MenuResult<()> {
        let patient_id = self.console.prompt_number("Patient ID: ")?;
        let records = self.repos.medical_records.find_by_patient_id(patient_id)?;
        self.show_medical_records(&records)
    }

    fn find_medical_records_by_doctor(&mut self) -> MenuResult<()> {
        let doctor_id = self.console.prompt_number("Doctor ID: ")?;
        let records = self.repos.medical_records.find_by_doctor_id(doctor_id)?;
        self.show_medical_records(&records)
    }

    fn update_medical_record(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Record ID to update: ")?;
        let Some(record) = self.repos.medical_records.find_by_id(id)? else {
            return self.console.say("Medical record not found.");
        };

        let mut draft = record.borrow().clone();
        let patient_id = self
            .console
            .prompt_number_or_keep("Patient ID", draft.patient_id())?;
        draft.set_patient_id(patient_id)?;
        let doctor_id = self
            .console
            .prompt_number_or_keep("Doctor ID", draft.doctor_id())?;
        draft.set_doctor_id(doctor_id)?;
        let record_date = self.console.prompt_or_keep("Record date", draft.record_date())?;
        draft.set_record_date(record_date);
        let diagnosis = self.console.prompt_or_keep("Diagnosis", draft.diagnosis())?;
        draft.set_diagnosis(diagnosis)?;
        let treatment = self.console.prompt_or_keep("Treatment", draft.treatment())?;
        draft.set_treatment(treatment)?;

        let medical_records = self.repos.medical_records;
        commit(&record, draft, |record| medical_records.update(record))?;
        self.console.say("Medical record updated.")
    }

    fn delete_medical_record(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Record ID to delete: ")?;
        let Some(record) = self.repos.medical_records.find_by_id(id)? else {
            return self.console.say("Medical record not found.");
        };

        let question = format!("Delete medical record #{}?", id);
        if !self.console.confirm(&question)? {
            return self.console.say("Deletion cancelled.");
        }
        self.repos.medical_records.delete(&record)?;
        self.console.say("Medical record deleted.")
    }

    fn show_medical_records(&mut self, records: &[Shared<MedicalRecord>]) -> MenuResult<()> {
        if records.is_empty() {
            return self.console.say("No medical records found.");
        }
        for record in records {
            self.console.say(&*record.borrow())?;
        }
        Ok(())
    }
}
