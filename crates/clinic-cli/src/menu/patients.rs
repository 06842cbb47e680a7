use std::io::{BufRead, Write};

use clinic_core::models::{Patient, Shared};

use super::{commit, Menu, MenuResult};

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub(super) fn patients_menu(&mut self) -> MenuResult<()> {
        self.submenu(
            "Patients",
            &[
                ("List all patients", Self::list_patients),
                ("Add a patient", Self::create_patient),
                ("Find patient by ID", Self::find_patient_by_id),
                ("Find patient by name", Self::find_patient_by_name),
                ("Update a patient", Self::update_patient),
                ("Delete a patient", Self::delete_patient),
            ],
        )
    }

    fn list_patients(&mut self) -> MenuResult<()> {
        let patients = self.repos.patients.get_all()?;
        if patients.is_empty() {
            return self.console.say("No patients found.");
        }
        for patient in &patients {
            self.console.say(&*patient.borrow())?;
        }
        Ok(())
    }

    fn create_patient(&mut self) -> MenuResult<()> {
        let first_name = self.console.prompt("First name: ")?;
        let last_name = self.console.prompt("Last name: ")?;
        let age = self.console.prompt_number("Age: ")?;
        let gender = self.console.prompt("Gender (Male/Female/Other): ")?;

        let patient = self
            .repos
            .patients
            .create(first_name, last_name, age, &gender)?;
        let patient = patient.borrow();
        self.console.say(format!(
            "Patient {} added with ID {}.",
            patient.full_name(),
            patient.id().unwrap_or_default()
        ))
    }

    fn find_patient_by_id(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Patient ID: ")?;
        match self.repos.patients.find_by_id(id)? {
            Some(patient) => self.show_patient(&patient),
            None => self.console.say("Patient not found."),
        }
    }

    fn find_patient_by_name(&mut self) -> MenuResult<()> {
        let first_name = self.console.prompt("First name: ")?;
        let last_name = self.console.prompt("Last name: ")?;
        match self.repos.patients.find_by_name(&first_name, &last_name)? {
            Some(patient) => self.show_patient(&patient),
            None => self.console.say("Patient not found."),
        }
    }

    fn update_patient(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Patient ID to update: ")?;
        let Some(patient) = self.repos.patients.find_by_id(id)? else {
            return self.console.say("Patient not found.");
        };

        // Edit a copy so a rejected field leaves the shared instance untouched
        let mut draft = patient.borrow().clone();
        let first_name = self.console.prompt_or_keep("First name", draft.first_name())?;
        draft.set_first_name(first_name)?;
        let last_name = self.console.prompt_or_keep("Last name", draft.last_name())?;
        draft.set_last_name(last_name)?;
        let age = self.console.prompt_number_or_keep("Age", draft.age())?;
        draft.set_age(age)?;
        let gender = self
            .console
            .prompt_or_keep("Gender (Male/Female/Other)", draft.gender().as_str())?;
        draft.set_gender(&gender)?;

        let patients = self.repos.patients;
        commit(&patient, draft, |patient| patients.update(patient))?;
        self.console.say("Patient updated.")
    }

    fn delete_patient(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Patient ID to delete: ")?;
        let Some(patient) = self.repos.patients.find_by_id(id)? else {
            return self.console.say("Patient not found.");
        };

        let question = format!("Delete {}?", patient.borrow().full_name());
        if !self.console.confirm(&question)? {
            return self.console.say("Deletion cancelled.");
        }
        self.repos.patients.delete(&patient)?;
        self.console.say("Patient deleted.")
    }

    fn show_patient(&mut self, patient: &Shared<Patient>) -> MenuResult<()> {
        let patient = patient.borrow();
        self.console.say(&*patient)?;
        for appointment in patient.appointments() {
            self.console.say(format!("  {}", appointment.borrow()))?;
        }
        for record in patient.medical_records() {
            self.console.say(format!("  {}", record.borrow()))?;
        }
        Ok(())
    }
}
