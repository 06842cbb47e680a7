use std::io::{BufRead, Write};

use clinic_core::models::{Doctor, Shared};

use super::{commit, Menu, MenuResult};

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub(super) fn doctors_menu(&mut self) -> MenuResult<()> {
        self.submenu(
            "Doctors",
            &[
                ("List all doctors", Self::list_doctors),
                ("Add a doctor", Self::create_doctor),
                ("Find doctor by ID", Self::find_doctor_by_id),
                ("Find doctor by name", Self::find_doctor_by_name),
                ("Update a doctor", Self::update_doctor),
                ("Delete a doctor", Self::delete_doctor),
            ],
        )
    }

    fn list_doctors(&mut self) -> MenuResult<()> {
        let doctors = self.repos.doctors.get_all()?;
        if doctors.is_empty() {
            return self.console.say("No doctors found.");
        }
        for doctor in &doctors {
            self.console.say(&*doctor.borrow())?;
        }
        Ok(())
    }

    fn create_doctor(&mut self) -> MenuResult<()> {
        let name = self.console.prompt("Name: ")?;
        let specialization = self.console.prompt("Specialization: ")?;

        let doctor = self.repos.doctors.create(name, specialization)?;
        let doctor = doctor.borrow();
        self.console.say(format!(
            "Doctor {} added with ID {}.",
            doctor.name(),
            doctor.id().unwrap_or_default()
        ))
    }

    fn find_doctor_by_id(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Doctor ID: ")?;
        match self.repos.doctors.find_by_id(id)? {
            Some(doctor) => self.show_doctor(&doctor),
            None => self.console.say("Doctor not found."),
        }
    }

    fn find_doctor_by_name(&mut self) -> MenuResult<()> {
        let name = self.console.prompt("Name: ")?;
        match self.repos.doctors.find_by_name(&name)? {
            Some(doctor) => self.show_doctor(&doctor),
            None => self.console.say("Doctor not found."),
        }
    }

    fn update_doctor(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Doctor ID to update: ")?;
        let Some(doctor) = self.repos.doctors.find_by_id(id)? else {
            return self.console.say("Doctor not found.");
        };

        let mut draft = doctor.borrow().clone();
        let name = self.console.prompt_or_keep("Name", draft.name())?;
        draft.set_name(name)?;
        let specialization = self
            .console
            .prompt_or_keep("Specialization", draft.specialization())?;
        draft.set_specialization(specialization)?;

        let doctors = self.repos.doctors;
        commit(&doctor, draft, |doctor| doctors.update(doctor))?;
        self.console.say("Doctor updated.")
    }

    fn delete_doctor(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Doctor ID to delete: ")?;
        let Some(doctor) = self.repos.doctors.find_by_id(id)? else {
            return self.console.say("Doctor not found.");
        };

        let question = format!("Delete Dr. {}?", doctor.borrow().name());
        if !self.console.confirm(&question)? {
            return self.console.say("Deletion cancelled.");
        }
        self.repos.doctors.delete(&doctor)?;
        self.console.say("Doctor deleted.")
    }

    fn show_doctor(&mut self, doctor: &Shared<Doctor>) -> MenuResult<()> {
        let doctor = doctor.borrow();
        self.console.say(&*doctor)?;
        for appointment in doctor.appointments() {
            self.console.say(format!("  {}", appointment.borrow()))?;
        }
        for record in doctor.medical_records() {
            self.console.say(format!("  {}", record.borrow()))?;
        }
        Ok(())
    }
}
