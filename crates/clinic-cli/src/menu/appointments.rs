use std::io::{BufRead, Write};

use clinic_core::models::{Appointment, Shared};

use super::{commit, Menu, MenuResult};

/// Empty notes are stored as NULL.
fn notes_from(answer: String) -> Option<String> {
    if answer.is_empty() {
        None
    } else {
        Some(answer)
    }
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub(super) fn appointments_menu(&mut self) -> MenuResult<()> {
        self.submenu(
            "Appointments",
            &[
                ("List all appointments", Self::list_appointments),
                ("Schedule an appointment", Self::create_appointment),
                ("Find appointment by ID", Self::find_appointment_by_id),
                ("Find appointments by patient", Self::find_appointments_by_patient),
                ("Find appointments by doctor", Self::find_appointments_by_doctor),
                ("Update an appointment", Self::update_appointment),
                ("Delete an appointment", Self::delete_appointment),
            ],
        )
    }

    fn list_appointments(&mut self) -> MenuResult<()> {
        let appointments = self.repos.appointments.get_all()?;
        self.show_appointments(&appointments)
    }

    fn create_appointment(&mut self) -> MenuResult<()> {
        let date = self.console.prompt("Date (YYYY-MM-DD HH:MM): ")?;
        let patient_id = self.console.prompt_number("Patient ID: ")?;
        let doctor_id = self.console.prompt_number("Doctor ID: ")?;
        let notes = notes_from(self.console.prompt("Notes (optional): ")?);

        let appointment = self
            .repos
            .appointments
            .create(date, patient_id, doctor_id, notes)?;
        let id = appointment.borrow().id().unwrap_or_default();
        self.console.say(format!("Appointment scheduled with ID {}.", id))
    }

    fn find_appointment_by_id(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Appointment ID: ")?;
        match self.repos.appointments.find_by_id(id)? {
            Some(appointment) => {
                let appointment = appointment.borrow();
                self.console.say(&*appointment)
            }
            None => self.console.say("Appointment not found."),
        }
    }

    fn find_appointments_by_patient(&mut self) -> MenuResult<()> {
        let patient_id = self.console.prompt_number("Patient ID: ")?;
        let appointments = self.repos.appointments.find_by_patient_id(patient_id)?;
        self.show_appointments(&appointments)
    }

    fn find_appointments_by_doctor(&mut self) -> MenuResult<()> {
        let doctor_id = self.console.prompt_number("Doctor ID: ")?;
        let appointments = self.repos.appointments.find_by_doctor_id(doctor_id)?;
        self.show_appointments(&appointments)
    }

    fn update_appointment(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Appointment ID to update: ")?;
        let Some(appointment) = self.repos.appointments.find_by_id(id)? else {
            return self.console.say("Appointment not found.");
        };

        let mut draft = appointment.borrow().clone();
        let date = self.console.prompt_or_keep("Date", draft.appointment_date())?;
        draft.set_appointment_date(date);
        let patient_id = self
            .console
            .prompt_number_or_keep("Patient ID", draft.patient_id())?;
        draft.set_patient_id(patient_id)?;
        let doctor_id = self
            .console
            .prompt_number_or_keep("Doctor ID", draft.doctor_id())?;
        draft.set_doctor_id(doctor_id)?;
        let current_notes = draft.notes().unwrap_or_default().to_string();
        let notes = self.console.prompt_or_keep("Notes", &current_notes)?;
        draft.set_notes(notes_from(notes));

        let appointments = self.repos.appointments;
        commit(&appointment, draft, |appointment| appointments.update(appointment))?;
        self.console.say("Appointment updated.")
    }

    fn delete_appointment(&mut self) -> MenuResult<()> {
        let id = self.console.prompt_number("Appointment ID to delete: ")?;
        let Some(appointment) = self.repos.appointments.find_by_id(id)? else {
            return self.console.say("Appointment not found.");
        };

        let question = format!("Delete appointment #{}?", id);
        if !self.console.confirm(&question)? {
            return self.console.say("Deletion cancelled.");
        }
        self.repos.appointments.delete(&appointment)?;
        self.console.say("Appointment deleted.")
    }

    fn show_appointments(&mut self, appointments: &[Shared<Appointment>]) -> MenuResult<()> {
        if appointments.is_empty() {
            return self.console.say("No appointments found.");
        }
        for appointment in appointments {
            self.console.say(&*appointment.borrow())?;
        }
        Ok(())
    }
}
