//! Interactive text menu.
//!
//! Every action is aborted on bad input or a rejected write, the error is
//! printed, and the menu carries on. Only closed input or a broken terminal
//! ends the session.

mod appointments;
mod console;
mod doctors;
mod medical_records;
mod patients;

pub use console::Console;

use std::io::{self, BufRead, Write};

use clinic_core::db::{Database, DbError, DbResult};
use clinic_core::models::{Shared, ValidationError};
use clinic_core::repository::{
    AppointmentRepository, DoctorRepository, Hydrator, MedicalRecordRepository,
    PatientRepository,
};
use thiserror::Error;

/// Why a menu action stopped.
#[derive(Error, Debug)]
pub enum MenuError {
    #[error("end of input")]
    EndOfInput,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("'{0}' is not a valid number")]
    InvalidNumber(String),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("{0}")]
    Database(#[from] DbError),
}

impl MenuError {
    /// Whether the session cannot continue.
    pub fn is_fatal(&self) -> bool {
        matches!(self, MenuError::EndOfInput | MenuError::Io(_))
    }
}

pub type MenuResult<T> = Result<T, MenuError>;

/// The four entity managers the menu drives.
#[derive(Clone, Copy)]
pub struct Repositories<'a> {
    pub patients: &'a PatientRepository<'a>,
    pub doctors: &'a DoctorRepository<'a>,
    pub appointments: &'a AppointmentRepository<'a>,
    pub medical_records: &'a MedicalRecordRepository<'a>,
}

type Action<'a, R, W> = fn(&mut Menu<'a, R, W>) -> MenuResult<()>;

/// Put `draft` into the shared instance and persist it with `write`.
///
/// If the write fails the previous values are put back, so holders never
/// see fields the database rejected.
fn commit<T>(
    shared: &Shared<T>,
    draft: T,
    write: impl FnOnce(&Shared<T>) -> DbResult<bool>,
) -> MenuResult<bool> {
    let previous = std::mem::replace(&mut *shared.borrow_mut(), draft);
    match write(shared) {
        Ok(written) => Ok(written),
        Err(err) => {
            *shared.borrow_mut() = previous;
            Err(err.into())
        }
    }
}

/// Main menu plus one sub-menu per entity.
pub struct Menu<'a, R, W> {
    repos: Repositories<'a>,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(repos: Repositories<'a>, console: Console<R, W>) -> Self {
        Self { repos, console }
    }

    /// Run until the user exits or input ends.
    pub fn run(&mut self) -> MenuResult<()> {
        match self.main_menu() {
            Err(MenuError::EndOfInput) => Ok(()),
            other => other,
        }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    fn main_menu(&mut self) -> MenuResult<()> {
        loop {
            self.console.say("")?;
            self.console.say("=== Clinic Records ===")?;
            self.console.say("1. Manage Patients")?;
            self.console.say("2. Manage Doctors")?;
            self.console.say("3. Manage Appointments")?;
            self.console.say("4. Manage Medical Records")?;
            self.console.say("5. Exit")?;

            let choice = self.console.prompt("Enter your choice: ")?;
            match choice.trim() {
                "1" => self.patients_menu()?,
                "2" => self.doctors_menu()?,
                "3" => self.appointments_menu()?,
                "4" => self.medical_records_menu()?,
                "5" => {
                    self.console.say("Goodbye.")?;
                    return Ok(());
                }
                _ => self
                    .console
                    .say("Invalid choice. Please enter a number between 1 and 5.")?,
            }
        }
    }

    /// Numbered sub-menu; `0` returns to the main menu.
    fn submenu(&mut self, title: &str, actions: &[(&str, Action<'a, R, W>)]) -> MenuResult<()> {
        loop {
            self.console.say("")?;
            self.console.say(format!("--- {} ---", title))?;
            for (number, (label, _)) in actions.iter().enumerate() {
                self.console.say(format!("{}. {}", number + 1, label))?;
            }
            self.console.say("0. Back to main menu")?;

            let choice = self.console.prompt("> ")?;
            let choice = choice.trim();
            if choice == "0" {
                return Ok(());
            }

            let selected = choice
                .parse::<usize>()
                .ok()
                .and_then(|number| number.checked_sub(1))
                .and_then(|index| actions.get(index));

            match selected {
                Some((_, action)) => {
                    let result = action(self);
                    self.report(result)?;
                }
                None => self.console.say("Invalid choice, please try again.")?,
            }
        }
    }

    /// Print a recoverable failure; pass fatal ones up.
    fn report(&mut self, result: MenuResult<()>) -> MenuResult<()> {
        match result {
            Ok(()) => Ok(()),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                tracing::debug!(error = %err, "menu action failed");
                self.console.say(format!("Error: {}", err))
            }
        }
    }
}

/// Wire the four repositories over `db` and run the menu on `console`.
///
/// Returns the console so callers can inspect what was written.
pub fn run<R: BufRead, W: Write>(
    db: &Database,
    console: Console<R, W>,
) -> MenuResult<Console<R, W>> {
    let appointments = AppointmentRepository::new(db);
    let medical_records = MedicalRecordRepository::new(db);
    let hydrator = Hydrator::new(&appointments, &medical_records);
    let patients = PatientRepository::new(db, hydrator);
    let doctors = DoctorRepository::new(db, hydrator);

    let repos = Repositories {
        patients: &patients,
        doctors: &doctors,
        appointments: &appointments,
        medical_records: &medical_records,
    };
    let mut menu = Menu::new(repos, console);
    menu.run()?;
    Ok(menu.into_console())
}
