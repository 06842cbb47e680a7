//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use clinic_core::db::{Database, DatabaseOptions, DbResult};

use crate::commands::export::ExportArgs;

#[derive(Debug, Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic records: patients, doctors and their visits", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub store: StoreArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive menu (default)
    Menu,
    /// Reset the patients table with the sample patients
    Seed,
    /// Dump every table as JSON
    Export(ExportArgs),
}

/// Where the database lives and how it is opened.
#[derive(Debug, Clone, Args)]
pub struct StoreArgs {
    /// SQLite database file
    #[arg(long = "db", env = "CLINIC_DB", default_value = "hospital.db", global = true)]
    pub db_path: PathBuf,

    /// Reject rows that reference missing patients or doctors
    #[arg(long, env = "CLINIC_ENFORCE_FK", global = true)]
    pub enforce_foreign_keys: bool,
}

impl StoreArgs {
    pub fn options(&self) -> DatabaseOptions {
        DatabaseOptions {
            enforce_foreign_keys: self.enforce_foreign_keys,
        }
    }

    /// Open (creating if needed) the database file.
    pub fn open(&self) -> DbResult<Database> {
        Database::open_with(&self.db_path, self.options())
    }
}

impl Cli {
    /// The subcommand to run; no subcommand means the menu.
    pub fn into_command(self) -> Command {
        self.command.unwrap_or(Command::Menu)
    }
}
