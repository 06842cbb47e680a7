//! Clinic Records CLI
//!
//! Usage: clinic [--db PATH] [--enforce-foreign-keys] [menu|seed|export]

use std::io;

use anyhow::Context;
use clap::Parser;
use clinic_cli::commands;
use clinic_cli::menu::{self, Console};
use clinic_cli::{logging, Cli, Command};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init();

    let db = cli
        .store
        .open()
        .with_context(|| format!("failed to open database {}", cli.store.db_path.display()))?;
    tracing::debug!(
        path = %cli.store.db_path.display(),
        enforce_foreign_keys = db.foreign_keys_enforced()?,
        "database opened"
    );

    let mut stdout = io::stdout();
    match cli.into_command() {
        Command::Menu => {
            let console = Console::new(io::stdin().lock(), &mut stdout);
            menu::run(&db, console)?;
        }
        Command::Seed => commands::seed::execute(&db, &mut stdout)?,
        Command::Export(args) => commands::export::execute(&db, &args, &mut stdout)?,
    }

    db.close()?;
    Ok(())
}
