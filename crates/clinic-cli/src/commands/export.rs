//! Export command
//!
//! Usage: clinic [--db PATH] export [--output PATH]

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use clinic_core::db::Database;
use clinic_core::export::ClinicExport;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Write to this file instead of stdout
    #[arg(long, short)]
    pub output: Option<PathBuf>,
}

/// Dump every table as pretty JSON.
pub fn execute(db: &Database, args: &ExportArgs, out: &mut impl Write) -> anyhow::Result<()> {
    let export = ClinicExport::collect(db).context("failed to read tables")?;
    let json = export.to_json()?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &json)
                .with_context(|| format!("failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), rows = export.row_count(), "export written");
            writeln!(out, "Exported {} rows to {}.", export.row_count(), path.display())?;
        }
        None => writeln!(out, "{}", json)?,
    }
    Ok(())
}
