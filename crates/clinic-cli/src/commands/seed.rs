//! Seed command
//!
//! Usage: clinic [--db PATH] seed

use std::io::Write;

use anyhow::Context;
use clinic_core::db::Database;
use clinic_core::seed;

/// Drop and refill the patients table, then report the count.
pub fn execute(db: &Database, out: &mut impl Write) -> anyhow::Result<()> {
    let inserted = seed::seed_patients(db).context("failed to seed patients")?;
    writeln!(out, "Seeded {} patients.", inserted)?;
    Ok(())
}
