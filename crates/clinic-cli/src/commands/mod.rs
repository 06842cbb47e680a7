//! One-shot subcommands.

pub mod export;
pub mod seed;
