//! Clinic Records console
//!
//! Argument parsing, logging setup, the interactive menu and the one-shot
//! `seed` and `export` commands. The `clinic` binary is a thin wrapper
//! around this library.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod menu;

pub use cli::{Cli, Command, StoreArgs};
pub use menu::{Console, Menu, MenuError, MenuResult, Repositories};
