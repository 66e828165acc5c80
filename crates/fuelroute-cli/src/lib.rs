//! fuelroute CLI library.
//!
//! Subcommand handlers plus the terminal styling and output formatting they
//! share. `main.rs` only parses arguments and dispatches here.

pub mod commands;
pub mod output;
pub mod terminal;

pub use output::OutputFormat;
