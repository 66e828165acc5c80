// Subcommand handlers. main.rs parses arguments and dispatches here.

pub mod inspect;
pub mod route;
