//! Command-line front end of the hierarchy comparison.

pub mod cli;
pub mod commands;
pub mod observability;

pub use cli::Cli;
pub use commands::run;
pub use observability::init_observability;
