use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// CLI arguments for the tylo-lower binary.
#[derive(Parser, Debug)]
#[command(
    name = "tylo-lower",
    version,
    about = "Lower the types of a JSON fixture to IR types and print them"
)]
pub struct CliArgs {
    /// Fixture file describing classes, type parameters, aliases, captured
    /// types and the types to lower.
    pub fixture: PathBuf,

    /// Output format.
    #[arg(long, value_enum, ignore_case = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// Lower entries on the rayon thread pool. Output order is unchanged.
    #[arg(long)]
    pub parallel: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// `name: rendered type`, one line per entry.
    Text,
    /// JSON array of `{name, type, ir}` objects.
    Json,
}

#[cfg(test)]
#[path = "../tests/args_tests.rs"]
mod tests;
