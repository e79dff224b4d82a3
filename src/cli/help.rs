//! CLI help and command-name contract for logging spans.

use crate::cli::parse::Commands;

/// Command name string used in log spans (e.g. "scan", "show").
pub fn command_name(command: &Commands) -> &'static str {
    match command {
        Commands::Scan { .. } => "scan",
        Commands::List { .. } => "list",
        Commands::Show { .. } => "show",
        Commands::Raw { .. } => "raw",
    }
}
