//! CLI domain: parse, route, help, output, and presentation only.
//! No domain orchestration; single route table dispatches to the hypha index.

mod help;
mod output;
mod parse;
mod presentation;
mod route;

pub use help::command_name;
pub use output::map_error;
pub use parse::{Cli, Commands};
pub use presentation::{
    format_hypha_list_json, format_hypha_list_text, format_revision_json, format_revision_text,
    format_scan_summary_json, format_scan_summary_text,
};
pub use route::RunContext;
