//! CLI presentation: text and json formatters per command family.

mod hypha;
mod index;
mod shared;

pub use hypha::{format_revision_json, format_revision_text};
pub use index::{
    format_hypha_list_json, format_hypha_list_text, format_scan_summary_json,
    format_scan_summary_text,
};
