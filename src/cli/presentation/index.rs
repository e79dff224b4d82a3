//! Index presentation: scan summary and hypha list, text/json.

use super::shared::{format_section_heading, to_pretty_json};
use crate::error::ApiError;
use crate::store::HyphaIndex;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use serde_json::json;

pub fn format_scan_summary_text(index: &HyphaIndex) -> String {
    let report = index.report();
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", format_section_heading("Hypha Index")));
    out.push_str(&format!("  Root: {}\n", index.root().display()));
    out.push_str(&format!("  Hyphae: {}\n", index.len()));
    out.push_str(&format!("  Revisions: {}\n", index.revision_count()));
    out.push_str(&format!("  Directories scanned: {}\n", report.dirs_scanned));

    if report.is_clean() {
        out.push_str("\nNo warnings.");
    } else {
        out.push_str(&format!(
            "\n{}\n",
            format_section_heading(&format!("Warnings ({})", report.warnings.len()))
        ));
        for warning in &report.warnings {
            out.push_str(&format!("\n  - {}", warning));
        }
    }
    out
}

pub fn format_scan_summary_json(index: &HyphaIndex) -> Result<String, ApiError> {
    let report = index.report();
    let out = json!({
        "root": index.root(),
        "hyphae": index.len(),
        "revisions": index.revision_count(),
        "dirs_scanned": report.dirs_scanned,
        "warnings": report.warnings,
    });
    to_pretty_json(&out)
}

pub fn format_hypha_list_text(index: &HyphaIndex) -> String {
    if index.is_empty() {
        return "No hyphae found.".to_string();
    }
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);
    table.set_header(vec!["Hypha", "Parent", "Revisions", "Newest", "Children"]);
    for hypha in index.iter() {
        let newest = hypha
            .newest_revision()
            .map(|rev| rev.id.clone())
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            hypha.full_name.clone(),
            hypha.parent_name().unwrap_or("-").to_string(),
            hypha.revisions.len().to_string(),
            newest,
            hypha.children.len().to_string(),
        ]);
    }
    format!("{}\n\nTotal: {} hypha(e)", table, index.len())
}

pub fn format_hypha_list_json(index: &HyphaIndex) -> Result<String, ApiError> {
    let hyphae: Vec<_> = index
        .iter()
        .map(|hypha| {
            json!({
                "name": hypha.full_name,
                "parent": hypha.parent_name(),
                "revisions": hypha.revisions.keys().collect::<Vec<_>>(),
                "newest_revision": hypha.newest_revision().map(|rev| rev.id.as_str()),
                "children": hypha.children,
            })
        })
        .collect();
    to_pretty_json(&json!({ "hyphae": hyphae, "total": index.len() }))
}
