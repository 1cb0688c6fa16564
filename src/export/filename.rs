// src/export/filename.rs
use visit_report_types::{ExportFormat, Visit};

/// Keeps ASCII letters, digits, `_` and `-`; everything else is dropped.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric() || *c == '_' || *c == '-')
        .collect()
}

/// `{prefix}_{client}_{site}_{YYYYMMDD}.{ext}` with client and site sanitized.
pub fn report_filename(prefix: &str, visit: &Visit, format: ExportFormat) -> String {
    format!(
        "{}_{}_{}_{}.{}",
        prefix,
        sanitize_component(&visit.client_name),
        sanitize_component(&visit.site_name),
        visit.visit_date.format("%Y%m%d"),
        format.extension()
    )
}
