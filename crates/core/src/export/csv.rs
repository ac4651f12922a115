//! CSV rendering: one `section,field,value` row per entry.

use super::ExportDocument;

const HEADER: &str = "section,field,value";

/// Quote a CSV field when it contains a delimiter, quote or line break.
pub fn csv_escape(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub(super) fn render(doc: &ExportDocument) -> String {
    let mut lines = Vec::with_capacity(doc.entry_count() + 1);
    lines.push(HEADER.to_string());

    for section in &doc.sections {
        for entry in &section.entries {
            lines.push(format!(
                "{},{},{}",
                csv_escape(&section.heading),
                csv_escape(&entry.field),
                csv_escape(&entry.value)
            ));
        }
    }

    let mut out = lines.join("\r\n");
    out.push_str("\r\n");
    out
}
