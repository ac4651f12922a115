//! Plain-text rendering.

use super::ExportDocument;

/// Render the document as indented plain text.
///
/// ```text
/// Acme Q3 Plan
/// ============
///
/// Personas
///   [0].name: Founder
/// ```
pub(super) fn render(doc: &ExportDocument) -> String {
    let mut out = String::new();
    out.push_str(&doc.title);
    out.push('\n');
    out.push_str(&"=".repeat(doc.title.chars().count()));
    out.push('\n');

    for section in &doc.sections {
        out.push('\n');
        out.push_str(&section.heading);
        out.push('\n');
        for entry in &section.entries {
            if entry.field.is_empty() {
                out.push_str(&format!("  {}\n", entry.value));
            } else {
                out.push_str(&format!("  {}: {}\n", entry.field, entry.value));
            }
        }
    }

    out
}
