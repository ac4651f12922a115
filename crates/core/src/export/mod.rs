//! Strategy export: turn a strategy payload into a downloadable file.
//!
//! The payload is flattened once into an [`ExportDocument`] (title plus
//! ordered sections of `field: value` entries) and each format renders that
//! document in a single synchronous pass.

mod csv;
mod pdf;
mod text;

use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::CoreError;

pub use self::csv::csv_escape;
pub use self::pdf::wrap_text;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Title used when the payload carries no `title` string.
pub const DEFAULT_TITLE: &str = "Content Strategy";

/// Payload key whose string value becomes the document title.
pub const TITLE_KEY: &str = "title";

/// Filename stem used when the title has no usable characters.
const FALLBACK_FILE_STEM: &str = "export";

// ---------------------------------------------------------------------------
// Format
// ---------------------------------------------------------------------------

/// A supported export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    Csv,
    Txt,
}

/// All accepted format names.
pub const VALID_FORMATS: &[&str] = &["pdf", "csv", "txt"];

impl ExportFormat {
    /// MIME type sent as `Content-Type`.
    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Csv => "text/csv",
            ExportFormat::Txt => "text/plain",
        }
    }

    /// File extension (without the dot).
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Pdf => "pdf",
            ExportFormat::Csv => "csv",
            ExportFormat::Txt => "txt",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pdf" => Ok(ExportFormat::Pdf),
            "csv" => Ok(ExportFormat::Csv),
            "txt" => Ok(ExportFormat::Txt),
            other => Err(CoreError::Validation(format!(
                "Invalid export format '{other}'. Must be one of: {}",
                VALID_FORMATS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

// ---------------------------------------------------------------------------
// Document model
// ---------------------------------------------------------------------------

/// A single `field: value` line. `field` is empty when the section itself
/// holds a scalar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub field: String,
    pub value: String,
}

/// A titled group of entries, one per top-level payload key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSection {
    pub heading: String,
    pub entries: Vec<ExportEntry>,
}

/// Format-independent, flattened view of a strategy payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportDocument {
    pub title: String,
    pub sections: Vec<ExportSection>,
}

impl ExportDocument {
    /// Flatten a JSON payload. The payload must be an object.
    pub fn from_json(data: &Value) -> Result<Self, CoreError> {
        let map = data
            .as_object()
            .ok_or_else(|| CoreError::Validation("Export data must be a JSON object".into()))?;

        let title = map
            .get(TITLE_KEY)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        let sections = map
            .iter()
            .filter(|(key, value)| !(key.as_str() == TITLE_KEY && value.is_string()))
            .map(|(key, value)| {
                let mut entries = Vec::new();
                flatten_into("", value, &mut entries);
                ExportSection {
                    heading: heading_from_key(key),
                    entries,
                }
            })
            .collect();

        Ok(Self { title, sections })
    }

    /// Total number of entries across all sections.
    pub fn entry_count(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }
}

/// Walk `value`, pushing one entry per scalar leaf with a dotted/indexed path.
fn flatten_into(path: &str, value: &Value, out: &mut Vec<ExportEntry>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let child_path = if path.is_empty() {
                    key.clone()
                } else {
                    format!("{path}.{key}")
                };
                flatten_into(&child_path, child, out);
            }
        }
        Value::Array(items) if !items.is_empty() => {
            for (index, child) in items.iter().enumerate() {
                flatten_into(&format!("{path}[{index}]"), child, out);
            }
        }
        Value::Object(_) | Value::Array(_) | Value::Null => out.push(ExportEntry {
            field: path.to_string(),
            value: String::new(),
        }),
        Value::String(s) => out.push(ExportEntry {
            field: path.to_string(),
            value: s.clone(),
        }),
        other => out.push(ExportEntry {
            field: path.to_string(),
            value: other.to_string(),
        }),
    }
}

/// `go_to_market_plan` / `goToMarketPlan` -> `Go To Market Plan`.
pub fn heading_from_key(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut prev_lower = false;

    for ch in key.chars() {
        if ch == '_' || ch == '-' || ch.is_whitespace() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            prev_lower = false;
            continue;
        }
        if ch.is_uppercase() && prev_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        current.push(ch);
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Lowercase, hyphen-separated filename stem.
pub fn file_stem(title: &str) -> String {
    let mut stem = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            stem.push(ch.to_ascii_lowercase());
        } else if !stem.ends_with('-') {
            stem.push('-');
        }
    }
    let stem = stem.trim_matches('-');
    if stem.is_empty() {
        FALLBACK_FILE_STEM.to_string()
    } else {
        stem.to_string()
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

/// A rendered file ready to be sent as an attachment.
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub filename: String,
}

/// Render `doc` in the requested format.
pub fn render(doc: &ExportDocument, format: ExportFormat) -> Result<ExportFile, CoreError> {
    let bytes = match format {
        ExportFormat::Txt => text::render(doc).into_bytes(),
        ExportFormat::Csv => csv::render(doc).into_bytes(),
        ExportFormat::Pdf => pdf::render(doc)?,
    };

    Ok(ExportFile {
        bytes,
        content_type: format.content_type(),
        filename: format!("{}.{}", file_stem(&doc.title), format.extension()),
    })
}

/// Parse the format, flatten the payload and render it.
pub fn export(data: &Value, format: &str) -> Result<ExportFile, CoreError> {
    let format: ExportFormat = format.parse()?;
    let doc = ExportDocument::from_json(data)?;
    render(&doc, format)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
