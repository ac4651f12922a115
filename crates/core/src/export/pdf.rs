//! PDF rendering on A4 pages with the built-in Helvetica faces.

use printpdf::{
    BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference, PdfLayerReference,
};

use super::ExportDocument;
use crate::error::CoreError;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const INDENT_MM: f32 = 6.0;

const TITLE_SIZE: f32 = 18.0;
const HEADING_SIZE: f32 = 13.0;
const BODY_SIZE: f32 = 10.0;

/// Points to millimetres.
const PT_TO_MM: f32 = 0.3528;
/// Line height as a multiple of the font size.
const LINE_SPACING: f32 = 1.4;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.5;

const LAYER_NAME: &str = "Layer 1";

/// Greedy word wrap to at most `max_chars` characters per line.
///
/// Words longer than a line are hard-split. Always returns at least one line.
pub fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        let word: String = word.into_iter().collect();
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max_chars && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Characters that fit on one line at `font_size` with the given indent.
fn chars_per_line(font_size: f32, indent_mm: f32) -> usize {
    let usable_mm = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - indent_mm;
    let glyph_mm = font_size * AVG_GLYPH_WIDTH * PT_TO_MM;
    (usable_mm / glyph_mm).floor() as usize
}

/// Cursor-based page writer that starts a new page at the bottom margin.
struct PageWriter {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    cursor_y: f32,
}

impl PageWriter {
    fn new(title: &str) -> Result<Self, CoreError> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(pdf_error)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(pdf_error)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor_y: PAGE_HEIGHT_MM - MARGIN_MM,
        })
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), LAYER_NAME);
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor_y = PAGE_HEIGHT_MM - MARGIN_MM;
    }

    fn write(&mut self, text: &str, font_size: f32, bold: bool, indent_mm: f32) {
        let line_height = font_size * PT_TO_MM * LINE_SPACING;
        for line in wrap_text(text, chars_per_line(font_size, indent_mm)) {
            if self.cursor_y - line_height < MARGIN_MM {
                self.new_page();
            }
            self.cursor_y -= line_height;
            let font = if bold { &self.bold } else { &self.regular };
            self.layer.use_text(
                line,
                font_size,
                Mm(MARGIN_MM + indent_mm),
                Mm(self.cursor_y),
                font,
            );
        }
    }

    fn gap(&mut self, mm: f32) {
        self.cursor_y -= mm;
    }

    fn finish(self) -> Result<Vec<u8>, CoreError> {
        self.doc.save_to_bytes().map_err(pdf_error)
    }
}

fn pdf_error(err: printpdf::Error) -> CoreError {
    CoreError::Internal(format!("PDF generation failed: {err:?}"))
}

pub(super) fn render(doc: &ExportDocument) -> Result<Vec<u8>, CoreError> {
    let mut writer = PageWriter::new(&doc.title)?;
    writer.write(&doc.title, TITLE_SIZE, true, 0.0);

    for section in &doc.sections {
        writer.gap(4.0);
        writer.write(&section.heading, HEADING_SIZE, true, 0.0);
        for entry in &section.entries {
            let line = if entry.field.is_empty() {
                entry.value.clone()
            } else {
                format!("{}: {}", entry.field, entry.value)
            };
            writer.write(&line, BODY_SIZE, false, INDENT_MM);
        }
    }

    writer.finish()
}
