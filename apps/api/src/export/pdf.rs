//! PDF export with an embedded Unicode TrueType font.
//!
//! Rendering is in memory; layout, wrapping and page breaks are genpdf's job.

use genpdf::{elements, fonts, Document, SimplePageDecorator};
use printpdf::BuiltinFont;

use crate::errors::AppError;
use crate::export::docx::DOCUMENT_HEADING;
use crate::export::export_lines;

const FONT_SIZE_PT: u8 = 12;
const LINE_SPACING: f64 = 1.25;
const PAGE_MARGIN_MM: i32 = 10;

/// Parses TrueType font bytes. Run once at startup so a bad font fails fast.
pub fn load_font(font_bytes: &[u8]) -> Result<fonts::FontData, AppError> {
    fonts::FontData::new(font_bytes.to_vec(), None)
        .map_err(|e| AppError::ExportWrite(format!("font could not be loaded: {e}")))
}

/// Renders `final_text` as an A4 PDF, one wrapped paragraph per line.
/// Blank lines become blank vertical space.
pub fn render_pdf(final_text: &str, font_bytes: &[u8]) -> Result<Vec<u8>, AppError> {
    let mut doc = Document::new(font_family(font_bytes)?);
    doc.set_title(DOCUMENT_HEADING);
    doc.set_minimal_conformance();
    doc.set_font_size(FONT_SIZE_PT);
    doc.set_line_spacing(LINE_SPACING);

    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(PAGE_MARGIN_MM);
    doc.set_page_decorator(decorator);

    for line in export_lines(final_text) {
        if line.trim().is_empty() {
            doc.push(elements::Break::new(1));
        } else {
            doc.push(elements::Paragraph::new(line));
        }
    }

    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::ExportWrite(format!("PDF rendering failed: {e}")))?;
    Ok(buffer)
}

/// Only the regular face is ever drawn, so it is the only one embedded.
/// The other styles point at built-in PDF fonts, which cost nothing in the file.
fn font_family(font_bytes: &[u8]) -> Result<fonts::FontFamily<fonts::FontData>, AppError> {
    let unused_style = |builtin| {
        fonts::FontData::new(font_bytes.to_vec(), Some(builtin))
            .map_err(|e| AppError::ExportWrite(format!("font could not be loaded: {e}")))
    };
    Ok(fonts::FontFamily {
        regular: load_font(font_bytes)?,
        bold: unused_style(BuiltinFont::HelveticaBold)?,
        italic: unused_style(BuiltinFont::HelveticaOblique)?,
        bold_italic: unused_style(BuiltinFont::HelveticaBoldOblique)?,
    })
}
