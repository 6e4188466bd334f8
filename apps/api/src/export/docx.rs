//! Word document export.

use std::io::Cursor;

use docx_rs::{Docx, Paragraph, Run, Style, StyleType};

use crate::errors::AppError;
use crate::export::export_lines;

pub const DOCUMENT_HEADING: &str = "Final Resume";
const HEADING_STYLE: &str = "Heading1";

/// Builds a `.docx` with a level-1 "Final Resume" heading and one paragraph per line.
pub fn build_docx(final_text: &str) -> Result<Vec<u8>, AppError> {
    let heading_style = Style::new(HEADING_STYLE, StyleType::Paragraph)
        .name("Heading 1")
        .size(32)
        .bold();

    let mut doc = Docx::new().add_style(heading_style).add_paragraph(
        Paragraph::new()
            .style(HEADING_STYLE)
            .add_run(Run::new().add_text(DOCUMENT_HEADING)),
    );

    for line in export_lines(final_text) {
        doc = doc.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line)));
    }

    let mut buffer = Cursor::new(Vec::new());
    doc.build()
        .pack(&mut buffer)
        .map_err(|e| AppError::ExportWrite(format!("docx packing failed: {e}")))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docx_rs::{read_docx, DocumentChild, ParagraphChild, RunChild};

    /// Plain text of every body paragraph, in order.
    fn paragraph_texts(bytes: &[u8]) -> Vec<String> {
        let doc = read_docx(bytes).unwrap();
        doc.document
            .children
            .iter()
            .filter_map(|child| match child {
                DocumentChild::Paragraph(p) => Some(
                    p.children
                        .iter()
                        .filter_map(|pc| match pc {
                            ParagraphChild::Run(run) => Some(
                                run.children
                                    .iter()
                                    .filter_map(|rc| match rc {
                                        RunChild::Text(t) => Some(t.text.clone()),
                                        _ => None,
                                    })
                                    .collect::<String>(),
                            ),
                            _ => None,
                        })
                        .collect::<String>(),
                ),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_blank_middle_line_becomes_empty_paragraph() {
        let bytes = build_docx("Line1\n\nLine3").unwrap();
        let paragraphs = paragraph_texts(&bytes);
        assert_eq!(paragraphs, vec![DOCUMENT_HEADING, "Line1", "", "Line3"]);
    }

    #[test]
    fn test_lines_survive_round_trip() {
        let text = "Jane Doe\nSenior Engineer — Zürich\n\n• Built résumé tooling\n日本語";
        let paragraphs = paragraph_texts(&build_docx(text).unwrap());
        let body: Vec<&str> = paragraphs[1..].iter().map(|p| p.trim_end()).collect();
        assert_eq!(body, text.split('\n').collect::<Vec<_>>());
    }

    #[test]
    fn test_empty_text_builds_heading_and_one_empty_paragraph() {
        let paragraphs = paragraph_texts(&build_docx("").unwrap());
        assert_eq!(paragraphs, vec![DOCUMENT_HEADING, ""]);
    }

    #[test]
    fn test_output_is_a_zip_container() {
        let bytes = build_docx("Line").unwrap();
        assert!(bytes.starts_with(b"PK"));
    }
}
