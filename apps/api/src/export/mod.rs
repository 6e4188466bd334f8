// Export of the finalized resume: a Word document written at finalize and a PDF
// rendered on demand. Both writers take the same newline-separated text.

pub mod artifacts;
pub mod docx;
pub mod handlers;
pub mod pdf;

/// Splits final text into lines, dropping the `\r` of CRLF form submissions.
/// The empty string is one empty line.
pub fn export_lines(text: &str) -> impl Iterator<Item = &str> {
    text.split('\n').map(|line| line.strip_suffix('\r').unwrap_or(line))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lines_keep_blank_middle_line() {
        assert_eq!(
            export_lines("Line1\n\nLine3").collect::<Vec<_>>(),
            vec!["Line1", "", "Line3"]
        );
    }

    #[test]
    fn test_lines_strip_crlf() {
        assert_eq!(
            export_lines("Line1\r\n\r\nLine3").collect::<Vec<_>>(),
            vec!["Line1", "", "Line3"]
        );
    }

    #[test]
    fn test_empty_text_is_one_empty_line() {
        assert_eq!(export_lines("").collect::<Vec<_>>(), vec![""]);
    }
}
